use std::sync::Arc;

use anyhow::Result;

use crate::{
    aggregator::ForecastAggregator,
    app::settings::RuntimeSettings,
    data::{
        catalog::{ReferenceData, load_reference_data},
        client::IpmaClient,
    },
    resilience::readiness::Readiness,
};

/// Everything a request handler needs; built once before serving.
#[derive(Debug, Clone)]
pub struct AppState {
    pub aggregator: ForecastAggregator,
    pub settings: RuntimeSettings,
}

impl AppState {
    /// Loads the reference tables. Catalog failures leave the tables empty
    /// rather than failing startup.
    pub async fn bootstrap(settings: RuntimeSettings) -> Result<Self> {
        let client = IpmaClient::with_base_url(&settings.api_url, settings.timeout())?;
        let reference = load_reference_data(&client).await;
        Ok(Self::new(client, reference, settings))
    }

    pub fn new(client: IpmaClient, reference: ReferenceData, settings: RuntimeSettings) -> Self {
        Self {
            aggregator: ForecastAggregator::new(client, Arc::new(reference)),
            settings,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        self.aggregator.reference()
    }

    pub fn readiness(&self) -> Readiness {
        self.reference().readiness()
    }
}
