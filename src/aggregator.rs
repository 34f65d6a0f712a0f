use std::sync::Arc;

use tracing::{debug, error};

use crate::{
    data::{catalog::ReferenceData, client::IpmaClient, forecast::fetch_daily_forecast},
    domain::weather::{ForecastDay, enrich_days},
};

pub const CITY_NOT_FOUND_MESSAGE: &str = "A cidade não foi encontrada 😕";
pub const UPSTREAM_UNAVAILABLE_MESSAGE: &str = "Não foi possivel contactar a API do IPMA 🥴";

#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("city not found: {0:?}")]
    CityNotFound(String),
    #[error("IPMA forecast unavailable")]
    UpstreamUnavailable(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ForecastError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CityNotFound(_) => CITY_NOT_FOUND_MESSAGE,
            Self::UpstreamUnavailable(_) => UPSTREAM_UNAVAILABLE_MESSAGE,
        }
    }
}

/// Resolves city names and returns enriched daily forecasts.
#[derive(Debug, Clone)]
pub struct ForecastAggregator {
    client: IpmaClient,
    reference: Arc<ReferenceData>,
}

impl ForecastAggregator {
    pub fn new(client: IpmaClient, reference: Arc<ReferenceData>) -> Self {
        Self { client, reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Either every returned day carries a description and icon, or the
    /// call fails before any enrichment happens.
    pub async fn forecast_by_city(&self, city: &str) -> Result<Vec<ForecastDay>, ForecastError> {
        let Some(id) = self.reference.cities.resolve(city) else {
            debug!(city, "city not in catalog");
            return Err(ForecastError::CityNotFound(city.trim().to_string()));
        };

        let days = fetch_daily_forecast(&self.client, id)
            .await
            .map_err(|err| {
                error!("failed to fetch forecast for {city} ({id}): {err:#}");
                ForecastError::UpstreamUnavailable(err.into())
            })?;

        Ok(enrich_days(days, &self.reference.weather_types))
    }
}
