use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

pub const IPMA_API_URL: &str = "https://api.ipma.pt";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared HTTP access to the IPMA open-data endpoints.
#[derive(Debug, Clone)]
pub struct IpmaClient {
    client: Client,
    base_url: String,
}

impl IpmaClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(IPMA_API_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client failed")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `path` and returns the document's `data` array.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("request to {url} returned non-success status"))?;

        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .with_context(|| format!("failed to parse payload from {url}"))?;

        Ok(envelope.data)
    }
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: Vec<T>,
}
