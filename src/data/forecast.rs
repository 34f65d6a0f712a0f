use anyhow::{Context, Result};

use crate::{
    data::client::IpmaClient,
    domain::{city::LocationId, weather::RawForecastDay},
};

const DAILY_FORECAST_PATH: &str = "/open-data/forecast/meteorology/cities/daily";

pub fn daily_forecast_path(id: &LocationId) -> String {
    format!("{DAILY_FORECAST_PATH}/{id}.json")
}

/// Raw daily records for one location, in upstream order.
pub async fn fetch_daily_forecast(
    client: &IpmaClient,
    id: &LocationId,
) -> Result<Vec<RawForecastDay>> {
    client
        .get_data(&daily_forecast_path(id))
        .await
        .with_context(|| format!("daily forecast for location {id} unavailable"))
}
