use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    data::client::IpmaClient,
    domain::{
        city::{CityIndex, LocationId},
        weather::{WeatherTypeIndex, weather_type_code},
    },
    resilience::readiness::{Readiness, evaluate_readiness},
};

const CITIES_PATH: &str = "/open-data/distrits-islands.json";
const WEATHER_TYPES_PATH: &str = "/open-data/weather-type-classe.json";

/// Lookup tables loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub cities: CityIndex,
    pub weather_types: WeatherTypeIndex,
    pub loaded_at: DateTime<Utc>,
}

impl ReferenceData {
    pub fn new(cities: CityIndex, weather_types: WeatherTypeIndex) -> Self {
        Self {
            cities,
            weather_types,
            loaded_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn readiness(&self) -> Readiness {
        evaluate_readiness(self.cities.len(), self.weather_types.len())
    }
}

pub async fn load_reference_data(client: &IpmaClient) -> ReferenceData {
    let (cities, weather_types) =
        tokio::join!(load_city_index(client), load_weather_type_index(client));
    let data = ReferenceData::new(cities, weather_types);
    info!(
        cities = data.cities.len(),
        weather_types = data.weather_types.len(),
        readiness = ?data.readiness(),
        "reference data loaded"
    );
    data
}

/// Never fails: a broken catalog yields an empty index, so every later
/// lookup reports the city as unknown.
pub async fn load_city_index(client: &IpmaClient) -> CityIndex {
    match fetch_city_index(client).await {
        Ok(index) => index,
        Err(err) => {
            warn!("failed to load city catalog: {err:#}");
            CityIndex::default()
        }
    }
}

pub async fn load_weather_type_index(client: &IpmaClient) -> WeatherTypeIndex {
    match fetch_weather_type_index(client).await {
        Ok(index) => index,
        Err(err) => {
            warn!("failed to load weather types: {err:#}");
            WeatherTypeIndex::default()
        }
    }
}

async fn fetch_city_index(client: &IpmaClient) -> Result<CityIndex> {
    let records: Vec<CityRecord> = client
        .get_data(CITIES_PATH)
        .await
        .context("city catalog unavailable")?;
    Ok(records
        .into_iter()
        .map(|record| (record.local, record.global_id_local))
        .collect())
}

async fn fetch_weather_type_index(client: &IpmaClient) -> Result<WeatherTypeIndex> {
    let records: Vec<WeatherTypeRecord> = client
        .get_data(WEATHER_TYPES_PATH)
        .await
        .context("weather type catalog unavailable")?;
    Ok(WeatherTypeIndex::from_entries(
        records
            .into_iter()
            .map(|record| (record.id_weather_type, record.desc_weather_type_pt)),
    ))
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    local: String,
    #[serde(rename = "globalIdLocal")]
    global_id_local: LocationId,
}

#[derive(Debug, Deserialize)]
struct WeatherTypeRecord {
    #[serde(rename = "idWeatherType", deserialize_with = "catalog_code")]
    id_weather_type: i64,
    #[serde(rename = "descWeatherTypePT")]
    desc_weather_type_pt: String,
}

/// Same coercion as forecast records (`1`, `1.0`, `"1"`), but the field is
/// required and anything unreadable rejects the record.
fn catalog_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    weather_type_code(Some(&value))
        .ok_or_else(|| D::Error::custom(format!("invalid weather type code {value}")))
}
