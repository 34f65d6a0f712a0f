#![allow(dead_code)]

use std::time::Duration;

use ipma_forecast::{
    app::{settings::RuntimeSettings, state::AppState},
    data::{catalog::ReferenceData, client::IpmaClient},
    domain::{
        city::{CityIndex, LocationId},
        weather::WeatherTypeIndex,
    },
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const CITIES_PATH: &str = "/open-data/distrits-islands.json";
pub const WEATHER_TYPES_PATH: &str = "/open-data/weather-type-classe.json";
pub const LISBOA_FORECAST_PATH: &str = "/open-data/forecast/meteorology/cities/daily/1110600.json";
pub const LISBOA_ID: u64 = 1_110_600;

pub fn client_for(server: &MockServer) -> IpmaClient {
    IpmaClient::with_base_url(server.uri(), Duration::from_secs(2)).expect("client")
}

/// `{"Lisboa": 1110600}` and `{9: "Céu limpo"}`.
pub fn scenario_reference() -> ReferenceData {
    ReferenceData::new(
        CityIndex::from_entries([("Lisboa", LocationId::from(LISBOA_ID))]),
        WeatherTypeIndex::from_entries([(9, "Céu limpo")]),
    )
}

pub fn scenario_state(server: &MockServer) -> AppState {
    AppState::new(
        client_for(server),
        scenario_reference(),
        RuntimeSettings::default(),
    )
}

pub fn envelope(data: Value) -> Value {
    json!({
        "owner": "IPMA",
        "country": "PT",
        "data": data,
    })
}

pub fn cities_payload() -> Value {
    envelope(json!([
        {"idRegiao": 1, "idAreaAviso": "LSB", "idConcelho": 6, "globalIdLocal": 1110600,
         "latitude": "38.7660", "idDistrito": 11, "local": "Lisboa", "longitude": "-9.1286"},
        {"idRegiao": 1, "idAreaAviso": "PTO", "idConcelho": 12, "globalIdLocal": 1131200,
         "latitude": "41.1580", "idDistrito": 13, "local": "Porto", "longitude": "-8.6294"},
        {"idRegiao": 1, "idAreaAviso": "VCT", "idConcelho": 9, "globalIdLocal": 1160900,
         "latitude": "41.6952", "idDistrito": 16, "local": "Viana do Castelo", "longitude": "-8.8365"}
    ]))
}

pub fn weather_types_payload() -> Value {
    envelope(json!([
        {"descWeatherTypeEN": "--", "descWeatherTypePT": "---", "idWeatherType": -99},
        {"descWeatherTypeEN": "No information", "descWeatherTypePT": "Sem informação", "idWeatherType": 0},
        {"descWeatherTypeEN": "Clear sky", "descWeatherTypePT": "Céu limpo", "idWeatherType": 1},
        {"descWeatherTypeEN": "Partly cloudy", "descWeatherTypePT": "Céu pouco nublado", "idWeatherType": 2},
        {"descWeatherTypeEN": "Light rain", "descWeatherTypePT": "Chuva fraca ou chuvisco", "idWeatherType": 10}
    ]))
}

/// The two-day upstream forecast used throughout the flow tests.
pub fn scenario_forecast_payload() -> Value {
    envelope(json!([
        {"idWeatherType": 9, "tMin": "10"},
        {"idWeatherType": 99, "tMin": "8"}
    ]))
}

pub fn scenario_expected() -> Value {
    json!([
        {"idWeatherType": 9, "tMin": "10", "descricao": "Céu limpo", "icon_file": "w_ic_d_09.svg"},
        {"idWeatherType": 99, "tMin": "8", "descricao": "-", "icon_file": "icon-fallback.svg"}
    ])
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_catalogs(server: &MockServer) {
    mount_json(server, CITIES_PATH, cities_payload()).await;
    mount_json(server, WEATHER_TYPES_PATH, weather_types_payload()).await;
}
