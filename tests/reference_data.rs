mod common;

use std::time::Duration;

use common::*;
use ipma_forecast::{
    app::{settings::RuntimeSettings, state::AppState},
    data::{
        catalog::{load_city_index, load_reference_data, load_weather_type_index},
        client::IpmaClient,
    },
    domain::city::LocationId,
    resilience::readiness::Readiness,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn catalogs_build_both_tables() {
    let server = MockServer::start().await;
    mount_catalogs(&server).await;

    let reference = load_reference_data(&client_for(&server)).await;

    assert_eq!(reference.cities.len(), 3);
    assert_eq!(
        reference.cities.resolve("porto"),
        Some(&LocationId::from(1_131_200))
    );
    assert_eq!(
        reference.cities.resolve("VIANA DO CASTELO"),
        Some(&LocationId::from(1_160_900))
    );
    assert_eq!(reference.weather_types.len(), 5);
    let clear = reference.weather_types.get(1).expect("code 1");
    assert_eq!(clear.description, "Céu limpo");
    assert_eq!(clear.icon_file, "w_ic_d_01.svg");
    assert_eq!(
        reference.weather_types.get(-99).expect("code -99").icon_file,
        "w_ic_d_-99.svg"
    );
    assert_eq!(reference.readiness(), Readiness::Ready);
}

#[tokio::test]
async fn catalogs_are_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CITIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(cities_payload()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(WEATHER_TYPES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_types_payload()))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/open-data/forecast/meteorology/cities/daily/1131200.json",
        envelope(json!([{"idWeatherType": 2}])),
    )
    .await;

    let settings = RuntimeSettings {
        api_url: server.uri(),
        ..RuntimeSettings::default()
    };
    let state = AppState::bootstrap(settings).await.expect("bootstrap");

    for _ in 0..3 {
        let days = state
            .aggregator
            .forecast_by_city("Porto")
            .await
            .expect("forecast");
        assert_eq!(days[0].descricao, "Céu pouco nublado");
    }
}

#[tokio::test]
async fn failed_city_catalog_degrades_to_empty_index() {
    let server = MockServer::start().await;
    mount_status(&server, CITIES_PATH, 503).await;
    mount_json(&server, WEATHER_TYPES_PATH, weather_types_payload()).await;

    let reference = load_reference_data(&client_for(&server)).await;

    assert!(reference.cities.is_empty());
    assert_eq!(reference.weather_types.len(), 5);
    assert_eq!(reference.readiness(), Readiness::Unavailable);
}

#[tokio::test]
async fn one_bad_weather_type_record_empties_the_table() {
    let server = MockServer::start().await;
    mount_json(&server, CITIES_PATH, cities_payload()).await;
    mount_json(
        &server,
        WEATHER_TYPES_PATH,
        envelope(json!([
            {"descWeatherTypePT": "Céu limpo", "idWeatherType": 1},
            {"descWeatherTypePT": "Nublado", "idWeatherType": "quatro"}
        ])),
    )
    .await;

    let reference = load_reference_data(&client_for(&server)).await;

    assert!(reference.weather_types.is_empty());
    assert_eq!(reference.readiness(), Readiness::Degraded);
}

#[tokio::test]
async fn weather_type_codes_sent_as_text_are_accepted() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        WEATHER_TYPES_PATH,
        envelope(json!([
            {"descWeatherTypePT": "Céu limpo", "idWeatherType": "1"},
            {"descWeatherTypePT": "Céu nublado", "idWeatherType": 4}
        ])),
    )
    .await;

    let types = load_weather_type_index(&client_for(&server)).await;

    assert_eq!(types.len(), 2);
    let clear = types.get(1).expect("code 1");
    assert_eq!(clear.description, "Céu limpo");
    assert_eq!(clear.icon_file, "w_ic_d_01.svg");
    assert_eq!(types.get(4).expect("code 4").description, "Céu nublado");
}

#[tokio::test]
async fn missing_data_envelope_yields_empty_tables() {
    let server = MockServer::start().await;
    mount_json(&server, CITIES_PATH, json!({"owner": "IPMA"})).await;
    mount_json(&server, WEATHER_TYPES_PATH, json!([1, 2, 3])).await;
    let client = client_for(&server);

    assert!(load_city_index(&client).await.is_empty());
    assert!(load_weather_type_index(&client).await.is_empty());
}

#[tokio::test]
async fn unreachable_host_yields_empty_tables() {
    let client =
        IpmaClient::with_base_url("http://127.0.0.1:9", Duration::from_millis(500)).expect("client");

    let reference = load_reference_data(&client).await;

    assert!(reference.cities.is_empty());
    assert!(reference.weather_types.is_empty());
    assert_eq!(reference.readiness(), Readiness::Unavailable);
}
