//! Full stack: router, service, cache and log against a mock provider.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use nimbus_cache::TtlCache;
use nimbus_core::ApiKey;
use nimbus_gateway::{App, AppState};
use nimbus_ledger::{CsvLookupLog, HEADER};
use nimbus_openweather::{OpenWeatherClient, OpenWeatherSettings};
use nimbus_service::WeatherService;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn router(server: &MockServer, log_path: &Path) -> Router {
    let client = OpenWeatherClient::new(
        OpenWeatherSettings::builder()
            .base_url(server.uri())
            .build(),
    )
    .unwrap();
    let service = WeatherService::new(client, TtlCache::default(), CsvLookupLog::new(log_path));
    App::router(AppState::new(
        Arc::new(service),
        Some(ApiKey::new("test-key")),
    ))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn mount_city(server: &MockServer, city: &str, temp: f64) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": city,
            "weather": [{"description": "broken clouds"}],
            "main": {"temp": temp, "humidity": 55},
            "wind": {"speed": 4.1}
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn second_lookup_is_served_from_cache_and_logged_once() {
    let server = MockServer::start().await;
    mount_city(&server, "Seattle", 52.3).await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("data").join("weather_log.csv");
    let app = router(&server, &log_path);

    let (status, first) = get(&app, "/weather/Seattle?units=metric").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["cache"], false);
    assert_eq!(first["temp"], 52.3);

    let (status, second) = get(&app, "/weather/seattle?units=metric").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["cache"], true);
    assert_eq!(second["city"], "Seattle");

    let (_, meta) = get(&app, "/meta").await;
    assert_eq!(meta["cache_entries"], 1);

    let log = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].ends_with(",Seattle,metric,52.3,55,broken clouds,4.1"));
}

#[tokio::test]
async fn bulk_request_mixes_results_and_provider_errors() {
    let server = MockServer::start().await;
    mount_city(&server, "Seattle", 50.0).await;
    mount_city(&server, "Tokyo", 68.5).await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "NoSuchCity123"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("weather_log.csv");
    let app = router(&server, &log_path);

    let (status, body) = get(&app, "/weather?cities=Seattle,NoSuchCity123,Tokyo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["units"], "imperial");
    assert_eq!(body["count"], 2);
    assert_eq!(
        body["errors"],
        json!([{
            "city": "NoSuchCity123",
            "code": 404,
            "error": {"cod": "404", "message": "city not found"}
        }])
    );

    let mut cities: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|result| result["city"].as_str().unwrap())
        .collect();
    cities.sort();
    assert_eq!(cities, vec!["Seattle", "Tokyo"]);

    // Header plus one row per successful city.
    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().count(), 3);
}
