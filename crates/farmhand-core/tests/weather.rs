use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use farmhand_core::{ClientConfig, Error, WeatherClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;

async fn forecast(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("appid").map(String::as_str) != Some("test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "cod": 401, "message": "Invalid API key" })))
            .into_response();
    }
    if params.get("units").map(String::as_str) != Some("metric") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    match params.get("q").map(String::as_str) {
        Some("Pune") => Json(json!({
            "list": [
                { "dt_txt": "2024-06-01 09:00:00", "main": { "temp": 27.5, "humidity": 70 }, "weather": [{ "description": "haze", "icon": "50d" }] },
                { "dt_txt": "2024-06-01 12:00:00", "main": { "temp": 31.0 }, "weather": [{ "description": "clear sky", "icon": "01d" }] },
                { "dt_txt": "2024-06-02 09:00:00", "main": { "temp": 26.0 }, "weather": [] }
            ]
        }))
        .into_response(),
        Some("Nowhere") => Json(json!({ "list": [] })).into_response(),
        Some("Broken") => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "cod": "404", "message": "city not found" })))
            .into_response(),
    }
}

async fn provider(api_key: &str) -> WeatherClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind provider");
    let address = listener.local_addr().expect("local address");
    let router = Router::new().route("/data/2.5/forecast", get(forecast));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    WeatherClient::new(&ClientConfig {
        weather_api_key: Some(api_key.to_string()),
        weather_base_url: Some(format!("http://{address}")),
        ..ClientConfig::default()
    })
    .expect("weather client")
}

#[tokio::test]
async fn keeps_only_entries_for_the_requested_date() {
    let client = provider("test-key").await;

    let entries = client.forecast_on(" Pune ", "2024-06-01").await.unwrap();

    let times: Vec<_> = entries.iter().map(|entry| entry.time().to_string()).collect();
    assert_eq!(times, vec!["09:00", "12:00"]);
    assert_eq!(entries[0].description(), "haze");
    assert_eq!(entries[0].main.humidity, Some(70.0));
}

#[tokio::test]
async fn maps_provider_statuses_to_messages() {
    let client = provider("test-key").await;

    let error = client.forecast_on("Atlantis", "2024-06-01").await.unwrap_err();
    assert_eq!(error.status(), Some(404));
    assert_eq!(
        error.to_string(),
        "Location not found. Please enter a valid location."
    );

    let error = client.forecast_on("Broken", "2024-06-01").await.unwrap_err();
    assert_eq!(error.to_string(), "Error: 503. Please try again.");

    let error = provider("wrong-key")
        .await
        .forecast_on("Pune", "2024-06-01")
        .await
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Invalid API key. Please check your API key."
    );
}

#[tokio::test]
async fn empty_provider_list_is_no_data() {
    let client = provider("test-key").await;

    let error = client.forecast_on("Nowhere", "2024-06-01").await.unwrap_err();

    assert!(matches!(error, Error::NoData(_)));
    assert_eq!(
        error.to_string(),
        "No weather data available for this location."
    );
}
