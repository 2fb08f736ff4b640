//! Adapter tests against a mock Open-Meteo server
//!
//! Verifies that HTTP-level failures surface as the right application errors
//! and that successful responses arrive in port types.

use application::{
    ApplicationError,
    ports::{GeocodingPort, WeatherPort},
};
use domain::{GeoLocation, UnitSystem, WeatherCondition};
use infrastructure::{GeocodingAdapter, WeatherAdapter};
use integration_weather::{GeocodingConfig, WeatherConfig};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 40.71,
        "longitude": -74.01,
        "utc_offset_seconds": -18000,
        "timezone": "America/New_York",
        "timezone_abbreviation": "EST",
        "elevation": 10.0,
        "current": {
            "time": "2024-01-15T07:00",
            "temperature_2m": 28.4,
            "relative_humidity_2m": 60,
            "apparent_temperature": 20.1,
            "is_day": 0,
            "weather_code": 0,
            "wind_speed_10m": 9.3,
            "wind_direction_10m": 315,
            "wind_gusts_10m": 15.0,
            "precipitation": 0.0,
            "cloud_cover": 5,
            "surface_pressure": 1020.0
        },
        "daily": {
            "time": ["2024-01-15"],
            "weather_code": [71],
            "temperature_2m_max": [33.0],
            "temperature_2m_min": [24.5],
            "sunrise": ["2024-01-15T07:18"],
            "sunset": ["2024-01-15T16:54"],
            "precipitation_sum": [0.12],
            "precipitation_probability_max": [40],
            "wind_speed_10m_max": [14.0]
        }
    })
}

fn weather_adapter(server: &MockServer) -> WeatherAdapter {
    WeatherAdapter::with_config(WeatherConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

fn geocoding_adapter(server: &MockServer) -> GeocodingAdapter {
    GeocodingAdapter::with_config(GeocodingConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

fn new_york() -> GeoLocation {
    GeoLocation::new(40.7128, -74.006).unwrap()
}

#[tokio::test]
async fn forecast_arrives_in_port_types() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("forecast_days", "1"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = weather_adapter(&server)
        .get_forecast(&new_york(), 1, UnitSystem::Imperial)
        .await
        .unwrap();

    assert_eq!(forecast.timezone, "America/New_York");
    assert_eq!(forecast.timezone_abbreviation, "EST");
    assert!(!forecast.current.is_day);
    assert_eq!(forecast.current.condition, WeatherCondition::ClearSky);
    assert_eq!(
        forecast.current.observed_at.to_rfc3339(),
        "2024-01-15T07:00:00-05:00"
    );

    let day = &forecast.daily[0];
    assert_eq!(day.condition, WeatherCondition::Snow);
    assert_eq!(day.precipitation_probability, Some(40));
    assert!(day.uv_index_max.is_none());
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = weather_adapter(&server)
        .get_current_weather(&new_york(), UnitSystem::Metric)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::RateLimited));
}

#[tokio::test]
async fn bad_request_maps_to_external_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })))
        .mount(&server)
        .await;

    let err = weather_adapter(&server)
        .get_current_weather(&new_york(), UnitSystem::Metric)
        .await
        .unwrap_err();
    match err {
        ApplicationError::ExternalService(message) => assert!(message.contains("Latitude")),
        other => unreachable!("Expected ExternalService, got: {other:?}"),
    }
}

#[tokio::test]
async fn geocoding_results_become_places() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Springfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {
                    "name": "Springfield",
                    "latitude": 39.80172,
                    "longitude": -89.64371,
                    "country_code": "US",
                    "country": "United States",
                    "admin1": "Illinois",
                    "timezone": "America/Chicago"
                },
                {
                    "name": "Springfield",
                    "latitude": 37.21533,
                    "longitude": -93.29824,
                    "country_code": "US",
                    "country": "United States",
                    "admin1": "Missouri",
                    "timezone": "America/Chicago"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let places = geocoding_adapter(&server)
        .search("Springfield", 10)
        .await
        .unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(
        places[1].display_name(),
        "Springfield, Missouri, United States"
    );
    assert!(places[1].matches_qualifier("missouri"));
}

#[tokio::test]
async fn geocoding_outage_maps_to_external_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = geocoding_adapter(&server)
        .search("Springfield", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ExternalService(_)));
}
