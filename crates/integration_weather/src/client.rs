//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo Forecast API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use domain::{MAX_FORECAST_DAYS, UnitSystem, WeatherCondition};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    ApiErrorBody, ApiResponse, CurrentWeather, DailyData, DailyForecast, Forecast, WeatherData,
};

/// Variables requested for the current-conditions block
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,\
     weather_code,wind_speed_10m,wind_direction_10m,wind_gusts_10m,precipitation,cloud_cover,\
     surface_pressure";

/// Variables requested for each forecast day
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,\
     uv_index_max,precipitation_sum,precipitation_probability_max,wind_speed_10m_max,\
     wind_direction_10m_dominant";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days (1-16, default: 7)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_forecast_days() -> u8 {
    7
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current weather for a location
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
        units: UnitSystem,
    ) -> Result<CurrentWeather, WeatherError>;

    /// Get current weather plus a daily forecast for a location
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
        units: UnitSystem,
    ) -> Result<Forecast, WeatherError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("whetherman/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Query parameters selecting the unit system; metric is the API default
    const fn unit_params(units: UnitSystem) -> &'static [(&'static str, &'static str)] {
        match units {
            UnitSystem::Metric => &[],
            UnitSystem::Imperial => &[
                ("temperature_unit", "fahrenheit"),
                ("wind_speed_unit", "mph"),
                ("precipitation_unit", "inch"),
            ],
        }
    }

    /// Build the query for a forecast request; `days: None` requests current conditions only
    fn build_query(
        latitude: f64,
        longitude: f64,
        days: Option<u8>,
        units: UnitSystem,
    ) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];

        if let Some(days) = days {
            query.push(("daily", DAILY_FIELDS.to_string()));
            query.push((
                "forecast_days",
                days.clamp(1, MAX_FORECAST_DAYS).to_string(),
            ));
        }

        query.extend(
            Self::unit_params(units)
                .iter()
                .map(|&(key, value)| (key, value.to_string())),
        );
        query
    }

    /// Send a forecast request and decode the body
    async fn fetch(&self, query: &[(&'static str, String)]) -> Result<ApiResponse, WeatherError> {
        let url = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));
        debug!(url = %url, ?query, "Requesting Open-Meteo forecast");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeatherError::Timeout
                } else {
                    WeatherError::RequestFailed(e.to_string())
                }
            })?;

        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    /// Parse current weather from API response
    fn parse_current_weather(
        data: &WeatherData,
        offset: FixedOffset,
    ) -> Result<CurrentWeather, WeatherError> {
        let time = parse_local_datetime(&data.time, offset)?;

        Ok(CurrentWeather {
            time,
            temperature: data.temperature_2m,
            apparent_temperature: data.apparent_temperature,
            humidity: data.relative_humidity_2m,
            condition: WeatherCondition::from_wmo_code(data.weather_code),
            weather_code: data.weather_code,
            is_day: data.is_day != 0,
            wind_speed: data.wind_speed_10m,
            wind_direction: data.wind_direction_10m,
            wind_gusts: data.wind_gusts_10m,
            precipitation: data.precipitation,
            cloud_cover: data.cloud_cover,
            pressure: data.surface_pressure,
        })
    }

    /// Parse daily forecasts from API response
    fn parse_daily_forecasts(
        daily_data: &DailyData,
        offset: FixedOffset,
    ) -> Result<Vec<DailyForecast>, WeatherError> {
        let days = daily_data.consistent_len().ok_or_else(|| {
            WeatherError::ParseError("Daily series have mismatched lengths".to_string())
        })?;

        let optional = |series: Option<&Vec<Option<f32>>>, i: usize| {
            series.and_then(|s| s.get(i).copied().flatten())
        };

        let mut forecasts = Vec::with_capacity(days);
        for i in 0..days {
            let date = NaiveDate::parse_from_str(&daily_data.time[i], "%Y-%m-%d")
                .map_err(|e| WeatherError::ParseError(format!("Invalid date: {e}")))?;

            let sunrise = daily_data.sunrise[i]
                .as_deref()
                .map(|s| parse_local_datetime(s, offset))
                .transpose()?;
            let sunset = daily_data.sunset[i]
                .as_deref()
                .map(|s| parse_local_datetime(s, offset))
                .transpose()?;

            let weather_code = daily_data.weather_code[i];

            forecasts.push(DailyForecast {
                date,
                condition: WeatherCondition::from_wmo_code(weather_code),
                weather_code,
                temperature_max: daily_data.temperature_2m_max[i],
                temperature_min: daily_data.temperature_2m_min[i],
                sunrise,
                sunset,
                uv_index_max: optional(daily_data.uv_index_max.as_ref(), i),
                precipitation_sum: daily_data.precipitation_sum[i],
                precipitation_probability: daily_data
                    .precipitation_probability_max
                    .as_ref()
                    .and_then(|p| p.get(i).copied().flatten()),
                wind_speed_max: daily_data.wind_speed_10m_max[i],
                wind_direction_dominant: daily_data
                    .wind_direction_10m_dominant
                    .as_ref()
                    .and_then(|d| d.get(i).copied().flatten()),
            });
        }

        Ok(forecasts)
    }
}

/// Map non-success statuses to errors, preferring the API's own reason
async fn check_status(response: Response) -> Result<Response, WeatherError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(WeatherError::RateLimitExceeded);
    }
    if status.is_server_error() {
        return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
    }

    let body = response.text().await.unwrap_or_default();
    Err(WeatherError::RequestFailed(ApiErrorBody::describe(status, &body)))
}

/// UTC offset of the forecast location
fn location_offset(utc_offset_seconds: i32) -> Result<FixedOffset, WeatherError> {
    FixedOffset::east_opt(utc_offset_seconds).ok_or_else(|| {
        WeatherError::ParseError(format!("Invalid UTC offset: {utc_offset_seconds}s"))
    })
}

/// Parse a location-local ISO 8601 datetime (`2026-02-05T14:00`)
fn parse_local_datetime(s: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>, WeatherError> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| WeatherError::ParseError(format!("Invalid datetime format: {s}")))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| WeatherError::ParseError(format!("Ambiguous local time: {s}")))
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
        units: UnitSystem,
    ) -> Result<CurrentWeather, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let query = Self::build_query(latitude, longitude, None, units);
        let api_response = self.fetch(&query).await?;

        let current_data = api_response.current.ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        let offset = location_offset(api_response.utc_offset_seconds)?;
        Self::parse_current_weather(&current_data, offset)
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, days = %days))]
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
        units: UnitSystem,
    ) -> Result<Forecast, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let query = Self::build_query(latitude, longitude, Some(days), units);
        let api_response = self.fetch(&query).await?;

        let current_data = api_response.current.ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        let daily_data = api_response.daily.ok_or_else(|| {
            WeatherError::ParseError("No daily forecast data in response".to_string())
        })?;

        let offset = location_offset(api_response.utc_offset_seconds)?;
        let current = Self::parse_current_weather(&current_data, offset)?;
        let daily = Self::parse_daily_forecasts(&daily_data, offset)?;
        debug!(days = daily.len(), "Parsed daily forecast");

        Ok(Forecast {
            current,
            daily,
            latitude: api_response.latitude,
            longitude: api_response.longitude,
            timezone: api_response.timezone,
            timezone_abbreviation: api_response.timezone_abbreviation,
            utc_offset_seconds: api_response.utc_offset_seconds,
            elevation: api_response.elevation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_value<'a>(query: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    fn sample_current() -> WeatherData {
        WeatherData {
            time: "2026-02-05T14:00".to_string(),
            temperature_2m: 10.5,
            relative_humidity_2m: 75,
            apparent_temperature: 8.2,
            is_day: 1,
            weather_code: 3,
            wind_speed_10m: 15.0,
            wind_direction_10m: 180,
            wind_gusts_10m: 25.0,
            precipitation: 0.5,
            cloud_cover: 80,
            surface_pressure: 1013.25,
        }
    }

    fn sample_daily() -> DailyData {
        DailyData {
            time: vec!["2026-02-05".to_string(), "2026-02-06".to_string()],
            weather_code: vec![61, 0],
            temperature_2m_max: vec![8.0, 10.0],
            temperature_2m_min: vec![2.0, 1.0],
            sunrise: vec![Some("2026-02-05T07:45".to_string()), None],
            sunset: vec![Some("2026-02-05T17:03".to_string()), None],
            uv_index_max: Some(vec![Some(1.5), None]),
            precipitation_sum: vec![4.0, 0.0],
            precipitation_probability_max: None,
            wind_speed_10m_max: vec![20.0, 8.0],
            wind_direction_10m_dominant: Some(vec![Some(250), Some(90)]),
        }
    }

    fn utc_plus_one() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.forecast_days, 7);
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: WeatherConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.forecast_days, 7);
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(OpenMeteoClient::validate_coordinates(0.0, 0.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(90.0, 180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(-90.0, -180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_build_query_current_only() {
        let query = OpenMeteoClient::build_query(52.52, 13.41, None, UnitSystem::Metric);
        assert_eq!(query_value(&query, "latitude"), Some("52.52"));
        assert_eq!(query_value(&query, "longitude"), Some("13.41"));
        assert_eq!(query_value(&query, "timezone"), Some("auto"));
        assert!(query_value(&query, "current").is_some());
        assert!(query_value(&query, "daily").is_none());
        assert!(query_value(&query, "forecast_days").is_none());
        assert!(query_value(&query, "temperature_unit").is_none());
    }

    #[test]
    fn test_build_query_forecast() {
        let query = OpenMeteoClient::build_query(52.52, 13.41, Some(7), UnitSystem::Metric);
        assert_eq!(query_value(&query, "forecast_days"), Some("7"));
        assert!(
            query_value(&query, "daily")
                .is_some_and(|d| d.contains("temperature_2m_max"))
        );
    }

    #[test]
    fn test_build_query_clamps_days() {
        let query = OpenMeteoClient::build_query(0.0, 0.0, Some(20), UnitSystem::Metric);
        assert_eq!(query_value(&query, "forecast_days"), Some("16"));

        let query = OpenMeteoClient::build_query(0.0, 0.0, Some(0), UnitSystem::Metric);
        assert_eq!(query_value(&query, "forecast_days"), Some("1"));
    }

    #[test]
    fn test_build_query_imperial_units() {
        let query = OpenMeteoClient::build_query(40.71, -74.0, None, UnitSystem::Imperial);
        assert_eq!(query_value(&query, "temperature_unit"), Some("fahrenheit"));
        assert_eq!(query_value(&query, "wind_speed_unit"), Some("mph"));
        assert_eq!(query_value(&query, "precipitation_unit"), Some("inch"));
    }

    #[test]
    fn test_parse_local_datetime_keeps_offset() {
        let dt = parse_local_datetime("2026-02-05T14:00", utc_plus_one()).expect("should parse");
        assert_eq!(dt.to_rfc3339(), "2026-02-05T14:00:00+01:00");
    }

    #[test]
    fn test_parse_local_datetime_with_seconds() {
        let dt =
            parse_local_datetime("2026-02-05T14:00:30", utc_plus_one()).expect("should parse");
        assert_eq!(dt.format("%H:%M:%S").to_string(), "14:00:30");
    }

    #[test]
    fn test_parse_local_datetime_invalid() {
        assert!(parse_local_datetime("invalid", utc_plus_one()).is_err());
        assert!(parse_local_datetime("2026-02-05", utc_plus_one()).is_err());
    }

    #[test]
    fn test_location_offset_bounds() {
        assert!(location_offset(-36_000).is_ok());
        assert!(location_offset(200_000).is_err());
    }

    #[test]
    fn test_parse_current_weather() {
        let weather = OpenMeteoClient::parse_current_weather(&sample_current(), utc_plus_one())
            .expect("should parse");
        assert!((weather.temperature - 10.5).abs() < f32::EPSILON);
        assert_eq!(weather.humidity, 75);
        assert_eq!(weather.condition, WeatherCondition::Overcast);
        assert_eq!(weather.weather_code, 3);
        assert!(weather.is_day);
    }

    #[test]
    fn test_parse_current_weather_at_night() {
        let data = WeatherData {
            is_day: 0,
            ..sample_current()
        };
        let weather =
            OpenMeteoClient::parse_current_weather(&data, utc_plus_one()).expect("should parse");
        assert!(!weather.is_day);
    }

    #[test]
    fn test_parse_daily_forecasts() {
        let days = OpenMeteoClient::parse_daily_forecasts(&sample_daily(), utc_plus_one())
            .expect("should parse");
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].condition, WeatherCondition::Rain);
        assert_eq!(
            days[0].sunrise.map(|s| s.format("%H:%M").to_string()),
            Some("07:45".to_string())
        );
        assert_eq!(days[0].uv_index_max, Some(1.5));
        assert_eq!(days[0].precipitation_probability, None);
        assert_eq!(days[0].wind_direction_dominant, Some(250));

        assert!(days[1].sunrise.is_none());
        assert!(days[1].uv_index_max.is_none());
    }

    #[test]
    fn test_parse_daily_forecasts_rejects_ragged_series() {
        let mut daily = sample_daily();
        daily.precipitation_sum.pop();
        let result = OpenMeteoClient::parse_daily_forecasts(&daily, utc_plus_one());
        assert!(matches!(result, Err(WeatherError::ParseError(_))));
    }

    #[test]
    fn test_parse_daily_forecasts_rejects_bad_date() {
        let mut daily = sample_daily();
        daily.time[1] = "06.02.2026".to_string();
        let result = OpenMeteoClient::parse_daily_forecasts(&daily, utc_plus_one());
        assert!(matches!(result, Err(WeatherError::ParseError(_))));
    }

    #[test]
    fn test_weather_error_display() {
        let err = WeatherError::InvalidCoordinates;
        assert!(err.to_string().contains("latitude"));
        assert!(err.to_string().contains("longitude"));

        let err = WeatherError::RateLimitExceeded;
        assert!(err.to_string().contains("Rate limit"));

        assert_eq!(WeatherError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_client_creation() {
        let client = OpenMeteoClient::new(WeatherConfig::default());
        assert!(client.is_ok());
    }
}
