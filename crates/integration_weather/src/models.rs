//! Weather data models
//!
//! Types for representing weather data from the Open-Meteo API. Times are
//! local to the forecast location and carry its UTC offset.

use chrono::{DateTime, FixedOffset, NaiveDate};
use domain::WeatherCondition;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Current weather conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Observation time (location-local)
    pub time: DateTime<FixedOffset>,
    /// Temperature
    pub temperature: f32,
    /// Apparent (feels like) temperature
    pub apparent_temperature: f32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Weather condition
    pub condition: WeatherCondition,
    /// WMO weather code
    pub weather_code: u8,
    /// Whether the sun is up
    pub is_day: bool,
    /// Wind speed
    pub wind_speed: f32,
    /// Wind direction in degrees (0-360)
    pub wind_direction: u16,
    /// Wind gusts
    pub wind_gusts: f32,
    /// Precipitation
    pub precipitation: f32,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: u8,
    /// Surface pressure in hPa
    pub pressure: f32,
}

/// Daily weather forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Forecast date
    pub date: NaiveDate,
    /// Dominant weather condition
    pub condition: WeatherCondition,
    /// WMO weather code
    pub weather_code: u8,
    /// Maximum temperature
    pub temperature_max: f32,
    /// Minimum temperature
    pub temperature_min: f32,
    /// Sunrise time; absent during polar night/day
    pub sunrise: Option<DateTime<FixedOffset>>,
    /// Sunset time; absent during polar night/day
    pub sunset: Option<DateTime<FixedOffset>>,
    /// Maximum UV index
    pub uv_index_max: Option<f32>,
    /// Total precipitation
    pub precipitation_sum: f32,
    /// Precipitation probability percentage (0-100)
    pub precipitation_probability: Option<u8>,
    /// Maximum wind speed
    pub wind_speed_max: f32,
    /// Dominant wind direction in degrees
    pub wind_direction_dominant: Option<u16>,
}

/// Complete weather forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    /// Current weather conditions
    pub current: CurrentWeather,
    /// Daily forecasts, starting today
    pub daily: Vec<DailyForecast>,
    /// Latitude of the grid cell used
    pub latitude: f64,
    /// Longitude of the grid cell used
    pub longitude: f64,
    /// Timezone of the location
    pub timezone: String,
    /// Timezone abbreviation
    pub timezone_abbreviation: String,
    /// Offset of location-local time from UTC
    pub utc_offset_seconds: i32,
    /// Elevation in meters
    pub elevation: f32,
}

/// Raw weather data from API (current)
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherData {
    pub time: String,
    pub temperature_2m: f32,
    pub relative_humidity_2m: u8,
    pub apparent_temperature: f32,
    #[serde(default = "default_is_day")]
    pub is_day: u8,
    pub weather_code: u8,
    pub wind_speed_10m: f32,
    pub wind_direction_10m: u16,
    pub wind_gusts_10m: f32,
    pub precipitation: f32,
    pub cloud_cover: u8,
    pub surface_pressure: f32,
}

const fn default_is_day() -> u8 {
    1
}

/// Raw daily data from API
#[derive(Debug, Clone, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    pub weather_code: Vec<u8>,
    pub temperature_2m_max: Vec<f32>,
    pub temperature_2m_min: Vec<f32>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
    #[serde(default)]
    pub uv_index_max: Option<Vec<Option<f32>>>,
    pub precipitation_sum: Vec<f32>,
    #[serde(default)]
    pub precipitation_probability_max: Option<Vec<Option<u8>>>,
    pub wind_speed_10m_max: Vec<f32>,
    #[serde(default)]
    pub wind_direction_10m_dominant: Option<Vec<Option<u16>>>,
}

impl DailyData {
    /// Number of days, or `None` if the required series disagree in length
    pub fn consistent_len(&self) -> Option<usize> {
        let len = self.time.len();
        let required = [
            self.weather_code.len(),
            self.temperature_2m_max.len(),
            self.temperature_2m_min.len(),
            self.sunrise.len(),
            self.sunset.len(),
            self.precipitation_sum.len(),
            self.wind_speed_10m_max.len(),
        ];
        required.iter().all(|&l| l == len).then_some(len)
    }
}

/// Raw API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub utc_offset_seconds: i32,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub timezone_abbreviation: String,
    #[serde(default)]
    pub elevation: f32,
    pub current: Option<WeatherData>,
    pub daily: Option<DailyData>,
}

/// Error body returned by Open-Meteo for rejected requests
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub reason: String,
}

impl ApiErrorBody {
    /// Failure message for a rejected request, with the API's reason when the
    /// body carries one
    pub fn describe(status: StatusCode, body: &str) -> String {
        match serde_json::from_str::<Self>(body) {
            Ok(error) => format!("HTTP {status}: {}", error.reason),
            Err(_) => format!("HTTP {status}"),
        }
    }
}

/// Raw geocoding search response
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResponse {
    /// Absent when nothing matched
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
}

/// Single geocoding match
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}
