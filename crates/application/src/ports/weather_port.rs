//! Weather service port
//!
//! Defines the interface for weather data retrieval. Values are expressed in
//! the unit system passed to each call.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use domain::{GeoLocation, UnitSystem, WeatherCondition};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Current weather conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Temperature
    pub temperature: f64,
    /// Apparent/feels-like temperature
    pub apparent_temperature: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Wind speed
    pub wind_speed: f64,
    /// Wind direction in degrees (0-360, meteorological)
    pub wind_direction: u16,
    /// Wind gusts
    pub wind_gusts: f64,
    /// Precipitation in the last hour
    pub precipitation: f64,
    /// Cloud cover in percent (0-100)
    pub cloud_cover: u8,
    /// Surface pressure in hPa
    pub pressure: f64,
    /// Weather condition
    pub condition: WeatherCondition,
    /// Whether the sun is up
    pub is_day: bool,
    /// When this data was observed (location-local time)
    pub observed_at: DateTime<FixedOffset>,
}

/// Weather forecast for a specific day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    /// The date of the forecast
    pub date: NaiveDate,
    /// Maximum temperature
    pub temperature_max: f64,
    /// Minimum temperature
    pub temperature_min: f64,
    /// Weather condition
    pub condition: WeatherCondition,
    /// Precipitation probability (0-100), when available
    pub precipitation_probability: Option<u8>,
    /// Expected precipitation
    pub precipitation_sum: f64,
    /// Maximum wind speed
    pub wind_speed_max: f64,
    /// Maximum UV index
    pub uv_index_max: Option<f64>,
    /// Sunrise time (location-local)
    pub sunrise: Option<DateTime<FixedOffset>>,
    /// Sunset time (location-local)
    pub sunset: Option<DateTime<FixedOffset>>,
}

/// Current conditions plus upcoming days
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    /// Current conditions
    pub current: CurrentWeather,
    /// Daily forecasts, starting today
    pub daily: Vec<DailyForecast>,
    /// IANA timezone of the location
    pub timezone: String,
    /// Timezone abbreviation (e.g. "CET")
    pub timezone_abbreviation: String,
}

/// Port for weather service operations
#[allow(clippy::struct_field_names)] // automock generates struct with `get_*` prefixes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get current weather for a location
    async fn get_current_weather(
        &self,
        location: &GeoLocation,
        units: UnitSystem,
    ) -> Result<CurrentWeather, ApplicationError>;

    /// Get current weather and a forecast for upcoming days
    ///
    /// # Arguments
    /// * `location` - Geographic location
    /// * `days` - Number of days to forecast (1-16)
    /// * `units` - Unit system for all returned values
    async fn get_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
        units: UnitSystem,
    ) -> Result<Forecast, ApplicationError>;
}
