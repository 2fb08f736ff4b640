//! Application configuration
//!
//! Split into focused sub-modules:
//! - `error`: configuration errors
//! - `loader`: file and environment layering
//! - `output`: text output settings

mod error;
mod loader;
mod output;

use std::{fs, path::Path};

use application::MAX_FORECAST_DAYS;
use domain::{LocationQuery, UnitSystem};
use integration_weather::{GeocodingConfig, WeatherConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use error::ConfigError;
pub use loader::{CONFIG_FILE_NAME, ENV_PREFIX, default_config_path};
pub use output::OutputConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Comment block written above a generated configuration file
const DEFAULT_FILE_HEADER: &str = "\
# whetherman configuration
#
# Every setting can be overridden with an environment variable, e.g.
#   WHETHERMAN_UNITS=imperial
#   WHETHERMAN_WEATHER__FORECAST_DAYS=3
#
# Location used when a command names none (place name or \"lat,lon\"):
# default_location = \"Berlin\"

";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Unit system for temperatures, wind speeds and precipitation
    #[serde(default)]
    pub units: UnitSystem,

    /// Location used when a command names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location: Option<String>,

    /// Forecast API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Geocoding API settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Text output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Check value ranges that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_FORECAST_DAYS).contains(&self.weather.forecast_days) {
            return Err(ConfigError::Invalid(format!(
                "weather.forecast_days must be between 1 and {MAX_FORECAST_DAYS}, got {}",
                self.weather.forecast_days
            )));
        }
        if self.weather.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "weather.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.geocoding.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "geocoding.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !(1..=100).contains(&self.geocoding.max_results) {
            return Err(ConfigError::Invalid(format!(
                "geocoding.max_results must be between 1 and 100, got {}",
                self.geocoding.max_results
            )));
        }
        validate_url("weather.base_url", &self.weather.base_url)?;
        validate_url("geocoding.base_url", &self.geocoding.base_url)?;

        if let Some(ref location) = self.default_location {
            LocationQuery::parse(location).map_err(|e| {
                ConfigError::Invalid(format!("default_location {location:?} is invalid: {e}"))
            })?;
        }

        debug!("Configuration validated");
        Ok(())
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the default configuration to `path`
    ///
    /// Parent directories are created as needed. An existing file is only
    /// replaced when `force` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyExists`] when the file exists and
    /// `force` is not set, or an I/O error.
    pub fn write_default(path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = format!("{DEFAULT_FILE_HEADER}{}", Self::default().to_toml()?);
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Wrote default configuration");
        Ok(())
    }
}

fn validate_url(key: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{key} must start with http:// or https://, got {url:?}"
        )))
    }
}
