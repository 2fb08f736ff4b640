//! Measurement unit system

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Units used for temperatures, wind speed and precipitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Celsius, km/h, millimeters
    #[default]
    Metric,
    /// Fahrenheit, mph, inches
    Imperial,
}

impl UnitSystem {
    /// Temperature unit symbol
    #[must_use]
    pub const fn temperature_symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    /// Wind speed unit symbol
    #[must_use]
    pub const fn wind_speed_symbol(&self) -> &'static str {
        match self {
            Self::Metric => "km/h",
            Self::Imperial => "mph",
        }
    }

    /// Precipitation unit symbol
    #[must_use]
    pub const fn precipitation_symbol(&self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "metric"),
            Self::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Ok(Self::Metric),
            "imperial" | "us" => Ok(Self::Imperial),
            _ => Err(DomainError::ValidationError(format!(
                "Invalid unit system: {s}. Use 'metric' or 'imperial'"
            ))),
        }
    }
}
