//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// A geographic location with latitude and longitude
///
/// # Examples
///
/// ```
/// use domain::value_objects::GeoLocation;
///
/// let berlin = GeoLocation::new(52.52, 13.405).expect("valid coordinates");
/// assert_eq!(berlin.to_string(), "52.52, 13.405");
///
/// let parsed: GeoLocation = "52.52,13.405".parse().expect("valid pair");
/// assert_eq!(parsed, berlin);
///
/// assert!(GeoLocation::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoLocation {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = DomainError;

    fn try_from(raw: RawGeoLocation) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in
    /// [-90, 90] or longitude is not in [-180, 180]. NaN is rejected.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Round to four decimals (~11 m) and drop trailing zeros
fn format_coordinate(value: f64) -> String {
    let rounded = format!("{value:.4}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}",
            format_coordinate(self.latitude),
            format_coordinate(self.longitude)
        )
    }
}

impl FromStr for GeoLocation {
    type Err = DomainError;

    /// Parse a `"lat,lon"` pair; whitespace around either number is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or_else(|| {
            DomainError::InvalidLocationQuery(format!("expected \"lat,lon\", got \"{s}\""))
        })?;

        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                DomainError::InvalidLocationQuery(format!("\"{}\" is not a number", part.trim()))
            })
        };

        Self::new(parse(lat)?, parse(lon)?)
    }
}
