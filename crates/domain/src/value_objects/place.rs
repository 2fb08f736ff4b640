//! Resolved place a forecast is requested for

use serde::{Deserialize, Serialize};

use super::GeoLocation;

/// A named location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Place name (city, town, landmark)
    pub name: String,
    /// First-level administrative region (state, province)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Country name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Coordinates
    pub location: GeoLocation,
    /// IANA timezone name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Elevation in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl Place {
    /// Create a place with only a name and coordinates
    pub fn new(name: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            name: name.into(),
            region: None,
            country: None,
            country_code: None,
            location,
            timezone: None,
            elevation: None,
        }
    }

    /// A place for raw coordinates, named after them
    #[must_use]
    pub fn from_coordinates(location: GeoLocation) -> Self {
        Self::new(location.to_string(), location)
    }

    /// Set the region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the country name and code
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>, code: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self.country_code = Some(code.into());
        self
    }

    /// Set the timezone
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Name, region and country joined with commas
    ///
    /// Empty parts and parts repeating the previous one are skipped
    /// (e.g. "Berlin, Berlin, Germany" becomes "Berlin, Germany").
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        for part in [
            Some(self.name.as_str()),
            self.region.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            let part = part.trim();
            if part.is_empty() || parts.iter().any(|p| p.eq_ignore_ascii_case(part)) {
                continue;
            }
            parts.push(part);
        }
        parts.join(", ")
    }

    /// Whether every comma-separated part of the qualifier names this place's
    /// country, country code or region
    ///
    /// `"Oregon, US"` matches Portland, Oregon, United States.
    #[must_use]
    pub fn matches_qualifier(&self, qualifier: &str) -> bool {
        let known = [
            self.country.as_deref(),
            self.country_code.as_deref(),
            self.region.as_deref(),
        ];
        qualifier
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .all(|part| {
                known
                    .iter()
                    .flatten()
                    .any(|candidate| candidate.trim().eq_ignore_ascii_case(part))
            })
    }
}
