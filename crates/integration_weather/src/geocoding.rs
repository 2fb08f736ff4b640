//! Open-Meteo geocoding client
//!
//! Resolves place names to coordinates using the
//! [Open-Meteo Geocoding API](https://open-meteo.com/en/docs/geocoding-api).

use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoLocation, Place};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiErrorBody, GeocodingResponse, GeocodingResult};

/// Configuration for the geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Language for place names (ISO 639-1)
    #[serde(default = "default_language")]
    pub language: String,

    /// Number of candidates requested when resolving a name
    #[serde(default = "default_max_results")]
    pub max_results: u8,
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_max_results() -> u8 {
    10
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            language: default_language(),
            max_results: default_max_results(),
        }
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// HTTP client could not be built
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Search text was empty
    #[error("Invalid geocoding query: {0}")]
    InvalidQuery(String),

    /// Service is temporarily unavailable
    #[error("Geocoding service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search places by name, best matches first
    async fn search(&self, name: &str, limit: u8) -> Result<Vec<Place>, GeocodingError>;
}

/// Open-Meteo geocoding client
#[derive(Debug)]
pub struct OpenMeteoGeocodingClient {
    client: Client,
    config: GeocodingConfig,
}

impl OpenMeteoGeocodingClient {
    /// Create a new geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("whetherman/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Convert an API match into a domain place
    fn to_place(result: GeocodingResult) -> Option<Place> {
        let location = match GeoLocation::new(result.latitude, result.longitude) {
            Ok(location) => location,
            Err(e) => {
                warn!(name = %result.name, error = %e, "Skipping geocoding result");
                return None;
            },
        };

        Some(Place {
            name: result.name,
            region: result.admin1.filter(|s| !s.is_empty()),
            country: result.country.filter(|s| !s.is_empty()),
            country_code: result.country_code.filter(|s| !s.is_empty()),
            location,
            timezone: result.timezone.filter(|s| !s.is_empty()),
            elevation: result.elevation,
        })
    }
}

#[async_trait]
impl GeocodingClient for OpenMeteoGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, name: &str, limit: u8) -> Result<Vec<Place>, GeocodingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GeocodingError::InvalidQuery(
                "Place name must not be empty".to_string(),
            ));
        }

        // The API accepts 1..=100 results per request
        let count = limit.clamp(1, 100);
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let params = [
            ("name", name.to_string()),
            ("count", count.to_string()),
            ("language", self.config.language.clone()),
            ("format", "json".to_string()),
        ];

        debug!(%name, count, "Geocoding place name");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(GeocodingError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodingError::RequestFailed(ApiErrorBody::describe(
                status, &body,
            )));
        }

        let body: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let places: Vec<Place> = body
            .results
            .into_iter()
            .filter_map(Self::to_place)
            .collect();

        debug!(%name, matches = places.len(), "Geocoded place name");
        Ok(places)
    }
}
