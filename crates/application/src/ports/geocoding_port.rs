//! Geocoding port
//!
//! Resolves place names to candidate places with coordinates.

use async_trait::async_trait;
use domain::Place;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for place name lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search places by name, best matches first
    ///
    /// An empty result is not an error.
    async fn search(&self, name: &str, limit: u8) -> Result<Vec<Place>, ApplicationError>;
}
