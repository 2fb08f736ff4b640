//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Location query could not be interpreted
    #[error("Invalid location: {0}")]
    InvalidLocationQuery(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
