//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// Geocoding found nothing for the query
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// No location given and none configured
    #[error("No location given and no default_location configured")]
    NoLocation,

    /// Request parameters rejected before contacting any service
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error comes from the user's input rather than a service
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::LocationNotFound(_) | Self::NoLocation | Self::InvalidInput(_)
        )
    }
}
