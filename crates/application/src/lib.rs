//! Application layer - Use cases and orchestration
//!
//! Defines the ports the forecast use cases depend on, the service resolving
//! locations and fetching forecasts, and the text rendering of results.

pub mod error;
pub mod ports;
pub mod services;

pub use domain::MAX_FORECAST_DAYS;
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
