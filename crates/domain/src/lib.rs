//! Domain layer for whetherman
//!
//! Value objects describing where a forecast is requested for and how it is
//! expressed. This layer performs no I/O.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;

/// Upper bound of forecast days served by the weather API
pub const MAX_FORECAST_DAYS: u8 = 16;
