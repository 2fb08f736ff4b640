//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod location_query;
mod place;
mod unit_system;
mod weather_condition;

pub use geo_location::GeoLocation;
pub use location_query::LocationQuery;
pub use place::Place;
pub use unit_system::UnitSystem;
pub use weather_condition::WeatherCondition;
