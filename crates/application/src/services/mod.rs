//! Application services - Use case implementations

mod forecast_formatter;
mod forecast_service;

pub use forecast_formatter::{
    FormatOptions, OutputFormat, compass_direction, format_current, format_forecast,
    format_places,
};
pub use forecast_service::{ForecastService, WeatherReport};
