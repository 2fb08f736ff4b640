//! Ports - Interfaces to external services (Hexagonal Architecture)

mod geocoding_port;
mod weather_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::{CurrentWeather, DailyForecast, Forecast, WeatherPort};
