//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::{CurrentWeather, DailyForecast, Forecast, WeatherPort};
use async_trait::async_trait;
use domain::{GeoLocation, UnitSystem};
use integration_weather::{
    CurrentWeather as IntegrationCurrent, DailyForecast as IntegrationDaily,
    Forecast as IntegrationForecast, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for weather services using Open-Meteo API
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"dyn WeatherClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    pub fn with_client(client: impl WeatherClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::RequestFailed(e) => ApplicationError::ExternalService(e),
            WeatherError::ServiceUnavailable(e) => {
                ApplicationError::ExternalService(format!("Weather service unavailable: {e}"))
            },
            WeatherError::Timeout => {
                ApplicationError::ExternalService("Weather service timed out".into())
            },
            WeatherError::ConnectionFailed(e) | WeatherError::ParseError(e) => {
                ApplicationError::Internal(e)
            },
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidInput("Invalid coordinates".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    /// Convert integration current weather to application current weather
    fn map_current(current: &IntegrationCurrent) -> CurrentWeather {
        CurrentWeather {
            temperature: f64::from(current.temperature),
            apparent_temperature: f64::from(current.apparent_temperature),
            humidity: current.humidity,
            wind_speed: f64::from(current.wind_speed),
            wind_direction: current.wind_direction,
            wind_gusts: f64::from(current.wind_gusts),
            precipitation: f64::from(current.precipitation),
            cloud_cover: current.cloud_cover,
            pressure: f64::from(current.pressure),
            condition: current.condition,
            is_day: current.is_day,
            observed_at: current.time,
        }
    }

    /// Convert integration daily forecast to application daily forecast
    fn map_daily(daily: &IntegrationDaily) -> DailyForecast {
        DailyForecast {
            date: daily.date,
            temperature_max: f64::from(daily.temperature_max),
            temperature_min: f64::from(daily.temperature_min),
            condition: daily.condition,
            precipitation_probability: daily.precipitation_probability,
            precipitation_sum: f64::from(daily.precipitation_sum),
            wind_speed_max: f64::from(daily.wind_speed_max),
            uv_index_max: daily.uv_index_max.map(f64::from),
            sunrise: daily.sunrise,
            sunset: daily.sunset,
        }
    }

    fn map_forecast(forecast: IntegrationForecast) -> Forecast {
        Forecast {
            current: Self::map_current(&forecast.current),
            daily: forecast.daily.iter().map(Self::map_daily).collect(),
            timezone: forecast.timezone,
            timezone_abbreviation: forecast.timezone_abbreviation,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_current_weather(
        &self,
        location: &GeoLocation,
        units: UnitSystem,
    ) -> Result<CurrentWeather, ApplicationError> {
        let result = self
            .client
            .get_current(location.latitude(), location.longitude(), units)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(current) => {
                debug!(
                    temperature = current.temperature,
                    condition = %current.condition,
                    "Retrieved current weather"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current weather");
            },
        }

        result.map(|c| Self::map_current(&c))
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
        units: UnitSystem,
    ) -> Result<Forecast, ApplicationError> {
        let result = self
            .client
            .get_forecast(location.latitude(), location.longitude(), days, units)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(forecast) => {
                debug!(days = forecast.daily.len(), "Retrieved weather forecast");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get weather forecast");
            },
        }

        result.map(Self::map_forecast)
    }
}
