//! Forecast service
//!
//! Resolves what the user typed into a place and fetches its weather.

use std::{fmt, sync::Arc};

use domain::{LocationQuery, MAX_FORECAST_DAYS, Place, UnitSystem};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{CurrentWeather, DailyForecast, GeocodingPort, WeatherPort},
};

/// Candidates requested from geocoding when resolving a name
const DEFAULT_CANDIDATE_LIMIT: u8 = 10;

/// Weather for a resolved place
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    /// Place the weather is for
    pub place: Place,
    /// Unit system of all numeric values
    pub units: UnitSystem,
    /// IANA timezone of the place, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Timezone abbreviation, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_abbreviation: Option<String>,
    /// Current conditions
    pub current: CurrentWeather,
    /// Daily forecast; empty for current-conditions reports
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub daily: Vec<DailyForecast>,
}

/// Forecast service coordinating geocoding and weather lookups
pub struct ForecastService {
    weather: Arc<dyn WeatherPort>,
    geocoding: Arc<dyn GeocodingPort>,
    units: UnitSystem,
    default_location: Option<String>,
    candidate_limit: u8,
}

impl fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastService")
            .field("units", &self.units)
            .field("default_location", &self.default_location)
            .field("candidate_limit", &self.candidate_limit)
            .finish_non_exhaustive()
    }
}

impl ForecastService {
    /// Create a new forecast service using metric units and no default location
    pub fn new(weather: Arc<dyn WeatherPort>, geocoding: Arc<dyn GeocodingPort>) -> Self {
        Self {
            weather,
            geocoding,
            units: UnitSystem::default(),
            default_location: None,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }

    /// Set the unit system
    #[must_use]
    pub const fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    /// Set the location used when a command names none
    #[must_use]
    pub fn with_default_location(mut self, location: Option<String>) -> Self {
        self.default_location = location.filter(|l| !l.trim().is_empty());
        self
    }

    /// Set how many geocoding candidates are considered for a name
    #[must_use]
    pub fn with_candidate_limit(mut self, limit: u8) -> Self {
        self.candidate_limit = limit.max(1);
        self
    }

    /// Resolve a query, or the default location when `query` is absent, to a place
    ///
    /// Coordinates are used as-is. Names are geocoded; with a qualifier
    /// (`"Paris, US"`) the first candidate whose country, country code or
    /// region matches wins, otherwise the best match.
    #[instrument(skip(self))]
    pub async fn resolve_place(&self, query: Option<&str>) -> Result<Place, ApplicationError> {
        let raw = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => q,
            None => self
                .default_location
                .as_deref()
                .ok_or(ApplicationError::NoLocation)?,
        };

        match LocationQuery::parse(raw)? {
            LocationQuery::Coordinates(location) => {
                debug!(%location, "Using explicit coordinates");
                Ok(Place::from_coordinates(location))
            },
            LocationQuery::Name { name, qualifier } => {
                let candidates = self.geocoding.search(&name, self.candidate_limit).await?;
                debug!(%name, candidates = candidates.len(), "Geocoding candidates");

                let chosen = match qualifier.as_deref() {
                    Some(q) => candidates.into_iter().find(|p| p.matches_qualifier(q)),
                    None => candidates.into_iter().next(),
                };

                let place =
                    chosen.ok_or_else(|| ApplicationError::LocationNotFound(raw.to_string()))?;
                info!(place = %place.display_name(), location = %place.location, "Resolved location");
                Ok(place)
            },
        }
    }

    /// Current conditions for a place
    #[instrument(skip(self))]
    pub async fn current(&self, query: Option<&str>) -> Result<WeatherReport, ApplicationError> {
        let place = self.resolve_place(query).await?;
        let current = self
            .weather
            .get_current_weather(&place.location, self.units)
            .await?;

        Ok(WeatherReport {
            timezone: place.timezone.clone(),
            timezone_abbreviation: None,
            place,
            units: self.units,
            current,
            daily: Vec::new(),
        })
    }

    /// Current conditions and a `days`-day forecast for a place
    #[instrument(skip(self))]
    pub async fn forecast(
        &self,
        query: Option<&str>,
        days: u8,
    ) -> Result<WeatherReport, ApplicationError> {
        if !(1..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(ApplicationError::InvalidInput(format!(
                "days must be between 1 and {MAX_FORECAST_DAYS}, got {days}"
            )));
        }

        let place = self.resolve_place(query).await?;
        let forecast = self
            .weather
            .get_forecast(&place.location, days, self.units)
            .await?;
        debug!(days = forecast.daily.len(), "Received forecast");

        let timezone = Some(forecast.timezone)
            .filter(|tz| !tz.is_empty())
            .or_else(|| place.timezone.clone());
        let timezone_abbreviation =
            Some(forecast.timezone_abbreviation).filter(|tz| !tz.is_empty());

        Ok(WeatherReport {
            place,
            units: self.units,
            timezone,
            timezone_abbreviation,
            current: forecast.current,
            daily: forecast.daily,
        })
    }

    /// Candidate places for a name, best matches first
    #[instrument(skip(self))]
    pub async fn search(&self, name: &str, limit: u8) -> Result<Vec<Place>, ApplicationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "search text must not be empty".to_string(),
            ));
        }
        self.geocoding.search(name, limit.max(1)).await
    }
}
