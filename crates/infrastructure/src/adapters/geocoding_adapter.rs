//! Geocoding adapter - Implements GeocodingPort using the Open-Meteo geocoding API

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::Place;
use integration_weather::{
    GeocodingClient, GeocodingConfig, GeocodingError, OpenMeteoGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter resolving place names through Open-Meteo
pub struct GeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"dyn GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: GeocodingConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    pub fn with_client(client: impl GeocodingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::RequestFailed(e) => ApplicationError::ExternalService(e),
            GeocodingError::ServiceUnavailable(e) => {
                ApplicationError::ExternalService(format!("Geocoding service unavailable: {e}"))
            },
            GeocodingError::Timeout => {
                ApplicationError::ExternalService("Geocoding service timed out".into())
            },
            GeocodingError::ConnectionFailed(e) | GeocodingError::ParseError(e) => {
                ApplicationError::Internal(e)
            },
            GeocodingError::InvalidQuery(e) => ApplicationError::InvalidInput(e),
            GeocodingError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, name: &str, limit: u8) -> Result<Vec<Place>, ApplicationError> {
        let places = self
            .client
            .search(name, limit)
            .await
            .map_err(Self::map_error)?;
        debug!(matches = places.len(), "Geocoding finished");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use domain::GeoLocation;

    use super::*;

    struct StaticClient(Result<Vec<Place>, fn() -> GeocodingError>);

    #[async_trait]
    impl GeocodingClient for StaticClient {
        async fn search(&self, _name: &str, _limit: u8) -> Result<Vec<Place>, GeocodingError> {
            match &self.0 {
                Ok(places) => Ok(places.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    #[test]
    fn with_config_creates_adapter() {
        let adapter = GeocodingAdapter::with_config(GeocodingConfig::default()).unwrap();
        assert!(format!("{adapter:?}").contains("GeocodingAdapter"));
    }

    #[test]
    fn map_error_variants() {
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::InvalidQuery("empty".into())),
            ApplicationError::InvalidInput(_)
        ));
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::RateLimitExceeded),
            ApplicationError::RateLimited
        ));
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::ServiceUnavailable("HTTP 502".into())),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::ParseError("bad".into())),
            ApplicationError::Internal(_)
        ));
    }

    #[tokio::test]
    async fn search_passes_places_through() {
        let berlin = Place::new("Berlin", GeoLocation::new(52.52, 13.41).unwrap());
        let adapter = GeocodingAdapter::with_client(StaticClient(Ok(vec![berlin.clone()])));

        let places = adapter.search("Berlin", 5).await.unwrap();
        assert_eq!(places, vec![berlin]);
    }

    #[tokio::test]
    async fn search_maps_client_errors() {
        let adapter =
            GeocodingAdapter::with_client(StaticClient(Err(|| GeocodingError::Timeout)));
        let err = adapter.search("Berlin", 5).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }
}
