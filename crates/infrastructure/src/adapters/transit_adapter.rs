//! Transit adapter - Implements the departure ports using integration_transit

use application::error::ApplicationError;
use application::ports::{DeparturePort, StopSearchPort};
use async_trait::async_trait;
use domain::{Departure, DepartureQuery, Stop};
use integration_transit::{HafasTransitClient, TransitClient, TransitConfig, TransitError};
use tracing::{debug, instrument};

/// Adapter for the departures API using HAFAS (transport.rest)
pub struct TransitAdapter {
    transit_client: HafasTransitClient,
}

impl std::fmt::Debug for TransitAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAdapter")
            .field("transit_client", &"HafasTransitClient")
            .finish()
    }
}

impl TransitAdapter {
    /// Create a new transit adapter
    pub const fn new(transit_client: HafasTransitClient) -> Self {
        Self { transit_client }
    }

    /// Create an adapter with a client built from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn from_config(config: &TransitConfig) -> Result<Self, ApplicationError> {
        HafasTransitClient::new(config)
            .map(Self::new)
            .map_err(Self::map_error)
    }

    /// Convert an integration error to its application-layer counterpart
    fn map_error(error: TransitError) -> ApplicationError {
        match error {
            TransitError::ParseError(msg) => ApplicationError::MalformedResponse(msg),
            TransitError::InvalidRecord(msg) => ApplicationError::InvalidRecord(msg),
            TransitError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            TransitError::InvalidQuery(msg) => ApplicationError::InvalidInput(msg),
            TransitError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            e @ (TransitError::ConnectionFailed(_)
            | TransitError::RequestFailed(_)
            | TransitError::Timeout { .. }) => {
                ApplicationError::ExternalService(format!("Departure request failed: {e}"))
            },
        }
    }
}

#[async_trait]
impl DeparturePort for TransitAdapter {
    #[instrument(skip(self, query), fields(stop_id = %query.stop_id))]
    async fn fetch_departures(
        &self,
        query: &DepartureQuery,
    ) -> Result<Vec<Departure>, ApplicationError> {
        let departures = self
            .transit_client
            .fetch_departures(query)
            .await
            .map_err(Self::map_error)?;

        debug!(count = departures.len(), "Departures received from transit client");
        Ok(departures)
    }

    async fn is_available(&self) -> bool {
        self.transit_client.is_healthy().await
    }
}

#[async_trait]
impl StopSearchPort for TransitAdapter {
    #[instrument(skip(self))]
    async fn search_stops(
        &self,
        query: &str,
        max_results: u8,
    ) -> Result<Vec<Stop>, ApplicationError> {
        self.transit_client
            .search_stops(query, max_results)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_error() {
        assert!(matches!(
            TransitAdapter::map_error(TransitError::ParseError("eof".into())),
            ApplicationError::MalformedResponse(_)
        ));
        assert!(matches!(
            TransitAdapter::map_error(TransitError::InvalidRecord("no when".into())),
            ApplicationError::InvalidRecord(_)
        ));
        assert!(matches!(
            TransitAdapter::map_error(TransitError::Timeout { timeout_secs: 30 }),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            TransitAdapter::map_error(TransitError::RateLimitExceeded {
                retry_after_secs: None
            }),
            ApplicationError::RateLimited
        ));
        assert!(matches!(
            TransitAdapter::map_error(TransitError::InvalidQuery("empty".into())),
            ApplicationError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_data_failures_stay_data_failures() {
        for error in [
            TransitError::ParseError("eof".into()),
            TransitError::InvalidRecord("no tripId".into()),
        ] {
            assert!(error.is_data_failure());
            assert!(TransitAdapter::map_error(error).is_data_failure());
        }
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let config = TransitConfig {
            base_url: String::new(),
            ..TransitConfig::default()
        };
        assert!(matches!(
            TransitAdapter::from_config(&config),
            Err(ApplicationError::Configuration(_))
        ));
    }
}
