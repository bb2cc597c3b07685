//! Departure feed ports
//!
//! Define how the application reads departures and looks up stops.
//! Adapters in the infrastructure layer implement these ports on top of the
//! transport.rest client.

use async_trait::async_trait;
use domain::{Departure, DepartureQuery, Stop};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching the departures of one stop in one direction
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeparturePort: Send + Sync {
    /// Fetch normalized departures for a single query
    ///
    /// Records from excluded stops are already dropped by the adapter.
    async fn fetch_departures(
        &self,
        query: &DepartureQuery,
    ) -> Result<Vec<Departure>, ApplicationError>;

    /// Check if the departure service is available
    async fn is_available(&self) -> bool;
}

/// Port for looking up stops by name
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StopSearchPort: Send + Sync {
    /// Search stops whose name matches `query`
    async fn search_stops(
        &self,
        query: &str,
        max_results: u8,
    ) -> Result<Vec<Stop>, ApplicationError>;
}
