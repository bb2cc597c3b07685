//! HAFAS transit client via transport.rest API
//!
//! Provides stop departures and stop search using the public
//! [v6.vbb.transport.rest](https://v6.vbb.transport.rest) API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{Departure, DepartureQuery, Stop};
use moka::future::Cache;
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::{RawDeparturesEnvelope, RawLocation};
use crate::normalizer;

/// Trait for transit service clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Fetch the departures of one stop for one direction
    async fn fetch_departures(&self, query: &DepartureQuery)
    -> Result<Vec<Departure>, TransitError>;

    /// Search for stops by name
    async fn search_stops(&self, query: &str, max_results: u8) -> Result<Vec<Stop>, TransitError>;

    /// Check if the transit service is reachable
    async fn is_healthy(&self) -> bool;
}

/// HAFAS-based transit client using the transport.rest API
#[derive(Debug)]
pub struct HafasTransitClient {
    client: Client,
    config: TransitConfig,
    cache: Option<Cache<String, String>>,
}

impl HafasTransitClient {
    /// Create a new HAFAS transit client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        config
            .validate()
            .map_err(TransitError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("berlin-transport/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
        })
    }

    /// Fetch departures as seen at `now` (the walking offset is added on top)
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success statuses,
    /// malformed bodies, and invalid records under the abort policy.
    pub async fn fetch_departures_at(
        &self,
        query: &DepartureQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<Departure>, TransitError> {
        if query.stop_id.trim().is_empty() {
            return Err(TransitError::InvalidQuery(
                "Stop id must not be empty".to_string(),
            ));
        }

        let url = self.departures_url(query, now)?;
        debug!(%url, "Fetching departures");

        let body = self.get_cached(url).await?;
        let records = Self::parse_departures_response(&body)?;
        debug!(count = records.len(), stop_id = %query.stop_id, "Departure records received");

        normalizer::normalize_all(records, query, self.config.on_invalid_record)
    }

    /// Build the departures URL with all query parameters
    fn departures_url(
        &self,
        query: &DepartureQuery,
        now: DateTime<Utc>,
    ) -> Result<Url, TransitError> {
        let base = format!(
            "{}/stops/{}/departures",
            self.config.base_url.trim_end_matches('/'),
            query.stop_id.trim()
        );
        Url::parse_with_params(&base, Self::departure_params(query, now, self.config.max_results))
            .map_err(|e| TransitError::ConfigurationError(e.to_string()))
    }

    /// Query parameters of a departures request
    fn departure_params(
        query: &DepartureQuery,
        now: DateTime<Utc>,
        max_results: u8,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (
                "when",
                query
                    .departure_time(now)
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("results", max_results.to_string()),
        ];

        if let Some(direction) = query.direction.as_deref().filter(|d| !d.is_empty()) {
            params.push(("direction", direction.to_string()));
        }

        if let Some(duration) = query.duration {
            params.push(("duration", duration.to_string()));
        }

        for (flag, enabled) in query.transport_types.query_flags() {
            params.push((flag, bool_str(enabled).to_string()));
        }

        params
    }

    /// Issue a GET request, serving successful bodies from the cache when enabled
    async fn get_cached(&self, url: Url) -> Result<String, TransitError> {
        let key = url.to_string();
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(&key).await {
                debug!(%key, "Transit cache hit");
                return Ok(body);
            }
        }

        let body = self.get(url).await?;

        if let Some(cache) = &self.cache {
            cache.insert(key, body.clone()).await;
        }
        Ok(body)
    }

    /// Issue a GET request and return the body of a successful response
    async fn get(&self, url: Url) -> Result<String, TransitError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                TransitError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                TransitError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransitError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                TransitError::ConnectionFailed(e.to_string())
            }
        })
    }

    /// Parse the departures envelope
    fn parse_departures_response(
        body: &str,
    ) -> Result<Vec<crate::models::RawDeparture>, TransitError> {
        let envelope: RawDeparturesEnvelope =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;
        Ok(envelope.into_departures())
    }

    /// Parse the locations response, keeping only stops
    fn parse_locations_response(body: &str) -> Result<Vec<Stop>, TransitError> {
        let raw: Vec<RawLocation> =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;

        Ok(raw
            .into_iter()
            .filter(|loc| loc.kind.as_deref() == Some("stop"))
            .filter_map(|loc| match (loc.id, loc.name) {
                (Some(id), Some(name)) => Some(Stop::new(id, name)),
                _ => None,
            })
            .collect())
    }
}

#[async_trait]
impl TransitClient for HafasTransitClient {
    #[instrument(skip(self, query), fields(stop_id = %query.stop_id, direction = ?query.direction))]
    async fn fetch_departures(
        &self,
        query: &DepartureQuery,
    ) -> Result<Vec<Departure>, TransitError> {
        self.fetch_departures_at(query, Utc::now()).await
    }

    #[instrument(skip(self))]
    async fn search_stops(&self, query: &str, max_results: u8) -> Result<Vec<Stop>, TransitError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TransitError::InvalidQuery(
                "Search query must not be empty".to_string(),
            ));
        }

        let base = format!("{}/locations", self.config.base_url.trim_end_matches('/'));
        let url = Url::parse_with_params(
            &base,
            [
                ("query", query.to_string()),
                ("results", max_results.to_string()),
            ],
        )
        .map_err(|e| TransitError::ConfigurationError(e.to_string()))?;

        debug!(%url, "Searching stops by name");

        let body = self.get_cached(url).await?;
        let stops = Self::parse_locations_response(&body)?;

        if stops.is_empty() {
            warn!(%query, "No stops found");
        }
        Ok(stops)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!(
            "{}/locations?query=test&results=1",
            self.config.base_url.trim_end_matches('/')
        );
        self.client
            .get(&url)
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }
}

/// Convert bool to "true"/"false" str for query params
const fn bool_str(val: bool) -> &'static str {
    if val { "true" } else { "false" }
}
