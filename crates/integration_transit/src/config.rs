//! Transit service configuration

use serde::{Deserialize, Serialize};

/// What to do with a departure record that cannot be normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    /// Fail the whole request (the stop shows no departures for this cycle)
    #[default]
    Abort,
    /// Drop the record, log a warning, keep the rest
    Skip,
}

/// Configuration for the departures API (transport.rest / VBB HAFAS)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL for the transport.rest API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of results per request
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// Response cache TTL in seconds (0 to disable caching)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Handling of records without a usable trip id or timestamp
    #[serde(default)]
    pub on_invalid_record: InvalidRecordPolicy,
}

fn default_base_url() -> String {
    "https://v6.vbb.transport.rest".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_results() -> u8 {
    15
}

const fn default_cache_ttl_secs() -> u64 {
    60
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            cache_ttl_secs: default_cache_ttl_secs(),
            on_invalid_record: InvalidRecordPolicy::default(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_secs: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_secs > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        Ok(())
    }
}
