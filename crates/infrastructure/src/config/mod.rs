//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `polling`: board refresh schedule
//! - `stops`: one entry per departure board
//!
//! The departures API settings reuse [`integration_transit::TransitConfig`]
//! and logging reuses [`crate::telemetry::LoggingConfig`].

mod polling;
mod server;
mod stops;

use std::collections::HashSet;
use std::path::Path;

use integration_transit::TransitConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::LoggingConfig;

pub use polling::PollingConfig;
pub use server::ServerConfig;
pub use stops::{IdList, StopConfig};

/// Prefix of environment variable overrides (e.g. `BERLIN_TRANSPORT_SERVER__PORT`)
pub const ENV_PREFIX: &str = "BERLIN_TRANSPORT";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Departures API configuration
    #[serde(default)]
    pub transit: TransitConfig,

    /// Refresh schedule
    #[serde(default)]
    pub polling: PollingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Departure boards
    #[serde(default)]
    pub stops: Vec<StopConfig>,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml` in the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from environment and the given file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file
            .add_source(file)
            // Override with environment variables (e.g., BERLIN_TRANSPORT_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a section is invalid or two boards share the same
    /// stop id and name.
    pub fn validate(&self) -> Result<(), String> {
        self.transit.validate()?;

        if self.polling.interval_secs == 0 {
            return Err("polling.interval_secs must be greater than 0".to_string());
        }

        let mut seen = HashSet::new();
        for stop in &self.stops {
            stop.validate()?;
            let key = (stop.stop_id.trim(), stop.name.as_deref().unwrap_or_default());
            if !seen.insert(key) {
                return Err(format!(
                    "stops: duplicate board for stop_id {} with the same name",
                    stop.stop_id
                ));
            }
        }

        Ok(())
    }
}
