//! Refresh schedule configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// How often boards are refreshed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Seconds between two refreshes of the same board
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Refresh every board once before serving
    #[serde(default = "default_true")]
    pub refresh_on_startup: bool,
}

const fn default_interval_secs() -> u64 {
    90
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            refresh_on_startup: true,
        }
    }
}
