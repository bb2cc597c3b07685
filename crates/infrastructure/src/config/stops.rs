//! Per-stop board configuration (`[[stops]]`).

use application::{BoardSettings, split_list};
use domain::TransportTypes;
use serde::{Deserialize, Serialize};

use super::default_true;

/// A list of stop ids, written either as `"a,b"` or as `["a", "b"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdList {
    /// Comma-separated ids
    Csv(String),
    /// One id per entry
    List(Vec<String>),
}

impl Default for IdList {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl IdList {
    /// Trimmed, non-empty ids
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        match self {
            Self::Csv(raw) => split_list(raw),
            Self::List(ids) => ids
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// One departure board
#[allow(clippy::struct_excessive_bools)] // One flag per product and toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopConfig {
    /// Stop to query (e.g. "900100003")
    pub stop_id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Comma-separated destination stop ids (absent = all directions)
    #[serde(default)]
    pub direction: Option<String>,

    /// Time window in minutes
    #[serde(default)]
    pub duration: Option<u32>,

    /// Minutes needed to walk to the stop (default: 1)
    #[serde(default = "default_walking_time")]
    pub walking_time: u32,

    /// Include S-Bahn departures (default: true)
    #[serde(default = "default_true")]
    pub suburban: bool,

    /// Include U-Bahn departures (default: true)
    #[serde(default = "default_true")]
    pub subway: bool,

    /// Include tram departures (default: true)
    #[serde(default = "default_true")]
    pub tram: bool,

    /// Include bus departures (default: true)
    #[serde(default = "default_true")]
    pub bus: bool,

    /// Include ferry departures (default: true)
    #[serde(default = "default_true")]
    pub ferry: bool,

    /// Include long-distance departures (default: true)
    #[serde(default = "default_true")]
    pub express: bool,

    /// Include regional train departures (default: true)
    #[serde(default = "default_true")]
    pub regional: bool,

    /// Prefer official line colors over product colors (default: false)
    #[serde(default)]
    pub show_api_line_colors: bool,

    /// Departures from these (sub-)stop ids are dropped
    #[serde(default)]
    pub excluded_stops: IdList,

    /// Drop clockwise Ringbahn departures (default: false)
    #[serde(default)]
    pub exclude_ringbahn_clockwise: bool,

    /// Drop counterclockwise Ringbahn departures (default: false)
    #[serde(default)]
    pub exclude_ringbahn_counterclockwise: bool,
}

const fn default_walking_time() -> u32 {
    1
}

impl StopConfig {
    /// Configuration with defaults for a stop
    #[must_use]
    pub fn new(stop_id: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            name: None,
            direction: None,
            duration: None,
            walking_time: default_walking_time(),
            suburban: true,
            subway: true,
            tram: true,
            bus: true,
            ferry: true,
            express: true,
            regional: true,
            show_api_line_colors: false,
            excluded_stops: IdList::default(),
            exclude_ringbahn_clockwise: false,
            exclude_ringbahn_counterclockwise: false,
        }
    }

    /// Selected transport products
    #[must_use]
    pub const fn transport_types(&self) -> TransportTypes {
        TransportTypes {
            suburban: self.suburban,
            subway: self.subway,
            tram: self.tram,
            bus: self.bus,
            ferry: self.ferry,
            express: self.express,
            regional: self.regional,
        }
    }

    /// Convert to the board settings the application layer works with
    #[must_use]
    pub fn to_board_settings(&self) -> BoardSettings {
        BoardSettings {
            stop_id: self.stop_id.trim().to_string(),
            name: self.name.clone().filter(|n| !n.trim().is_empty()),
            direction: self.direction.clone(),
            duration: self.duration,
            walking_time: self.walking_time,
            transport_types: self.transport_types(),
            show_api_line_colors: self.show_api_line_colors,
            excluded_stops: self.excluded_stops.ids(),
            exclude_ringbahn_clockwise: self.exclude_ringbahn_clockwise,
            exclude_ringbahn_counterclockwise: self.exclude_ringbahn_counterclockwise,
        }
    }

    /// Validate the stop entry
    ///
    /// # Errors
    ///
    /// Returns an error if the stop id is empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.stop_id.trim().is_empty() {
            return Err("stops: stop_id must not be empty".to_string());
        }
        Ok(())
    }
}
