//! Stop entity - A transit stop found through the locations lookup

use serde::{Deserialize, Serialize};
use std::fmt;

/// A transit stop (station, bus stop, pier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Unique stop identifier (e.g. "900100003")
    pub id: String,
    /// Human-readable stop name
    pub name: String,
}

impl Stop {
    /// Create a new stop
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Selection label shown when choosing a stop, e.g. `"S+U Alexanderplatz [900100003]"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} [{}]", self.name, self.id)
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
