//! Enabled transport product selection

use serde::{Deserialize, Serialize};

use super::LineType;

/// Which transport products a stop query should return
///
/// Every product is enabled by default.
#[allow(clippy::struct_excessive_bools)] // One flag per API product filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportTypes {
    /// Include S-Bahn departures
    #[serde(default = "default_true")]
    pub suburban: bool,
    /// Include U-Bahn departures
    #[serde(default = "default_true")]
    pub subway: bool,
    /// Include tram departures
    #[serde(default = "default_true")]
    pub tram: bool,
    /// Include bus departures
    #[serde(default = "default_true")]
    pub bus: bool,
    /// Include ferry departures
    #[serde(default = "default_true")]
    pub ferry: bool,
    /// Include long-distance departures
    #[serde(default = "default_true")]
    pub express: bool,
    /// Include regional train departures
    #[serde(default = "default_true")]
    pub regional: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for TransportTypes {
    fn default() -> Self {
        Self::all()
    }
}

impl TransportTypes {
    /// Every product enabled
    #[must_use]
    pub const fn all() -> Self {
        Self {
            suburban: true,
            subway: true,
            tram: true,
            bus: true,
            ferry: true,
            express: true,
            regional: true,
        }
    }

    /// Only the given products enabled
    #[must_use]
    pub fn only(line_types: &[LineType]) -> Self {
        let mut selection = Self {
            suburban: false,
            subway: false,
            tram: false,
            bus: false,
            ferry: false,
            express: false,
            regional: false,
        };
        for line_type in line_types {
            selection.set(*line_type, true);
        }
        selection
    }

    /// Whether a product is enabled (unknown products never are)
    #[must_use]
    pub const fn is_enabled(&self, line_type: LineType) -> bool {
        match line_type {
            LineType::Suburban => self.suburban,
            LineType::Subway => self.subway,
            LineType::Tram => self.tram,
            LineType::Bus => self.bus,
            LineType::Ferry => self.ferry,
            LineType::Express => self.express,
            LineType::Regional => self.regional,
            LineType::Unknown => false,
        }
    }

    /// Enable or disable a product
    pub fn set(&mut self, line_type: LineType, enabled: bool) {
        match line_type {
            LineType::Suburban => self.suburban = enabled,
            LineType::Subway => self.subway = enabled,
            LineType::Tram => self.tram = enabled,
            LineType::Bus => self.bus = enabled,
            LineType::Ferry => self.ferry = enabled,
            LineType::Express => self.express = enabled,
            LineType::Regional => self.regional = enabled,
            LineType::Unknown => {},
        }
    }

    /// One `(flag, enabled)` pair per known product, as sent to the API
    #[must_use]
    pub fn query_flags(&self) -> Vec<(&'static str, bool)> {
        LineType::KNOWN
            .iter()
            .map(|line_type| (line_type.as_str(), self.is_enabled(*line_type)))
            .collect()
    }
}
