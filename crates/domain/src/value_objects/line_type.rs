//! Transport product value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport product category of a line
///
/// Mirrors the `line.product` codes reported by the VBB HAFAS API.
/// Any product code outside the known set maps to [`LineType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// S-Bahn
    Suburban,
    /// U-Bahn
    Subway,
    /// Tram / Straßenbahn
    Tram,
    /// Bus
    Bus,
    /// Ferry
    Ferry,
    /// Long-distance trains (ICE / IC / EC)
    Express,
    /// Regional trains (RE / RB)
    Regional,
    /// Product code not known to the catalog
    Unknown,
}

impl LineType {
    /// All known product categories, in the order the API lists its filter flags
    pub const KNOWN: [Self; 7] = [
        Self::Suburban,
        Self::Subway,
        Self::Tram,
        Self::Bus,
        Self::Ferry,
        Self::Express,
        Self::Regional,
    ];

    /// Map an API product code to a line type
    #[must_use]
    pub fn from_product(product: &str) -> Self {
        match product {
            "suburban" => Self::Suburban,
            "subway" => Self::Subway,
            "tram" => Self::Tram,
            "bus" => Self::Bus,
            "ferry" => Self::Ferry,
            "express" => Self::Express,
            "regional" => Self::Regional,
            _ => Self::Unknown,
        }
    }

    /// The API product code (also used as query flag name)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Suburban => "suburban",
            Self::Subway => "subway",
            Self::Tram => "tram",
            Self::Bus => "bus",
            Self::Ferry => "ferry",
            Self::Express => "express",
            Self::Regional => "regional",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
