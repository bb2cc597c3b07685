//! Vehicle position value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current position of the vehicle serving a departure
///
/// The API only reports a position for trips that are already running.
/// An unknown position is represented as `(0.0, 0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VehiclePosition {
    /// Latitude in degrees
    latitude: f64,
    /// Longitude in degrees
    longitude: f64,
}

impl VehiclePosition {
    /// Create a position from a coordinate pair
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a position from optional coordinates, defaulting each to `0.0`
    #[must_use]
    pub fn from_optional(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self::new(latitude.unwrap_or(0.0), longitude.unwrap_or(0.0))
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether the API reported no position
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// The position as a `(latitude, longitude)` pair
    #[must_use]
    pub const fn as_pair(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl fmt::Display for VehiclePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
