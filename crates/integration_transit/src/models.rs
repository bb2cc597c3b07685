//! Raw transport.rest response models
//!
//! Every field is optional so that a single malformed departure surfaces as a
//! normalization error for that record instead of failing the whole envelope.

use serde::Deserialize;

/// Body of `GET /stops/{id}/departures`
///
/// v6 wraps the records in an object, v5 returned a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawDeparturesEnvelope {
    /// `{ "departures": [...], "realtimeDataUpdatedAt": ... }`
    Wrapped {
        /// Departure records
        departures: Vec<RawDeparture>,
    },
    /// `[...]`
    Bare(Vec<RawDeparture>),
}

impl RawDeparturesEnvelope {
    /// Unwrap the departure records
    #[must_use]
    pub fn into_departures(self) -> Vec<RawDeparture> {
        match self {
            Self::Wrapped { departures } | Self::Bare(departures) => departures,
        }
    }
}

/// One departure record as reported by the API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeparture {
    /// Trip identifier
    pub trip_id: Option<String>,
    /// Stop (or platform) the departure leaves from
    pub stop: Option<RawStopRef>,
    /// Realtime departure instant (ISO-8601)
    pub when: Option<String>,
    /// Scheduled departure instant (ISO-8601)
    pub planned_when: Option<String>,
    /// Delay in seconds
    pub delay: Option<i64>,
    /// Destination label
    pub direction: Option<String>,
    /// Line served by the trip
    pub line: Option<RawLine>,
    /// Current vehicle position
    pub current_trip_position: Option<RawPosition>,
    /// Whether the trip was cancelled
    pub cancelled: Option<bool>,
}

impl RawDeparture {
    /// Id of the stop the record belongs to
    #[must_use]
    pub fn stop_id(&self) -> Option<&str> {
        self.stop.as_ref().and_then(|s| s.id.as_deref())
    }
}

/// Stop reference embedded in a departure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStopRef {
    /// Stop id
    pub id: Option<String>,
    /// Stop name
    pub name: Option<String>,
}

/// Line description embedded in a departure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLine {
    /// Line label (e.g. "S42")
    pub name: Option<String>,
    /// Product code (e.g. "suburban")
    pub product: Option<String>,
    /// Official line colors, only present on some endpoints
    pub color: Option<RawLineColor>,
}

/// Line color pair
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLineColor {
    /// Foreground color
    pub fg: Option<String>,
    /// Background color
    pub bg: Option<String>,
}

/// Vehicle position
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawPosition {
    /// Latitude
    pub latitude: Option<f64>,
    /// Longitude
    pub longitude: Option<f64>,
}

/// One entry of `GET /locations`
#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    /// `"stop"`, `"station"`, `"location"`, ...
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Location id
    pub id: Option<String>,
    /// Location name
    pub name: Option<String>,
}
