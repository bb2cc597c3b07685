//! Stop query value object

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::TransportTypes;

/// Offset always added to the query time so just-missed departures are hidden
pub const MIN_WALKING_OFFSET_MINUTES: u32 = 1;

/// Parameters of one departures request for one stop and one direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureQuery {
    /// Stop to query
    pub stop_id: String,
    /// Only departures heading to this stop id (`None` = all directions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Time window in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Minutes needed to walk to the stop
    pub walking_time: u32,
    /// Products to request
    pub transport_types: TransportTypes,
    /// Departures from these (sub-)stop ids are dropped
    #[serde(default)]
    pub excluded_stops: Vec<String>,
}

impl DepartureQuery {
    /// Query all directions of a stop with default settings
    #[must_use]
    pub fn new(stop_id: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            direction: None,
            duration: None,
            walking_time: MIN_WALKING_OFFSET_MINUTES,
            transport_types: TransportTypes::all(),
            excluded_stops: Vec::new(),
        }
    }

    /// Same query restricted to one direction
    #[must_use]
    pub fn with_direction(mut self, direction: Option<String>) -> Self {
        self.direction = direction;
        self
    }

    /// Minutes added to "now" for the query time, never below one minute
    #[must_use]
    pub fn offset_minutes(&self) -> u32 {
        self.walking_time.max(MIN_WALKING_OFFSET_MINUTES)
    }

    /// Earliest departure time to ask the API for
    #[must_use]
    pub fn departure_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::minutes(i64::from(self.offset_minutes()))
    }

    /// Whether departures from a (sub-)stop are excluded
    #[must_use]
    pub fn excludes_stop(&self, stop_id: &str) -> bool {
        self.excluded_stops.iter().any(|id| id == stop_id)
    }
}
