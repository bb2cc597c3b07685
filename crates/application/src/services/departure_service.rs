//! Departure aggregation service
//!
//! Fans a board's direction filter out into one query per direction, contains
//! per-query failures, and merges the results into a single chronological
//! list without Ringbahn orientations the board excludes and without
//! duplicates.

use std::sync::Arc;

use domain::{Departure, DepartureQuery, RingDirection, TransportTypes};
use tracing::{debug, error, instrument, warn};

use crate::ports::DeparturePort;

/// Everything a board needs to know to query and render one stop
#[allow(clippy::struct_excessive_bools)] // Independent display and filter toggles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSettings {
    /// Stop to query
    pub stop_id: String,
    /// Display name (`None` = derived from the stop id)
    pub name: Option<String>,
    /// Comma-separated destination stop ids (`None` = all directions)
    pub direction: Option<String>,
    /// Time window in minutes
    pub duration: Option<u32>,
    /// Minutes needed to walk to the stop
    pub walking_time: u32,
    /// Products to request
    pub transport_types: TransportTypes,
    /// Prefer official line colors over product colors
    pub show_api_line_colors: bool,
    /// Departures from these (sub-)stop ids are dropped
    pub excluded_stops: Vec<String>,
    /// Drop clockwise Ringbahn departures
    pub exclude_ringbahn_clockwise: bool,
    /// Drop counterclockwise Ringbahn departures
    pub exclude_ringbahn_counterclockwise: bool,
}

impl BoardSettings {
    /// Settings with defaults for a stop
    #[must_use]
    pub fn new(stop_id: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            name: None,
            direction: None,
            duration: None,
            walking_time: domain::MIN_WALKING_OFFSET_MINUTES,
            transport_types: TransportTypes::all(),
            show_api_line_colors: false,
            excluded_stops: Vec::new(),
            exclude_ringbahn_clockwise: false,
            exclude_ringbahn_counterclockwise: false,
        }
    }

    /// One entry per query to issue; `None` queries all directions
    #[must_use]
    pub fn directions(&self) -> Vec<Option<String>> {
        match self.direction.as_deref() {
            None => vec![None],
            Some(raw) => {
                let directions = split_list(raw);
                if directions.is_empty() {
                    vec![None]
                } else {
                    directions.into_iter().map(Some).collect()
                }
            },
        }
    }

    /// The stop query for one direction
    #[must_use]
    pub fn query_for(&self, direction: Option<String>) -> DepartureQuery {
        DepartureQuery {
            stop_id: self.stop_id.clone(),
            direction,
            duration: self.duration,
            walking_time: self.walking_time,
            transport_types: self.transport_types,
            excluded_stops: self.excluded_stops.clone(),
        }
    }

    /// Ringbahn orientations whose departures are dropped
    #[must_use]
    pub fn excluded_rings(&self) -> Vec<RingDirection> {
        let mut rings = Vec::with_capacity(2);
        if self.exclude_ringbahn_clockwise {
            rings.push(RingDirection::Clockwise);
        }
        if self.exclude_ringbahn_counterclockwise {
            rings.push(RingDirection::Counterclockwise);
        }
        rings
    }
}

/// Split a comma-separated list, trimming entries and ignoring empty ones
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Remove repeated departures, keeping the first occurrence of each
#[must_use]
pub fn dedup_departures(departures: Vec<Departure>) -> Vec<Departure> {
    let mut unique: Vec<Departure> = Vec::with_capacity(departures.len());
    for departure in departures {
        if !unique.contains(&departure) {
            unique.push(departure);
        }
    }
    unique
}

/// Application service producing a board's departure list
pub struct DepartureService {
    port: Arc<dyn DeparturePort>,
}

impl std::fmt::Debug for DepartureService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepartureService").finish_non_exhaustive()
    }
}

impl DepartureService {
    /// Create a new departure service
    pub fn new(port: Arc<dyn DeparturePort>) -> Self {
        Self { port }
    }

    /// Check if the departure feed is reachable
    pub async fn is_available(&self) -> bool {
        self.port.is_available().await
    }

    /// Run one stop query, degrading every failure to an empty list
    #[instrument(skip(self, query), fields(stop_id = %query.stop_id, direction = ?query.direction))]
    pub async fn fetch_direction(&self, query: &DepartureQuery) -> Vec<Departure> {
        match self.port.fetch_departures(query).await {
            Ok(departures) => {
                debug!(count = departures.len(), "Fetched departures");
                departures
            },
            Err(e) if e.is_data_failure() => {
                error!(error = %e, "Departure response unusable");
                Vec::new()
            },
            Err(e) => {
                warn!(error = %e, "Departure request failed");
                Vec::new()
            },
        }
    }

    /// Fetch, filter, deduplicate and order the departures of one board
    #[instrument(skip(self, settings), fields(stop_id = %settings.stop_id))]
    pub async fn aggregate(&self, settings: &BoardSettings) -> Vec<Departure> {
        let mut departures = Vec::new();
        for direction in settings.directions() {
            let query = settings.query_for(direction);
            departures.extend(self.fetch_direction(&query).await);
        }

        let rings = settings.excluded_rings();
        if !rings.is_empty() {
            departures.retain(|d| !rings.iter().any(|ring| d.runs(*ring)));
        }

        let mut departures = dedup_departures(departures);
        departures.sort_by_key(Departure::timestamp);

        debug!(count = departures.len(), "Aggregated departures");
        departures
    }
}
