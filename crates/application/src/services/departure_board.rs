//! Departure board
//!
//! The per-stop façade hosts poll and read: display name, stable id, state
//! line, icon and rendered departures, backed by a snapshot that a refresh
//! replaces wholesale.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{DEFAULT_ICON, Departure, RenderedDeparture};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use super::departure_service::{BoardSettings, DepartureService};

/// State line shown when a board has no departures
pub const NO_DEPARTURES_STATE: &str = "N/A";

/// Extra attributes exposed next to the state line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardAttributes {
    /// Rendered departures, soonest first
    pub departures: Vec<RenderedDeparture>,
}

/// Owned, serializable view of a board at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Stable board identifier
    pub unique_id: String,
    /// Display name
    pub name: String,
    /// `"Next {line} at {time}"` or `"N/A"`
    pub state: String,
    /// Icon of the soonest departure
    pub icon: String,
    /// Rendered departures
    pub attributes: BoardAttributes,
    /// When the departures were last refreshed (`None` before the first refresh)
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct BoardState {
    departures: Vec<Departure>,
    updated_at: Option<DateTime<Utc>>,
}

/// One configured stop and its latest departures
#[derive(Debug)]
pub struct DepartureBoard {
    settings: BoardSettings,
    service: Arc<DepartureService>,
    state: RwLock<BoardState>,
    refresh_lock: Mutex<()>,
}

impl DepartureBoard {
    /// Create a board with an empty snapshot
    pub fn new(settings: BoardSettings, service: Arc<DepartureService>) -> Self {
        Self {
            settings,
            service,
            state: RwLock::new(BoardState::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Board settings
    pub const fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Configured name, or `"Stop ID: {stop_id}"`
    pub fn name(&self) -> String {
        self.settings
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map_or_else(|| format!("Stop ID: {}", self.settings.stop_id), ToString::to_string)
    }

    /// Stable identifier derived from the stop id and the configured name
    pub fn unique_id(&self) -> String {
        match self.settings.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!("stop_{}_{name}_departures", self.settings.stop_id),
            None => format!("stop_{}_departures", self.settings.stop_id),
        }
    }

    /// Current departures, soonest first
    pub fn departures(&self) -> Vec<Departure> {
        self.state.read().departures.clone()
    }

    /// `"Next {line_name} at {time}"` for the soonest departure, else `"N/A"`
    pub fn state(&self) -> String {
        self.state.read().departures.first().map_or_else(
            || NO_DEPARTURES_STATE.to_string(),
            |d| format!("Next {} at {}", d.line_name(), d.time()),
        )
    }

    /// Icon of the soonest departure, else the default icon
    pub fn icon(&self) -> String {
        self.state
            .read()
            .departures
            .first()
            .map_or(DEFAULT_ICON, Departure::icon)
            .to_string()
    }

    /// Rendered departures for display
    pub fn attributes(&self) -> BoardAttributes {
        Self::render(&self.settings, &self.state.read().departures)
    }

    /// When the departures were last refreshed
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().updated_at
    }

    /// Owned view of the whole board
    pub fn snapshot(&self) -> BoardSnapshot {
        let state = self.state.read();
        let first = state.departures.first();

        BoardSnapshot {
            unique_id: self.unique_id(),
            name: self.name(),
            state: first.map_or_else(
                || NO_DEPARTURES_STATE.to_string(),
                |d| format!("Next {} at {}", d.line_name(), d.time()),
            ),
            icon: first.map_or(DEFAULT_ICON, Departure::icon).to_string(),
            attributes: Self::render(&self.settings, &state.departures),
            updated_at: state.updated_at,
        }
    }

    /// Fetch fresh departures and replace the snapshot
    ///
    /// Concurrent calls on the same board run one after another.
    #[instrument(skip(self), fields(stop_id = %self.settings.stop_id))]
    pub async fn refresh(&self) -> BoardSnapshot {
        let _guard = self.refresh_lock.lock().await;

        let departures = self.service.aggregate(&self.settings).await;
        let count = departures.len();
        {
            let mut state = self.state.write();
            state.departures = departures;
            state.updated_at = Some(Utc::now());
        }

        info!(count, "Board refreshed");
        self.snapshot()
    }

    fn render(settings: &BoardSettings, departures: &[Departure]) -> BoardAttributes {
        BoardAttributes {
            departures: departures
                .iter()
                .map(|d| d.render(settings.show_api_line_colors, settings.walking_time))
                .collect(),
        }
    }
}
