//! Departure entity - One scheduled trip leaving a stop

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::catalog::LineVisualCatalog;
use crate::errors::DomainError;
use crate::value_objects::{LineType, RingDirection, VehiclePosition};

/// A single departure from a stop
///
/// Built fresh on every refresh and never mutated afterwards. Two departures
/// are the same departure when every field is equal, which is what the
/// aggregator relies on to collapse trips returned by several direction
/// queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    trip_id: String,
    line_name: String,
    line_type: LineType,
    timestamp: DateTime<FixedOffset>,
    time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<String>,
    icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_color: Option<String>,
    location: VehiclePosition,
    cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    delay: Option<i64>,
}

impl Departure {
    /// Create a departure, resolving icon and colors from the line catalog
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if `trip_id` is empty.
    pub fn new(
        trip_id: impl Into<String>,
        line_name: impl Into<String>,
        line_type: LineType,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<Self, DomainError> {
        let trip_id = trip_id.into();
        if trip_id.trim().is_empty() {
            return Err(DomainError::MissingField("trip_id"));
        }

        let line_name = line_name.into();
        let catalog = LineVisualCatalog::global();

        Ok(Self {
            time: timestamp.format("%H:%M").to_string(),
            icon: catalog.icon(line_type).to_string(),
            bg_color: catalog
                .line_color(line_type, &line_name)
                .map(ToString::to_string),
            fallback_color: catalog.fallback_color(line_type).map(ToString::to_string),
            trip_id,
            line_name,
            line_type,
            timestamp,
            direction: None,
            location: VehiclePosition::default(),
            cancelled: false,
            delay: None,
        })
    }

    /// Set the direction label
    #[must_use]
    pub fn with_direction(mut self, direction: Option<String>) -> Self {
        self.direction = direction;
        self
    }

    /// Prefer a line color supplied by the API over the catalog's line color
    #[must_use]
    pub fn with_api_color(mut self, color: Option<String>) -> Self {
        if let Some(color) = color.filter(|c| !c.is_empty()) {
            self.bg_color = Some(color);
        }
        self
    }

    /// Set the current vehicle position
    #[must_use]
    pub const fn with_location(mut self, location: VehiclePosition) -> Self {
        self.location = location;
        self
    }

    /// Mark the trip as cancelled
    #[must_use]
    pub const fn with_cancelled(mut self, cancelled: bool) -> Self {
        self.cancelled = cancelled;
        self
    }

    /// Set the delay in seconds relative to the planned time
    #[must_use]
    pub const fn with_delay(mut self, delay: Option<i64>) -> Self {
        self.delay = delay;
        self
    }

    /// Trip identifier
    #[must_use]
    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    /// Line label (e.g. "S42")
    #[must_use]
    pub fn line_name(&self) -> &str {
        &self.line_name
    }

    /// Transport product of the line
    #[must_use]
    pub const fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Actual (or planned) departure instant
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Departure time as `HH:MM` in the offset the API reported
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Destination / heading label
    #[must_use]
    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }

    /// Display icon
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Official line color (API or catalog)
    #[must_use]
    pub fn bg_color(&self) -> Option<&str> {
        self.bg_color.as_deref()
    }

    /// Generic product color from the catalog
    #[must_use]
    pub fn fallback_color(&self) -> Option<&str> {
        self.fallback_color.as_deref()
    }

    /// Current vehicle position, `(0.0, 0.0)` when unknown
    #[must_use]
    pub const fn location(&self) -> VehiclePosition {
        self.location
    }

    /// Whether the trip was cancelled
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Delay in seconds, `None` when the API had no realtime data
    #[must_use]
    pub const fn delay(&self) -> Option<i64> {
        self.delay
    }

    /// Whether the direction label carries the given ring orientation glyph
    #[must_use]
    pub fn runs(&self, ring: RingDirection) -> bool {
        self.direction.as_deref().is_some_and(|d| ring.marks(d))
    }

    /// Color to display, picked by the official-colors toggle
    ///
    /// With the toggle on the official line color wins, otherwise the
    /// generic product color does. Either falls back to the other.
    #[must_use]
    pub fn display_color(&self, show_official_colors: bool) -> Option<&str> {
        if show_official_colors {
            self.bg_color().or_else(|| self.fallback_color())
        } else {
            self.fallback_color().or_else(|| self.bg_color())
        }
    }

    /// Project the departure into its display record
    #[must_use]
    pub fn render(&self, show_official_colors: bool, walking_time: u32) -> RenderedDeparture {
        RenderedDeparture {
            line_name: self.line_name.clone(),
            line_type: self.line_type,
            time: self.time.clone(),
            direction: self.direction.clone(),
            color: self.display_color(show_official_colors).map(ToString::to_string),
            cancelled: self.cancelled,
            delay: self.delay,
            walking_time,
        }
    }
}

/// Display-ready projection of a departure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDeparture {
    /// Line label
    pub line_name: String,
    /// Transport product
    pub line_type: LineType,
    /// `HH:MM`
    pub time: String,
    /// Destination / heading label
    pub direction: Option<String>,
    /// Badge color
    pub color: Option<String>,
    /// Whether the trip was cancelled
    pub cancelled: bool,
    /// Delay in seconds
    pub delay: Option<i64>,
    /// Walking time to the stop in minutes
    pub walking_time: u32,
}
