//! Ringbahn orientation value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of a circular route
///
/// The API marks circular-route directions with a gapped circle arrow
/// embedded in the direction label (e.g. `"Ringbahn S41 ⟳"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingDirection {
    /// U+27F3 CLOCKWISE GAPPED CIRCLE ARROW
    Clockwise,
    /// U+27F2 ANTICLOCKWISE GAPPED CIRCLE ARROW
    Counterclockwise,
}

impl RingDirection {
    /// The glyph the API embeds in direction labels
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self {
            Self::Clockwise => '\u{27F3}',
            Self::Counterclockwise => '\u{27F2}',
        }
    }

    /// Whether a direction label is marked with this orientation
    #[must_use]
    pub fn marks(&self, direction: &str) -> bool {
        direction.contains(self.glyph())
    }
}

impl fmt::Display for RingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => write!(f, "clockwise"),
            Self::Counterclockwise => write!(f, "counterclockwise"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs() {
        assert_eq!(RingDirection::Clockwise.glyph(), '⟳');
        assert_eq!(RingDirection::Counterclockwise.glyph(), '⟲');
    }

    #[test]
    fn marks_matches_substring() {
        assert!(RingDirection::Clockwise.marks("Ringbahn S41 ⟳"));
        assert!(!RingDirection::Counterclockwise.marks("Ringbahn S41 ⟳"));
        assert!(RingDirection::Counterclockwise.marks("⟲ Ringbahn S42"));
    }

    #[test]
    fn plain_direction_is_unmarked() {
        assert!(!RingDirection::Clockwise.marks("S Spandau Bhf (Berlin)"));
        assert!(!RingDirection::Counterclockwise.marks(""));
    }
}
