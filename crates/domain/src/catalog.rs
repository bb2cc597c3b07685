//! Line visual catalog
//!
//! Static lookup of display attributes per transport product: the icon shown
//! for a departure, the generic product color, and the official VBB colors of
//! individual lines. Built once on first use and never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::value_objects::LineType;

/// Icon used when no departure is known or the product is not in the catalog
pub const DEFAULT_ICON: &str = "mdi:clock";

/// Display attributes of one transport product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineVisuals {
    /// Material Design icon identifier
    pub icon: &'static str,
    /// Generic color for the product
    pub color: &'static str,
    /// Official colors of individual lines, keyed by line name
    pub line_colors: HashMap<&'static str, &'static str>,
}

impl LineVisuals {
    fn new(
        icon: &'static str,
        color: &'static str,
        line_colors: &[(&'static str, &'static str)],
    ) -> Self {
        Self {
            icon,
            color,
            line_colors: line_colors.iter().copied().collect(),
        }
    }
}

/// Immutable mapping from line type to its visuals
#[derive(Debug)]
pub struct LineVisualCatalog {
    entries: HashMap<LineType, LineVisuals>,
}

static CATALOG: LazyLock<LineVisualCatalog> = LazyLock::new(LineVisualCatalog::vbb);

impl LineVisualCatalog {
    /// The process-wide VBB catalog
    #[must_use]
    pub fn global() -> &'static Self {
        &CATALOG
    }

    /// Look up the visuals of a product, `None` for unknown products
    #[must_use]
    pub fn lookup(&self, line_type: LineType) -> Option<&LineVisuals> {
        self.entries.get(&line_type)
    }

    /// Icon for a product, [`DEFAULT_ICON`] when unknown
    #[must_use]
    pub fn icon(&self, line_type: LineType) -> &'static str {
        self.lookup(line_type).map_or(DEFAULT_ICON, |v| v.icon)
    }

    /// Generic product color, `None` when unknown
    #[must_use]
    pub fn fallback_color(&self, line_type: LineType) -> Option<&'static str> {
        self.lookup(line_type).map(|v| v.color)
    }

    /// Official color of a specific line, if the catalog has one
    #[must_use]
    pub fn line_color(&self, line_type: LineType, line_name: &str) -> Option<&'static str> {
        self.lookup(line_type)
            .and_then(|v| v.line_colors.get(line_name).copied())
    }

    #[allow(clippy::too_many_lines)] // Color table
    fn vbb() -> Self {
        let mut entries = HashMap::new();

        entries.insert(
            LineType::Suburban,
            LineVisuals::new(
                "mdi:subway-variant",
                "#008D4F",
                &[
                    ("S1", "#da6ba2"),
                    ("S2", "#007734"),
                    ("S25", "#007734"),
                    ("S26", "#007734"),
                    ("S3", "#0066ad"),
                    ("S41", "#ad5937"),
                    ("S42", "#cb6418"),
                    ("S45", "#cd9c53"),
                    ("S46", "#cd9c53"),
                    ("S47", "#cd9c53"),
                    ("S5", "#eb7405"),
                    ("S7", "#816da6"),
                    ("S75", "#816da6"),
                    ("S8", "#66aa22"),
                    ("S85", "#66aa22"),
                    ("S9", "#992746"),
                ],
            ),
        );

        entries.insert(
            LineType::Subway,
            LineVisuals::new(
                "mdi:subway",
                "#2864A6",
                &[
                    ("U1", "#7dad4c"),
                    ("U2", "#da421e"),
                    ("U3", "#16683d"),
                    ("U4", "#f0d722"),
                    ("U5", "#7e5330"),
                    ("U6", "#8c6dab"),
                    ("U7", "#009bd5"),
                    ("U8", "#224f86"),
                    ("U9", "#f3791d"),
                ],
            ),
        );

        entries.insert(
            LineType::Tram,
            LineVisuals::new("mdi:tram", "#D82020", &[]),
        );
        entries.insert(
            LineType::Bus,
            LineVisuals::new("mdi:bus", "#A5027D", &[]),
        );
        entries.insert(
            LineType::Ferry,
            LineVisuals::new("mdi:ferry", "#0080BA", &[]),
        );
        entries.insert(
            LineType::Express,
            LineVisuals::new("mdi:train", "#4D4D4D", &[]),
        );

        entries.insert(
            LineType::Regional,
            LineVisuals::new(
                "mdi:train",
                "#F01414",
                &[
                    ("FEX", "#79122f"),
                    ("RB10", "#66aa22"),
                    ("RB12", "#a5027d"),
                    ("RB14", "#a5027d"),
                    ("RB20", "#007734"),
                    ("RB21", "#501689"),
                    ("RB22", "#009bd5"),
                    ("RB23", "#eb7405"),
                    ("RB24", "#da6ba2"),
                    ("RB25", "#007cb0"),
                    ("RB26", "#009686"),
                    ("RB27", "#e2001a"),
                    ("RB31", "#66aa22"),
                    ("RB32", "#697c8a"),
                    ("RB33", "#a5027d"),
                    ("RB34", "#0066ad"),
                    ("RB35", "#816da6"),
                    ("RB36", "#ad5937"),
                    ("RB37", "#ad5937"),
                    ("RB43", "#009bd5"),
                    ("RB45", "#ffd502"),
                    ("RB46", "#da6ba2"),
                    ("RB49", "#992746"),
                    ("RB51", "#da6ba2"),
                    ("RB54", "#816da6"),
                    ("RB55", "#eb7405"),
                    ("RB60", "#66aa22"),
                    ("RB61", "#992746"),
                    ("RB62", "#da6ba2"),
                    ("RB63", "#ffd502"),
                    ("RB65", "#0066ad"),
                    ("RB66", "#007734"),
                    ("RB73", "#009686"),
                    ("RB74", "#0066ad"),
                    ("RB91", "#eb7405"),
                    ("RB92", "#eb7405"),
                    ("RB93", "#eb7405"),
                    ("RE1", "#e2001a"),
                    ("RE10", "#5e5e5d"),
                    ("RE14", "#a98956"),
                    ("RE15", "#ffd502"),
                    ("RE18", "#eb7405"),
                    ("RE2", "#ffd502"),
                    ("RE3", "#eb7405"),
                    ("RE4", "#992746"),
                    ("RE5", "#0066ad"),
                    ("RE6", "#da6ba2"),
                    ("RE66", "#007734"),
                    ("RE7", "#007734"),
                    ("RE8", "#501689"),
                ],
            ),
        );

        Self { entries }
    }
}
