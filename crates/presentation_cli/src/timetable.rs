//! Plain-text timetable rendering for the terminal.

use domain::RenderedDeparture;

/// Display options for a printed timetable
#[derive(Debug, Clone, Copy)]
pub struct TimetableOptions {
    /// Rows considered for display
    pub max_entries: usize,
    /// Print cancelled trips (struck through) instead of hiding them
    pub show_cancelled: bool,
}

impl Default for TimetableOptions {
    fn default() -> Self {
        Self {
            max_entries: 10,
            show_cancelled: true,
        }
    }
}

/// Strike text through with a combining long stroke overlay
pub fn strike(text: &str) -> String {
    text.chars().flat_map(|c| [c, '\u{0336}']).collect()
}

/// Delay in whole minutes as `+N` / `-N`, empty when on time or unknown
pub fn format_delay(delay_secs: Option<i64>) -> String {
    match delay_secs.map(|secs| secs / 60) {
        Some(minutes) if minutes > 0 => format!("+{minutes}"),
        Some(minutes) if minutes < 0 => minutes.to_string(),
        _ => String::new(),
    }
}

/// One timetable row: line, direction, time and delay
pub fn format_row(departure: &RenderedDeparture, line_width: usize) -> String {
    let direction = departure.direction.as_deref().unwrap_or("-");
    let delay = format_delay(departure.delay);
    let row = format!(
        "{:<line_width$}  {direction}  {}{}{delay}",
        departure.line_name,
        departure.time,
        if delay.is_empty() { "" } else { " " },
    );

    if departure.cancelled {
        strike(&row)
    } else {
        row
    }
}

/// Render the header and rows of one stop
///
/// The first `max_entries` departures are considered; cancelled ones among
/// them are dropped when `show_cancelled` is off.
pub fn render(title: &str, departures: &[RenderedDeparture], options: TimetableOptions) -> String {
    let shown: Vec<&RenderedDeparture> = departures
        .iter()
        .take(options.max_entries)
        .filter(|d| options.show_cancelled || !d.cancelled)
        .collect();

    let mut out = format!("{title}\n");
    if shown.is_empty() {
        out.push_str("  No departures\n");
        return out;
    }

    let line_width = shown
        .iter()
        .map(|d| d.line_name.chars().count())
        .max()
        .unwrap_or(0);

    for departure in shown {
        out.push_str("  ");
        out.push_str(&format_row(departure, line_width));
        out.push('\n');
    }
    out
}
