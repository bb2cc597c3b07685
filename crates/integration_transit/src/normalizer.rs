//! Departure normalization
//!
//! Turns raw API records into [`Departure`] entities. Visuals come from the
//! line catalog inside [`Departure::new`]; this module resolves the product,
//! the timestamp, the API color and the vehicle position.

use chrono::{DateTime, FixedOffset};
use domain::{Departure, DepartureQuery, LineType, VehiclePosition};
use tracing::warn;

use crate::config::InvalidRecordPolicy;
use crate::error::TransitError;
use crate::models::RawDeparture;

/// Convert one raw record into a departure
///
/// # Errors
///
/// Returns `TransitError::InvalidRecord` if the record has no trip id, or if
/// neither `when` nor `plannedWhen` holds a parseable timestamp.
pub fn normalize(raw: RawDeparture) -> Result<Departure, TransitError> {
    let trip_id = raw
        .trip_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| TransitError::InvalidRecord("missing tripId".to_string()))?;

    let timestamp = resolve_timestamp(raw.when.as_deref(), raw.planned_when.as_deref())
        .map_err(|reason| TransitError::InvalidRecord(format!("trip {trip_id}: {reason}")))?;

    let line = raw.line.unwrap_or_default();
    let line_type = line
        .product
        .as_deref()
        .map_or(LineType::Unknown, LineType::from_product);
    let api_color = line.color.and_then(|c| c.bg);
    let position = raw.current_trip_position.unwrap_or_default();

    let departure = Departure::new(trip_id, line.name.unwrap_or_default(), line_type, timestamp)
        .map_err(|e| TransitError::InvalidRecord(e.to_string()))?
        .with_direction(raw.direction)
        .with_api_color(api_color)
        .with_location(VehiclePosition::from_optional(
            position.latitude,
            position.longitude,
        ))
        .with_cancelled(raw.cancelled.unwrap_or(false))
        .with_delay(raw.delay);

    Ok(departure)
}

/// Normalize a batch of records for one query
///
/// Records leaving from an excluded stop are dropped before normalization.
/// Invalid records either abort the batch or are skipped, per `policy`.
///
/// # Errors
///
/// Returns the first `TransitError::InvalidRecord` when `policy` is
/// [`InvalidRecordPolicy::Abort`].
pub fn normalize_all(
    records: Vec<RawDeparture>,
    query: &DepartureQuery,
    policy: InvalidRecordPolicy,
) -> Result<Vec<Departure>, TransitError> {
    let mut departures = Vec::with_capacity(records.len());

    for record in records {
        if record.stop_id().is_some_and(|id| query.excludes_stop(id)) {
            continue;
        }

        match normalize(record) {
            Ok(departure) => departures.push(departure),
            Err(e) => match policy {
                InvalidRecordPolicy::Abort => return Err(e),
                InvalidRecordPolicy::Skip => {
                    warn!(stop_id = %query.stop_id, error = %e, "Skipping invalid departure record");
                },
            },
        }
    }

    Ok(departures)
}

/// Prefer the realtime instant, fall back to the planned one
fn resolve_timestamp(
    when: Option<&str>,
    planned_when: Option<&str>,
) -> Result<DateTime<FixedOffset>, String> {
    let value = when
        .filter(|v| !v.is_empty())
        .or_else(|| planned_when.filter(|v| !v.is_empty()))
        .ok_or_else(|| "neither when nor plannedWhen present".to_string())?;

    DateTime::parse_from_rfc3339(value).map_err(|e| format!("unparseable timestamp {value:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use domain::DEFAULT_ICON;

    use super::*;
    use crate::models::{RawLine, RawLineColor, RawPosition, RawStopRef};

    fn raw(trip_id: &str, when: Option<&str>) -> RawDeparture {
        RawDeparture {
            trip_id: Some(trip_id.to_string()),
            when: when.map(ToString::to_string),
            line: Some(RawLine {
                name: Some("S42".to_string()),
                product: Some("suburban".to_string()),
                color: None,
            }),
            ..RawDeparture::default()
        }
    }

    fn from_json(json: &str) -> RawDeparture {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn normalizes_ringbahn_record() {
        let record = from_json(
            r#"{"tripId":"t1","line":{"product":"suburban","name":"S42"},"when":"2024-01-01T10:05:00+01:00","direction":"Ringbahn S42 ⟳"}"#,
        );
        let dep = normalize(record).unwrap();
        assert_eq!(dep.trip_id(), "t1");
        assert_eq!(dep.line_type(), LineType::Suburban);
        assert_eq!(dep.time(), "10:05");
        assert_eq!(dep.icon(), "mdi:subway-variant");
        assert!(dep.direction().unwrap().contains('⟳'));
    }

    #[test]
    fn falls_back_to_planned_when() {
        let mut record = raw("t1", None);
        record.planned_when = Some("2024-01-01T08:30:00+01:00".to_string());
        let dep = normalize(record).unwrap();
        assert_eq!(dep.time(), "08:30");
    }

    #[test]
    fn realtime_when_wins_over_planned() {
        let mut record = raw("t1", Some("2024-01-01T08:32:00+01:00"));
        record.planned_when = Some("2024-01-01T08:30:00+01:00".to_string());
        let dep = normalize(record).unwrap();
        assert_eq!(dep.time(), "08:32");
    }

    #[test]
    fn missing_timestamps_fail() {
        let result = normalize(raw("t1", None));
        assert!(matches!(result, Err(TransitError::InvalidRecord(_))));
    }

    #[test]
    fn unparseable_timestamp_fails() {
        let result = normalize(raw("t1", Some("tomorrow at ten")));
        assert!(matches!(result, Err(TransitError::InvalidRecord(_))));
    }

    #[test]
    fn missing_trip_id_fails() {
        let mut record = raw("t1", Some("2024-01-01T10:05:00+01:00"));
        record.trip_id = None;
        assert!(matches!(normalize(record), Err(TransitError::InvalidRecord(_))));
    }

    #[test]
    fn api_color_is_preferred_over_catalog_line_color() {
        let mut record = raw("t1", Some("2024-01-01T10:05:00+01:00"));
        record.line = Some(RawLine {
            name: Some("S42".to_string()),
            product: Some("suburban".to_string()),
            color: Some(RawLineColor {
                fg: Some("#fff".to_string()),
                bg: Some("#111111".to_string()),
            }),
        });
        let dep = normalize(record).unwrap();
        assert_eq!(dep.bg_color(), Some("#111111"));
        assert_eq!(dep.fallback_color(), Some("#008D4F"));
    }

    #[test]
    fn catalog_line_color_used_without_api_color() {
        let dep = normalize(raw("t1", Some("2024-01-01T10:05:00+01:00"))).unwrap();
        assert_eq!(dep.bg_color(), Some("#cb6418"));
    }

    #[test]
    fn unknown_product_gets_default_icon() {
        let mut record = raw("t1", Some("2024-01-01T10:05:00+01:00"));
        record.line = Some(RawLine {
            name: Some("SEV".to_string()),
            product: Some("replacementBus".to_string()),
            color: None,
        });
        let dep = normalize(record).unwrap();
        assert_eq!(dep.line_type(), LineType::Unknown);
        assert_eq!(dep.icon(), DEFAULT_ICON);
        assert_eq!(dep.fallback_color(), None);
    }

    #[test]
    fn missing_line_is_unknown() {
        let mut record = raw("t1", Some("2024-01-01T10:05:00+01:00"));
        record.line = None;
        let dep = normalize(record).unwrap();
        assert_eq!(dep.line_name(), "");
        assert_eq!(dep.line_type(), LineType::Unknown);
    }

    #[test]
    fn position_cancelled_and_delay_are_carried() {
        let mut record = raw("t1", Some("2024-01-01T10:05:00+01:00"));
        record.current_trip_position = Some(RawPosition {
            latitude: Some(52.5),
            longitude: Some(13.4),
        });
        record.cancelled = Some(true);
        record.delay = Some(-30);
        let dep = normalize(record).unwrap();
        assert_eq!(dep.location().as_pair(), (52.5, 13.4));
        assert!(dep.is_cancelled());
        assert_eq!(dep.delay(), Some(-30));
    }

    #[test]
    fn position_defaults_to_origin() {
        let dep = normalize(raw("t1", Some("2024-01-01T10:05:00+01:00"))).unwrap();
        assert!(dep.location().is_unknown());
    }

    #[test]
    fn normalize_all_drops_excluded_stops() {
        let mut excluded = raw("t1", Some("2024-01-01T10:05:00+01:00"));
        excluded.stop = Some(RawStopRef {
            id: Some("900100703".to_string()),
            name: None,
        });
        let mut kept = raw("t2", Some("2024-01-01T10:06:00+01:00"));
        kept.stop = Some(RawStopRef {
            id: Some("900100003".to_string()),
            name: None,
        });

        let mut query = DepartureQuery::new("900100003");
        query.excluded_stops = vec!["900100703".to_string()];

        let deps = normalize_all(vec![excluded, kept], &query, InvalidRecordPolicy::Abort).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].trip_id(), "t2");
    }

    #[test]
    fn normalize_all_abort_policy_fails_batch() {
        let records = vec![
            raw("t1", Some("2024-01-01T10:05:00+01:00")),
            raw("t2", None),
        ];
        let query = DepartureQuery::new("1");
        let result = normalize_all(records, &query, InvalidRecordPolicy::Abort);
        assert!(matches!(result, Err(TransitError::InvalidRecord(_))));
    }

    #[test]
    fn normalize_all_skip_policy_keeps_valid_records() {
        let records = vec![
            raw("t1", Some("2024-01-01T10:05:00+01:00")),
            raw("t2", None),
            raw("t3", Some("2024-01-01T10:07:00+01:00")),
        ];
        let query = DepartureQuery::new("1");
        let deps = normalize_all(records, &query, InvalidRecordPolicy::Skip).unwrap();
        let ids: Vec<&str> = deps.iter().map(Departure::trip_id).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
    }

    #[test]
    fn excluded_invalid_record_does_not_abort() {
        let mut invalid = raw("t1", None);
        invalid.stop = Some(RawStopRef {
            id: Some("900100703".to_string()),
            name: None,
        });
        let mut query = DepartureQuery::new("1");
        query.excluded_stops = vec!["900100703".to_string()];
        let deps = normalize_all(vec![invalid], &query, InvalidRecordPolicy::Abort).unwrap();
        assert!(deps.is_empty());
    }
}
