//! # Tide Event Normalization
//!
//! Converts raw day-keyed tide records into [`TideEvent`]s on the absolute
//! minute timeline. Bad records are dropped here, never reported as errors:
//! a hand-edited or drifting upstream file should thin out the schedule, not
//! blank the display.
//!
//! The normalizer keeps input order (all highs, then all lows). Sorting is the
//! interpolator's job.

use crate::{RawTideRecord, TideDay, TideEvent, TideType};
use serde_json::Value;

/// Parse a strict `"HH:MM"` string into minutes since midnight.
///
/// Returns `None` unless there are exactly two colon-separated integer parts
/// with hour in 0..=23 and minute in 0..=59. Surrounding whitespace on each
/// part is tolerated.
///
/// # Example
/// ```
/// use tide_level_lib::events::parse_hhmm;
///
/// assert_eq!(parse_hhmm("06:30"), Some(390));
/// assert_eq!(parse_hhmm("25:99"), None);
/// ```
pub fn parse_hhmm(text: &str) -> Option<u32> {
    let mut parts = text.split(':');
    let hour = parse_clock_part(parts.next()?)?;
    let minute = parse_clock_part(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

fn parse_clock_part(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Extract a finite height from a JSON number or numeric string.
///
/// Scraped tables use `"--"` for unknown heights; those, like `null`,
/// booleans, or non-finite values, yield `None`.
pub fn parse_height(value: &Value) -> Option<f64> {
    let height = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    height.is_finite().then_some(height)
}

fn normalize_record(record: &RawTideRecord, day_offset: i32, tide_type: TideType) -> Option<TideEvent> {
    let time = record.time.as_str()?;
    let minutes = parse_hhmm(time)?;
    let height = parse_height(&record.height)?;
    Some(TideEvent::new(time, minutes as i32, day_offset, height, tide_type))
}

/// Build normalized events for one day of high and low tide records.
///
/// Output order is the highs in input order followed by the lows in input
/// order. Records with an unusable time or height are skipped.
pub fn build_tide_events(high: &[RawTideRecord], low: &[RawTideRecord], day_offset: i32) -> Vec<TideEvent> {
    let mut events = Vec::with_capacity(high.len() + low.len());

    let tagged = high
        .iter()
        .map(|r| (r, TideType::High))
        .chain(low.iter().map(|r| (r, TideType::Low)));

    for (record, tide_type) in tagged {
        match normalize_record(record, day_offset, tide_type) {
            Some(event) => events.push(event),
            None => log::debug!(
                "Dropping malformed {:?} tide record on day {}: time={} height={}",
                tide_type,
                day_offset,
                record.time,
                record.height
            ),
        }
    }

    events
}

/// Flatten today's and (optionally) tomorrow's data into one event list.
pub fn collect_events(today: &TideDay, tomorrow: Option<&TideDay>) -> Vec<TideEvent> {
    let mut events = build_tide_events(&today.high_tides, &today.low_tides, 0);
    if let Some(day) = tomorrow {
        events.extend(build_tide_events(&day.high_tides, &day.low_tides, 1));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawTideRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_hhmm_accepts_valid_times() {
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("7:05"), Some(425));
        assert_eq!(parse_hhmm(" 12 : 20 "), Some(740));
    }

    #[test]
    fn test_parse_hhmm_rejects_malformed_times() {
        for bad in ["", "12", "12:30:00", "24:00", "12:60", "25:99", "ab:cd", ":30", "12:", "-1:30", "7.5:00"] {
            assert_eq!(parse_hhmm(bad), None, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_height_variants() {
        assert_eq!(parse_height(&json!(350)), Some(350.0));
        assert_eq!(parse_height(&json!(-12.5)), Some(-12.5));
        assert_eq!(parse_height(&json!(" 80 ")), Some(80.0));
        assert_eq!(parse_height(&json!("--")), None);
        assert_eq!(parse_height(&json!("abc")), None);
        assert_eq!(parse_height(&json!("NaN")), None);
        assert_eq!(parse_height(&json!("inf")), None);
        assert_eq!(parse_height(&Value::Null), None);
        assert_eq!(parse_height(&json!(true)), None);
    }

    #[test]
    fn test_build_events_keeps_input_order_and_tags() {
        let high = vec![RawTideRecord::new("18:45", 280.0), RawTideRecord::new("06:30", 350.0)];
        let low = vec![RawTideRecord::new("12:20", 80.0)];

        let events = build_tide_events(&high, &low, 1);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].time, "18:45");
        assert_eq!(events[0].tide_type, TideType::High);
        assert_eq!(events[1].time, "06:30");
        assert_eq!(events[2].tide_type, TideType::Low);
        assert_eq!(events[2].minutes, 740);
        assert_eq!(events[2].day_offset, 1);
        assert_eq!(events[2].abs_minutes, 1440 + 740);
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        let high = vec![
            record(json!({"time": "25:99", "height": 100})),
            record(json!({"time": "06:30", "height": "abc"})),
            record(json!({"height": 100})),
            record(json!({"time": 630, "height": 100})),
            record(json!({"time": "06:30", "height": "--"})),
            record(json!({"time": "06:30", "height": "350"})),
        ];

        let events = build_tide_events(&high, &[], 0);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].height, 350.0);
    }

    #[test]
    fn test_collect_events_merges_days() {
        let today = TideDay {
            high_tides: vec![RawTideRecord::new("06:30", 350.0)],
            low_tides: vec![RawTideRecord::new("12:20", 80.0)],
            ..TideDay::default()
        };
        let tomorrow = TideDay {
            low_tides: vec![RawTideRecord::new("01:00", 100.0)],
            ..TideDay::default()
        };

        assert_eq!(collect_events(&today, None).len(), 2);

        let merged = collect_events(&today, Some(&tomorrow));
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[2].abs_minutes, 1500);
    }
}
