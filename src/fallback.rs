//! # Fallback Tide Data
//!
//! A fixed, plausible day of tides for the station, used when neither the
//! primary nor the legacy data source can be loaded. The overview marks data
//! from here as sample data so nobody mistakes it for a real forecast.
//!
//! The table follows the usual semidiurnal pattern for Gyeonggi Bay: two
//! highs and two lows roughly 6 h apart, with a large range.

use crate::{RawTideRecord, TideDay};

/// Built-in sample day.
pub fn sample_day() -> TideDay {
    TideDay {
        high_tides: vec![
            RawTideRecord::new("06:30", 350.0),
            RawTideRecord::new("18:45", 280.0),
        ],
        low_tides: vec![
            RawTideRecord::new("00:15", 120.0),
            RawTideRecord::new("12:20", 80.0),
        ],
        sunrise: Some("06:30".to_string()),
        sunset: Some("18:45".to_string()),
        korean_date: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::collect_events;

    #[test]
    fn test_sample_day_is_fully_valid() {
        let events = collect_events(&sample_day(), None);
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_sample_day_alternates_high_and_low() {
        let mut events = collect_events(&sample_day(), None);
        events.sort_by_key(|e| e.abs_minutes);

        for pair in events.windows(2) {
            assert_ne!(pair[0].tide_type, pair[1].tide_type);
        }
    }
}
