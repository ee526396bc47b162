//! Station-local wall clock.
//!
//! The display is fixed to one coastal location, so "now" is always read in
//! the station's own UTC offset (KST, +9 by default) regardless of where the
//! program runs.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Timelike, Utc};

/// Current time at the station.
///
/// Offsets outside ±23 h are rejected by chrono; in that case a warning is
/// logged and UTC is used.
pub fn station_now(utc_offset_hours: i32) -> DateTime<FixedOffset> {
    at_station(Utc::now(), utc_offset_hours)
}

/// Convert an instant to station-local time.
pub fn at_station(instant: DateTime<Utc>, utc_offset_hours: i32) -> DateTime<FixedOffset> {
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            log::warn!("Invalid UTC offset {utc_offset_hours}h, using UTC");
            Utc.fix()
        });
    instant.with_timezone(&offset)
}

/// Minutes elapsed since local midnight (0..=1439).
pub fn minutes_since_midnight<Tz: TimeZone>(time: &DateTime<Tz>) -> i32 {
    (time.hour() * 60 + time.minute()) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kst_crosses_midnight_before_utc() {
        // 15:30 UTC is 00:30 the next day in Korea
        let instant = Utc.with_ymd_and_hms(2025, 7, 24, 15, 30, 0).unwrap();
        let kst = at_station(instant, 9);

        assert_eq!(minutes_since_midnight(&kst), 30);
        assert_eq!(kst.format("%Y-%m-%d").to_string(), "2025-07-25");
    }

    #[test]
    fn test_invalid_offset_falls_back_to_utc() {
        let instant = Utc.with_ymd_and_hms(2025, 7, 24, 10, 0, 0).unwrap();
        let local = at_station(instant, 48);

        assert_eq!(minutes_since_midnight(&local), 600);
    }
}
