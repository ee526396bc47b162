//! # Tide Level Interpolation
//!
//! Derives a continuous "current tide level" from discrete high/low events.
//!
//! ## Algorithm
//! 1. Keep events with a finite height and sort them by `abs_minutes` (stable)
//! 2. With fewer than two events, return [`InterpolationResult::unknown`]
//! 3. **Next** event: first one strictly after now, else the earliest event
//!    shifted forward one day ("the pattern repeats tomorrow")
//! 4. **Previous** event: last one at or before now, else the last event of
//!    today shifted back one day, else the earliest event
//! 5. Linear interpolation of height between the bracketing pair:
//!    ```text
//!    height = prev + (next - prev) * elapsed / total
//!    ```
//! 6. Percentage depends on the pair:
//!    - low → high: progress (rising)
//!    - high → low: 1 - progress (falling)
//!    - same type: height relative to the pair's min/max
//!
//! Every branch resolves to a defined value. The function never panics and
//! holds no state, so calling it on every display tick is safe.

use crate::{InterpolationResult, NextTide, TideEvent, TideStatus, TideType, MINUTES_PER_DAY};

/// Prefix applied to the next tide's display time when it falls on a later day.
pub const TOMORROW_MARKER: &str = "내일";

/// Compute the current tide level for `current_minutes` (minutes since local
/// midnight, day offset 0) from a merged today/tomorrow event set.
///
/// # Example
/// ```
/// use tide_level_lib::{interpolator::calculate_tide_level, TideEvent, TideStatus, TideType};
///
/// let events = vec![
///     TideEvent::new("00:00", 0, 0, 0.0, TideType::Low),
///     TideEvent::new("06:00", 360, 0, 100.0, TideType::High),
/// ];
/// let level = calculate_tide_level(&events, 180);
/// assert_eq!(level.percentage, 50);
/// assert_eq!(level.status, TideStatus::Rising);
/// ```
pub fn calculate_tide_level(events: &[TideEvent], current_minutes: i32) -> InterpolationResult {
    let mut sorted: Vec<&TideEvent> = events.iter().filter(|e| e.height.is_finite()).collect();
    // sort_by_key is stable, so ties keep input order
    sorted.sort_by_key(|e| e.abs_minutes);

    if sorted.len() < 2 {
        return InterpolationResult::unknown();
    }

    let next = find_next(&sorted, current_minutes);
    let prev = find_prev(&sorted, current_minutes);

    let prev_abs = prev.abs_minutes as f64;
    let mut next_abs = next.abs_minutes as f64;
    if next_abs <= prev_abs {
        next_abs += MINUTES_PER_DAY as f64;
    }

    let now = current_minutes as f64;
    let total = (next_abs - prev_abs).max(1.0);
    let elapsed = (now - prev_abs).clamp(0.0, total);
    let progress = elapsed / total;

    let current_height = prev.height + (next.height - prev.height) * progress;
    let (percentage, status) = level_for_pair(&prev, &next, progress, current_height);

    let display_time = if next.day_offset >= 1 {
        format!("{} {}", TOMORROW_MARKER, next.time)
    } else {
        next.time.clone()
    };

    InterpolationResult {
        percentage: round_half_up(percentage.clamp(0.0, 100.0)) as u8,
        current_height: round_half_up(current_height) as i32,
        status,
        next_tide: NextTide {
            time: next.time.clone(),
            display_time,
            height: Some(next.height),
            tide_type: Some(next.tide_type),
            day_offset: next.day_offset,
        },
        time_to_next: round_half_up(next_abs - now).max(0.0) as u32,
    }
}

/// First event strictly after now, or tomorrow's repeat of the earliest event.
fn find_next(sorted: &[&TideEvent], current_minutes: i32) -> TideEvent {
    match sorted.iter().find(|e| e.abs_minutes > current_minutes) {
        Some(event) => (*event).clone(),
        None => sorted[0].shifted_days(1),
    }
}

/// Last event at or before now, falling back to yesterday's copy of today's
/// last event, and finally to the earliest event.
fn find_prev(sorted: &[&TideEvent], current_minutes: i32) -> TideEvent {
    if let Some(event) = sorted.iter().rev().find(|e| e.abs_minutes <= current_minutes) {
        return (*event).clone();
    }

    match sorted.iter().rev().find(|e| e.day_offset == 0) {
        Some(last_today) => last_today.shifted_days(-1),
        None => sorted[0].clone(),
    }
}

/// Percentage (unclamped, 0 = low, 100 = high) and direction for a bracketing pair.
fn level_for_pair(prev: &TideEvent, next: &TideEvent, progress: f64, current_height: f64) -> (f64, TideStatus) {
    match (prev.tide_type, next.tide_type) {
        (TideType::Low, TideType::High) => (progress * 100.0, TideStatus::Rising),
        (TideType::High, TideType::Low) => ((1.0 - progress) * 100.0, TideStatus::Falling),
        _ => {
            // Two highs or two lows in a row: sparse or irregular data
            let min_h = prev.height.min(next.height);
            let max_h = prev.height.max(next.height);
            let percentage = if max_h > min_h {
                (current_height - min_h) / (max_h - min_h) * 100.0
            } else {
                50.0
            };
            let status = if next.height >= prev.height {
                TideStatus::Rising
            } else {
                TideStatus::Falling
            };
            (percentage, status)
        }
    }
}

/// Round to the nearest integer with ties toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low(abs: i32, height: f64) -> TideEvent {
        let day = abs.div_euclid(MINUTES_PER_DAY);
        let minutes = abs.rem_euclid(MINUTES_PER_DAY);
        TideEvent::new(&format!("{:02}:{:02}", minutes / 60, minutes % 60), minutes, day, height, TideType::Low)
    }

    fn high(abs: i32, height: f64) -> TideEvent {
        TideEvent {
            tide_type: TideType::High,
            ..low(abs, height)
        }
    }

    #[test]
    fn test_low_to_high_midpoint() {
        let events = vec![low(0, 0.0), high(360, 100.0)];
        let level = calculate_tide_level(&events, 180);

        assert_eq!(level.percentage, 50);
        assert_eq!(level.current_height, 50);
        assert_eq!(level.status, TideStatus::Rising);
        assert_eq!(level.next_tide.time, "06:00");
        assert_eq!(level.next_tide.display_time, "06:00");
        assert_eq!(level.next_tide.tide_type, Some(TideType::High));
        assert_eq!(level.time_to_next, 180);
    }

    #[test]
    fn test_high_to_low_midpoint() {
        let events = vec![high(0, 100.0), low(360, 0.0)];
        let level = calculate_tide_level(&events, 180);

        assert_eq!(level.percentage, 50);
        assert_eq!(level.current_height, 50);
        assert_eq!(level.status, TideStatus::Falling);
    }

    #[test]
    fn test_high_to_low_early_in_segment_is_mostly_full() {
        let events = vec![high(0, 300.0), low(400, 100.0)];
        let level = calculate_tide_level(&events, 100);

        assert_eq!(level.percentage, 75);
        assert_eq!(level.current_height, 250);
        assert_eq!(level.status, TideStatus::Falling);
    }

    #[test]
    fn test_insufficient_data_returns_unknown() {
        assert_eq!(calculate_tide_level(&[], 600), InterpolationResult::unknown());
        assert_eq!(calculate_tide_level(&[high(360, 100.0)], 600), InterpolationResult::unknown());
    }

    #[test]
    fn test_non_finite_heights_are_ignored() {
        let events = vec![low(0, 0.0), high(360, f64::NAN)];
        assert_eq!(calculate_tide_level(&events, 180), InterpolationResult::unknown());
    }

    #[test]
    fn test_after_last_event_wraps_to_tomorrow() {
        let events = vec![low(300, 50.0), high(700, 300.0), low(1100, 60.0)];
        let level = calculate_tide_level(&events, 1300);

        // Earliest event repeated tomorrow: 300 + 1440
        assert_eq!(level.time_to_next, 1740 - 1300);
        assert_eq!(level.next_tide.day_offset, 1);
        assert_eq!(level.next_tide.display_time, "내일 05:00");
        assert_eq!(level.next_tide.tide_type, Some(TideType::Low));
        // low → low segment, falling slightly
        assert_eq!(level.status, TideStatus::Falling);
    }

    #[test]
    fn test_before_first_event_uses_yesterday() {
        // Today's last tide is a high at 22:00; early morning should see a
        // high (yesterday 22:00 = -120) falling to the low at 04:00.
        let events = vec![low(240, 0.0), high(1320, 100.0)];
        let level = calculate_tide_level(&events, 60);

        // 180 of 360 minutes elapsed
        assert_eq!(level.percentage, 50);
        assert_eq!(level.current_height, 50);
        assert_eq!(level.status, TideStatus::Falling);
        assert_eq!(level.time_to_next, 180);
    }

    #[test]
    fn test_before_first_event_without_today_data() {
        // Only tomorrow's events are known: previous falls back to the earliest
        let events = vec![low(1500, 0.0), high(1860, 100.0)];
        let level = calculate_tide_level(&events, 600);

        assert_eq!(level.next_tide.time, "01:00");
        assert_eq!(level.next_tide.display_time, "내일 01:00");
        // prev and next are the same event, so next is pushed a further day out
        assert_eq!(level.time_to_next, 1500 + 1440 - 600);
        assert_eq!(level.percentage, 50);
        assert_eq!(level.current_height, 0);
        assert_eq!(level.status, TideStatus::Rising);
    }

    #[test]
    fn test_same_type_pair_uses_height_range() {
        let events = vec![high(0, 200.0), high(400, 300.0)];
        let level = calculate_tide_level(&events, 100);

        assert_eq!(level.current_height, 225);
        assert_eq!(level.percentage, 25);
        assert_eq!(level.status, TideStatus::Rising);
    }

    #[test]
    fn test_same_type_equal_heights_is_half() {
        let events = vec![low(0, 80.0), low(400, 80.0)];
        let level = calculate_tide_level(&events, 100);

        assert_eq!(level.percentage, 50);
        assert_eq!(level.current_height, 80);
        assert_eq!(level.status, TideStatus::Rising);
    }

    #[test]
    fn test_coincident_events_do_not_divide_by_zero() {
        let events = vec![low(300, 0.0), high(300, 100.0), low(900, 10.0)];
        let level = calculate_tide_level(&events, 300);

        assert!(level.percentage <= 100);
        assert_eq!(level.next_tide.time, "15:00");
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let events = vec![high(360, 100.0), low(0, 0.0)];
        let level = calculate_tide_level(&events, 90);

        assert_eq!(level.percentage, 25);
        assert_eq!(level.status, TideStatus::Rising);
    }

    #[test]
    fn test_exactly_at_event_counts_as_previous() {
        let events = vec![low(0, 0.0), high(360, 100.0), low(720, 0.0)];
        let level = calculate_tide_level(&events, 360);

        assert_eq!(level.percentage, 100);
        assert_eq!(level.status, TideStatus::Falling);
        assert_eq!(level.next_tide.time, "12:00");
        assert_eq!(level.time_to_next, 360);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(49.4), 49.0);
    }
}
