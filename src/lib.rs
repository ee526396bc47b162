//! # Tide Level Core Library
//!
//! This library turns a handful of daily high/low tide events into a smooth
//! "current tide level" indicator for a single, fixed coastal station.
//!
//! ## Design Philosophy
//!
//! ### Graceful Degradation
//! Tide tables arrive from external scrapers and hand-edited JSON files, so the
//! core never fails:
//! - **Malformed records** are dropped during normalization
//! - **Sparse data** (fewer than two events) yields a well-defined "unknown" result
//! - **Missing tomorrow/yesterday data** is replaced by shifting today's events ±24 h
//!
//! ### Timeline Model
//! Every event is placed on a single absolute minute axis:
//! - `abs_minutes = day_offset * 1440 + minutes`
//! - Day offset 0 is "today" at the station, 1 is "tomorrow", -1 a synthesized "yesterday"
//! - The current time is always expressed as minutes since local midnight (day 0)
//!
//! ### Data Flow
//! 1. **Load**: today (and optionally tomorrow) JSON → [`TideDay`]
//! 2. **Normalize**: [`events::collect_events`] → flat [`TideEvent`] list
//! 3. **Interpolate**: [`interpolator::calculate_tide_level`] → [`InterpolationResult`]
//! 4. **Present**: [`overview::build_overview`] → renderer-facing DTO
//!
//! ## Core Types
//! - [`RawTideRecord`] / [`TideDay`]: the external input shape
//! - [`TideEvent`]: a normalized, day-qualified tide event
//! - [`InterpolationResult`]: percentage, height, status and next tide

use serde::{Deserialize, Serialize};
use serde_json::Value;

// Module declarations
pub mod clock;
pub mod config;
pub mod events;
pub mod fallback;
pub mod interpolator;
pub mod overview;
pub mod renderer;
pub mod sun;
pub mod tide_data;

#[cfg(test)]
mod tests;

/// Minutes in one civil day; the unit of every wraparound shift.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Placeholder shown wherever a time is not known.
pub const UNKNOWN_TIME: &str = "--:--";

/// A single high or low tide entry exactly as supplied by the data source.
///
/// Both fields are kept as raw JSON values. Upstream files are known to carry
/// `"--"` heights, numeric strings, or missing times; the normalizer decides
/// what is usable, so deserializing a day never fails because of one record.
///
/// # Example
/// ```
/// use tide_level_lib::RawTideRecord;
///
/// let record: RawTideRecord = serde_json::from_str(r#"{"time":"06:30","height":350}"#).unwrap();
/// assert_eq!(record.time, "06:30");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTideRecord {
    /// Expected to be an `"HH:MM"` string
    #[serde(default)]
    pub time: Value,
    /// Water level in centimetres, as a number or numeric string
    #[serde(default)]
    pub height: Value,
}

impl RawTideRecord {
    /// Convenience constructor for well-formed records.
    pub fn new(time: &str, height: f64) -> Self {
        RawTideRecord {
            time: Value::from(time),
            height: Value::from(height),
        }
    }
}

/// One calendar day of tide data for the station.
///
/// Accepts both the snake_case daily files and the camelCase keys written by
/// the monthly scraper.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TideDay {
    #[serde(default, alias = "highTides")]
    pub high_tides: Vec<RawTideRecord>,
    #[serde(default, alias = "lowTides")]
    pub low_tides: Vec<RawTideRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<String>,
    /// Display-only date label, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub korean_date: Option<String>,
}

/// Whether an event is a high or a low water mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideType {
    High,
    Low,
}

/// A normalized tide event on the absolute minute timeline.
///
/// Events are immutable once built. The interpolator only ever derives
/// shifted copies of them for wraparound reasoning.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TideEvent {
    /// Original `"HH:MM"` string, kept for display
    pub time: String,
    /// Minutes since local midnight (0..=1439)
    pub minutes: i32,
    /// 0 = today, 1 = tomorrow, -1 = synthesized yesterday
    pub day_offset: i32,
    /// `day_offset * 1440 + minutes`
    pub abs_minutes: i32,
    /// Water level in centimetres
    pub height: f64,
    #[serde(rename = "type")]
    pub tide_type: TideType,
}

impl TideEvent {
    /// Build an event, deriving `abs_minutes` from `day_offset` and `minutes`.
    pub fn new(time: &str, minutes: i32, day_offset: i32, height: f64, tide_type: TideType) -> Self {
        TideEvent {
            time: time.to_string(),
            minutes,
            day_offset,
            abs_minutes: day_offset * MINUTES_PER_DAY + minutes,
            height,
            tide_type,
        }
    }

    /// A copy of this event moved by whole days along the timeline.
    pub fn shifted_days(&self, days: i32) -> Self {
        TideEvent {
            day_offset: self.day_offset + days,
            abs_minutes: self.abs_minutes + days * MINUTES_PER_DAY,
            ..self.clone()
        }
    }
}

/// Direction the water is currently moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideStatus {
    Rising,
    Falling,
    Unknown,
}

/// The upcoming tide event as presented to the renderer.
///
/// When no data is available this is the sentinel returned by
/// [`NextTide::unknown`]: time `--:--`, no height and no type. A missing
/// type is written as `"unknown"` on the wire.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTide {
    pub time: String,
    /// `time`, prefixed with a "tomorrow" marker when the event is on a later day
    pub display_time: String,
    pub height: Option<f64>,
    #[serde(rename = "type", serialize_with = "serialize_next_type")]
    pub tide_type: Option<TideType>,
    pub day_offset: i32,
}

fn serialize_next_type<S: serde::Serializer>(tide_type: &Option<TideType>, serializer: S) -> Result<S::Ok, S::Error> {
    match tide_type {
        Some(tide_type) => tide_type.serialize(serializer),
        None => serializer.serialize_str("unknown"),
    }
}

impl NextTide {
    pub fn unknown() -> Self {
        NextTide {
            time: UNKNOWN_TIME.to_string(),
            display_time: UNKNOWN_TIME.to_string(),
            height: None,
            tide_type: None,
            day_offset: 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.tide_type.is_none()
    }
}

/// Output of the tide interpolator.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationResult {
    /// Position within the current low/high swing, 0..=100
    pub percentage: u8,
    /// Interpolated water level in centimetres
    pub current_height: i32,
    pub status: TideStatus,
    pub next_tide: NextTide,
    /// Minutes until `next_tide`
    pub time_to_next: u32,
}

impl InterpolationResult {
    /// The degraded result used when fewer than two valid events exist.
    ///
    /// # Example
    /// ```
    /// use tide_level_lib::{InterpolationResult, TideStatus};
    ///
    /// let unknown = InterpolationResult::unknown();
    /// assert_eq!(unknown.percentage, 50);
    /// assert_eq!(unknown.status, TideStatus::Unknown);
    /// ```
    pub fn unknown() -> Self {
        InterpolationResult {
            percentage: 50,
            current_height: 0,
            status: TideStatus::Unknown,
            next_tide: NextTide::unknown(),
            time_to_next: 0,
        }
    }
}
