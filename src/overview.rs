//! Renderer-facing overview of the station's current ocean state.
//!
//! [`build_overview`] is the single place where a data snapshot and the
//! station clock are combined: it normalizes the events, runs the
//! interpolator and the sun classifier, and packs everything a display needs
//! into one serializable value.

use crate::{
    clock::minutes_since_midnight,
    events::collect_events,
    interpolator::calculate_tide_level,
    sun::{sun_status, SunStatus},
    tide_data::{DataSource, TideSnapshot},
    InterpolationResult, RawTideRecord, TideEvent, UNKNOWN_TIME,
};
use chrono::{DateTime, Datelike, FixedOffset};
use serde::Serialize;

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OceanOverview {
    pub date: String,
    /// Station-local `HH:MM`
    pub current_time: String,
    pub location: String,
    /// Today's raw records, passed through for tabular display
    pub high_tides: Vec<RawTideRecord>,
    pub low_tides: Vec<RawTideRecord>,
    /// Today's valid events in time order
    pub schedule: Vec<TideEvent>,
    pub sunrise: String,
    pub sunset: String,
    pub tide_level: InterpolationResult,
    pub sun_status: SunStatus,
    pub source: DataSource,
}

/// Combine a snapshot with the station-local time into an overview.
pub fn build_overview(snapshot: &TideSnapshot, now: &DateTime<FixedOffset>, location: &str) -> OceanOverview {
    let today = &snapshot.today;
    let current_minutes = minutes_since_midnight(now);

    let events = collect_events(today, snapshot.tomorrow.as_ref());
    let tide_level = calculate_tide_level(&events, current_minutes);

    let mut schedule: Vec<TideEvent> = events.into_iter().filter(|e| e.day_offset == 0).collect();
    schedule.sort_by_key(|e| e.abs_minutes);

    let date = today
        .korean_date
        .clone()
        .unwrap_or_else(|| korean_date(now));

    OceanOverview {
        date,
        current_time: now.format("%H:%M").to_string(),
        location: location.to_string(),
        high_tides: today.high_tides.clone(),
        low_tides: today.low_tides.clone(),
        schedule,
        sunrise: display_time(today.sunrise.as_deref()),
        sunset: display_time(today.sunset.as_deref()),
        tide_level,
        sun_status: sun_status(today.sunrise.as_deref(), today.sunset.as_deref(), current_minutes),
        source: snapshot.source,
    }
}

/// Weekday initials, Sunday first.
const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Station-local date as `2025년 7월 24일 (목)`.
fn korean_date(now: &DateTime<FixedOffset>) -> String {
    let weekday = WEEKDAYS[now.weekday().num_days_from_sunday() as usize];
    format!("{}년 {}월 {}일 ({})", now.year(), now.month(), now.day(), weekday)
}

fn display_time(time: Option<&str>) -> String {
    time.unwrap_or(UNKNOWN_TIME).to_string()
}
