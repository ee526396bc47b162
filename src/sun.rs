//! Sunrise/sunset window classification for the station's current time.

use crate::{events::parse_hhmm, UNKNOWN_TIME};
use serde::Serialize;

/// Where the current time sits relative to today's sunrise and sunset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SunPhase {
    BeforeSunrise,
    Daytime,
    AfterSunset,
    Unknown,
}

/// Sun phase plus the time worth showing next to it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SunStatus {
    pub phase: SunPhase,
    /// Upcoming sunrise before dawn and after dusk, sunset during the day
    pub time: String,
}

/// Classify `current_minutes` against today's sunrise and sunset.
///
/// Missing or malformed times give [`SunPhase::Unknown`].
pub fn sun_status(sunrise: Option<&str>, sunset: Option<&str>, current_minutes: i32) -> SunStatus {
    let (Some(rise), Some(set)) = (sunrise, sunset) else {
        return unknown();
    };
    let (Some(rise_min), Some(set_min)) = (parse_hhmm(rise), parse_hhmm(set)) else {
        return unknown();
    };

    let (phase, time) = if current_minutes < rise_min as i32 {
        (SunPhase::BeforeSunrise, rise)
    } else if current_minutes < set_min as i32 {
        (SunPhase::Daytime, set)
    } else {
        (SunPhase::AfterSunset, rise)
    };

    SunStatus {
        phase,
        time: time.to_string(),
    }
}

fn unknown() -> SunStatus {
    SunStatus {
        phase: SunPhase::Unknown,
        time: UNKNOWN_TIME.to_string(),
    }
}
