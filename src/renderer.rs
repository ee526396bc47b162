//! # Terminal Rendering
//!
//! Plain-text rendering of an [`OceanOverview`], used as the development
//! display and for headless kiosks that only have a console. The layout is:
//!
//! ```text
//! 월곶포구 · 2025년 7월 24일 (목) 09:25
//!
//! Tide  [##########----------]  50%  215cm
//!       falling · next 12:20 (low, 175 min)
//!
//!   ▼ low   00:15  120cm
//!   ▲ high  06:30  350cm
//! ...
//! ```

use crate::{
    overview::OceanOverview,
    sun::SunPhase,
    tide_data::DataSource,
    TideStatus, TideType,
};
use std::fmt::Write;

/// Width of the percentage gauge in characters.
const GAUGE_WIDTH: usize = 20;

fn gauge(percentage: u8) -> String {
    let filled = ((percentage as usize * GAUGE_WIDTH + 50) / 100).min(GAUGE_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(GAUGE_WIDTH - filled))
}

fn status_label(status: TideStatus) -> &'static str {
    match status {
        TideStatus::Rising => "rising",
        TideStatus::Falling => "falling",
        TideStatus::Unknown => "unknown",
    }
}

fn type_marker(tide_type: TideType) -> (&'static str, &'static str) {
    match tide_type {
        TideType::High => ("▲", "high"),
        TideType::Low => ("▼", "low"),
    }
}

fn sun_label(phase: SunPhase) -> &'static str {
    match phase {
        SunPhase::BeforeSunrise => "before sunrise",
        SunPhase::Daytime => "daytime, sunset at",
        SunPhase::AfterSunset => "after sunset, sunrise at",
        SunPhase::Unknown => "unknown",
    }
}

/// Format the overview as a multi-line terminal string.
pub fn format_ascii(overview: &OceanOverview) -> String {
    let mut out = String::new();
    let level = &overview.tide_level;

    match overview.source {
        DataSource::Primary => {}
        DataSource::Legacy => out.push_str("⚠ OFFLINE: using legacy tide table\n\n"),
        DataSource::Sample => out.push_str("⚠ OFFLINE: showing sample data, not a forecast\n\n"),
    }

    // Writing into a String cannot fail
    let _ = writeln!(out, "{} · {} {}", overview.location, overview.date, overview.current_time);
    out.push('\n');

    let _ = writeln!(
        out,
        "Tide  {} {:>3}%  {}cm",
        gauge(level.percentage),
        level.percentage,
        level.current_height
    );

    let next = &level.next_tide;
    match next.tide_type {
        Some(tide_type) => {
            let _ = writeln!(
                out,
                "      {} · next {} ({}, {} min)",
                status_label(level.status),
                next.display_time,
                type_marker(tide_type).1,
                level.time_to_next
            );
        }
        None => {
            let _ = writeln!(out, "      {} · next {}", status_label(level.status), next.display_time);
        }
    }
    out.push('\n');

    if overview.schedule.is_empty() {
        out.push_str("  (no tide events today)\n");
    }
    for event in &overview.schedule {
        let (symbol, label) = type_marker(event.tide_type);
        let _ = writeln!(out, "  {} {:<5} {}  {}cm", symbol, label, event.time, event.height);
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "Sun   {} {}   (sunrise {}, sunset {})",
        sun_label(overview.sun_status.phase),
        overview.sun_status.time,
        overview.sunrise,
        overview.sunset
    );

    out
}

/// Render the overview to the terminal.
pub fn draw_ascii(overview: &OceanOverview) {
    print!("{}", format_ascii(overview));
}
