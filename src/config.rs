//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the tide-config.toml file.
//! It provides a centralized way to configure the station, the tide data sources,
//! and the refresh cadence. Every field has a default, so a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file, resolved relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "tide-config.toml";

/// Application configuration loaded from tide-config.toml
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Station identity and local clock
    #[serde(default)]
    pub station: StationConfig,
    /// Where tide JSON files are read from
    #[serde(default)]
    pub source: SourceConfig,
    /// Display and refresh options
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Tide station configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StationConfig {
    /// Human-readable location shown on the overview
    pub name: String,
    /// Station clock offset from UTC in hours (Korea Standard Time = 9)
    pub utc_offset_hours: i32,
}

/// Tide data locations. Each entry is either an `http(s)://` URL or a file path.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Today's high/low tides (required for live data)
    pub today: String,
    /// Tomorrow's high/low tides (optional, enables midnight wraparound)
    pub tomorrow: Option<String>,
    /// Older single-day file tried when today's file cannot be loaded
    pub legacy: Option<String>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

/// Display and refresh configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Minutes between data refreshes in watch mode
    pub refresh_minutes: u64,
}

impl Default for StationConfig {
    fn default() -> Self {
        StationConfig {
            name: "월곶포구".to_string(),
            utc_offset_hours: 9,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            today: "./data/tide_today.json".to_string(),
            tomorrow: Some("./data/tide_tomorrow.json".to_string()),
            legacy: Some("./data/tide.json".to_string()),
            timeout_secs: 10,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { refresh_minutes: 5 }
    }
}

impl Config {
    /// Load configuration from tide-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    log::info!("Loaded configuration for station: {}", config.station.name);
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config file format in {}: {}", path.display(), e);
                    log::warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file at {}, using default configuration", path.display());
                Self::default()
            }
        }
    }
}
