//! # Tide Data Loading
//!
//! This module fetches the daily tide JSON files the interpolator works from.
//! It has no caching: every refresh produces a brand-new [`TideSnapshot`] that
//! replaces the previous one wholesale, so the interpolator never sees a mix
//! of two refresh cycles.
//!
//! ## Data Sources
//!
//! Each configured source is either:
//! - **URL** (`http://` or `https://`): fetched with `reqwest`, `Cache-Control: no-store`
//! - **Path**: anything else, read from the local filesystem
//!
//! The expected JSON shape is [`TideDay`]:
//! ```json
//! {
//!   "high_tides": [{ "time": "06:30", "height": 350 }],
//!   "low_tides":  [{ "time": "12:20", "height": 80 }],
//!   "sunrise": "06:30", "sunset": "18:45"
//! }
//! ```
//!
//! ## Fallback Cascade
//!
//! [`load`] never fails:
//! 1. **Primary**: today (required) + tomorrow (optional), fetched concurrently
//! 2. **Legacy**: a single older `tide.json`, without tomorrow data
//! 3. **Sample**: built-in [`fallback::sample_day`]
//!
//! All errors propagate through the `TideError` enum until the cascade
//! absorbs them.

use crate::{config::SourceConfig, fallback, TideDay};
use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use std::{io, time::Duration};
use thiserror::Error;

/// Errors that can occur while loading a day of tide data.
#[derive(Error, Debug)]
pub enum TideError {
    /// HTTP request failed (network, timeout, or body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: StatusCode, url: String },

    /// Local file could not be read
    #[error("file IO: {0}")]
    Io(#[from] io::Error),

    /// Body was not a valid tide day
    #[error("invalid tide JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which step of the fallback cascade produced the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Primary,
    Legacy,
    Sample,
}

/// One complete refresh worth of tide data.
#[derive(Clone, Debug, PartialEq)]
pub struct TideSnapshot {
    pub today: TideDay,
    pub tomorrow: Option<TideDay>,
    pub source: DataSource,
}

impl TideSnapshot {
    /// Snapshot built from the built-in sample day.
    pub fn sample() -> Self {
        TideSnapshot {
            today: fallback::sample_day(),
            tomorrow: None,
            source: DataSource::Sample,
        }
    }
}

/// Load a snapshot, walking the fallback cascade on failure.
///
/// # Example
/// ```no_run
/// use tide_level_lib::{config::Config, tide_data};
///
/// # async fn run() {
/// let config = Config::load();
/// let snapshot = tide_data::load(&config.source).await;
/// println!("loaded from {:?}", snapshot.source);
/// # }
/// ```
pub async fn load(config: &SourceConfig) -> TideSnapshot {
    let client = match build_client(config) {
        Ok(client) => client,
        Err(e) => {
            log::warn!("Could not build HTTP client: {e}");
            return TideSnapshot::sample();
        }
    };

    match fetch_with(&client, config).await {
        Ok(snapshot) => return snapshot,
        Err(e) => log::warn!("Tide data load failed for {}: {}", config.today, e),
    }

    if let Some(legacy) = &config.legacy {
        match fetch_day(&client, legacy).await {
            Ok(today) => {
                log::info!("Using legacy tide data from {legacy}");
                return TideSnapshot {
                    today,
                    tomorrow: None,
                    source: DataSource::Legacy,
                };
            }
            Err(e) => log::warn!("Legacy tide data load failed for {legacy}: {e}"),
        }
    }

    log::warn!("Falling back to built-in sample tide data");
    TideSnapshot::sample()
}

/// Fetch today's and tomorrow's data from the primary sources.
///
/// Today is mandatory; a failed tomorrow is logged and treated as absent.
pub async fn fetch(config: &SourceConfig) -> Result<TideSnapshot, TideError> {
    let client = build_client(config)?;
    fetch_with(&client, config).await
}

// -- Private Implementation --

fn build_client(config: &SourceConfig) -> Result<Client, TideError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

async fn fetch_with(client: &Client, config: &SourceConfig) -> Result<TideSnapshot, TideError> {
    let tomorrow_fut = async {
        match &config.tomorrow {
            Some(location) => Some(fetch_day(client, location).await),
            None => None,
        }
    };
    let (today, tomorrow) = tokio::join!(fetch_day(client, &config.today), tomorrow_fut);

    let today = today?;
    let tomorrow = match tomorrow {
        Some(Ok(day)) => Some(day),
        Some(Err(e)) => {
            log::info!("No tomorrow tide data ({e}); midnight wraparound will be estimated");
            None
        }
        None => None,
    };

    log::debug!(
        "Loaded {} high / {} low tides for today, tomorrow present: {}",
        today.high_tides.len(),
        today.low_tides.len(),
        tomorrow.is_some()
    );

    Ok(TideSnapshot {
        today,
        tomorrow,
        source: DataSource::Primary,
    })
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Load and parse one day of tide data from a URL or file path.
async fn fetch_day(client: &Client, location: &str) -> Result<TideDay, TideError> {
    let bytes = if is_url(location) {
        let response = client
            .get(location)
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(TideError::Status {
                status: response.status(),
                url: location.to_string(),
            });
        }
        response.bytes().await?.to_vec()
    } else {
        tokio::fs::read(location).await?
    };

    parse_day(&bytes)
}

/// Parse a tide day from raw JSON bytes.
pub fn parse_day(bytes: &[u8]) -> Result<TideDay, TideError> {
    Ok(serde_json::from_slice(bytes)?)
}
