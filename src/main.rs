//! # Tide Level Application Entry Point
//!
//! This binary loads the station's tide tables, computes the current tide
//! level, and prints the overview either as a terminal display or as JSON for
//! an external renderer. In watch mode it refreshes on a fixed interval,
//! replacing the whole data snapshot each cycle.

use clap::Parser;
use std::path::PathBuf;
use tide_level_lib::{
    clock,
    config::{self, Config},
    overview::{build_overview, OceanOverview},
    renderer::draw_ascii,
    tide_data,
};
use tokio::time::{self, Duration};

#[derive(Parser, Debug)]
#[command(name = "tide-level", about = "Current tide level from daily high/low tide tables")]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print the overview as JSON instead of the terminal display.
    #[arg(long)]
    json: bool,

    /// Keep running and refresh every `display.refresh_minutes`.
    #[arg(short, long)]
    watch: bool,
}

fn emit(overview: &OceanOverview, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(overview)?);
    } else {
        draw_ascii(overview);
    }
    Ok(())
}

/// One refresh: load a fresh snapshot and render it against the station clock.
async fn refresh(config: &Config, json: bool) -> anyhow::Result<()> {
    let snapshot = tide_data::load(&config.source).await;
    let now = clock::station_now(config.station.utc_offset_hours);
    let overview = build_overview(&snapshot, &now, &config.station.name);

    log::debug!(
        "Tide level {}% ({:?}), next {} in {} min",
        overview.tide_level.percentage,
        overview.tide_level.status,
        overview.tide_level.next_tide.display_time,
        overview.tide_level.time_to_next
    );

    emit(&overview, json)
}

/// Main application entry point.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load_from_path(&cli.config);

    if !cli.watch {
        return refresh(&config, cli.json).await;
    }

    let minutes = config.display.refresh_minutes.max(1);
    log::info!("Watching tide data, refreshing every {minutes} min");

    let mut ticker = time::interval(Duration::from_secs(minutes * 60));
    loop {
        ticker.tick().await;
        if let Err(e) = refresh(&config, cli.json).await {
            log::error!("Refresh failed: {e}");
        }
    }
}
