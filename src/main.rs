use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use upnext_core::scan::scan_events;
use upnext_core::{Report, ScanWindow, UpNextConfig};

#[derive(Parser)]
#[command(name = "upnext")]
#[command(about = "Scan local calendar storage and print upcoming events as JSON")]
struct Cli {
    /// Scan this directory instead of the configured calendar storage root
    #[arg(short, long)]
    calendar_dir: Option<PathBuf>,

    /// Report events up to this many days ahead
    #[arg(short, long)]
    days: Option<i64>,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr so stdout stays a single JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = UpNextConfig::load().context("Could not load configuration")?;
    if let Some(dir) = cli.calendar_dir {
        config.calendar_dir = dir;
    }
    if let Some(days) = cli.days {
        config.future_days = days;
    }

    let zone = config.reference_zone()?;
    let window = ScanWindow::from_run_start(Utc::now(), config.skew_hours, config.future_days);

    let root = config.data_path();
    let events = scan_events(&root, &window, zone)
        .with_context(|| format!("Could not scan {}", root.display()))?;

    let report = Report::new(events);
    println!("{}", report.to_json()?);

    Ok(())
}
