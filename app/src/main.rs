// In app/src/main.rs

use anyhow::Result;
use api_client::{CachedProvider, YahooClient};
use app_config::Settings;
use chrono::{FixedOffset, Offset, Utc};
use clap::{Parser, Subcommand};
use core_types::Interval;
use engine::{DashboardSnapshot, Engine, IntervalReport};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::prelude::*;
use web_server::render::accuracy_label;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A Bank Nifty technical signal dashboard.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Starts the web dashboard.
    Serve,

    /// Runs the pipeline once and prints the tables to the console.
    Report {
        /// Only report this interval (e.g., "5m", "15m", "60m").
        #[arg(short, long)]
        interval: Option<Interval>,

        /// Number of most recent rows to print. Defaults to `dashboard.table_rows`.
        #[arg(short, long)]
        rows: Option<usize>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;
    init_tracing(&settings);
    tracing::info!(environment = %settings.app.environment, "Application settings loaded successfully.");

    let engine = build_engine(&settings)?;

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Serve => {
            web_server::run(settings.server.clone(), Arc::new(engine)).await?;
        }
        Commands::Report { interval, rows } => {
            let rows = rows.unwrap_or(settings.dashboard.table_rows);
            handle_report(&engine, interval, rows, settings.dashboard.utc_offset_minutes).await?;
        }
    }

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let level = settings
        .app
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        Targets::new()
            .with_target("hyper", tracing::Level::WARN)
            .with_target("reqwest", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn build_engine(settings: &Settings) -> Result<Engine> {
    let client = YahooClient::new(&settings.provider)?;
    let provider = CachedProvider::new(client, Duration::from_secs(settings.provider.cache_ttl_secs));
    Ok(Engine::from_settings(Arc::new(provider), settings)?)
}

// --- "Report" Subcommand Logic ---

/// Handles the logic for the `report` subcommand.
async fn handle_report(
    engine: &Engine,
    interval: Option<Interval>,
    rows: usize,
    utc_offset_minutes: i32,
) -> Result<()> {
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or(Utc.fix());

    match interval {
        Some(interval) => {
            let report = engine.run_interval(interval).await?;
            print_interval(interval, &report, rows, offset);
        }
        None => {
            let snapshot = engine.run().await;
            print_snapshot(&snapshot, rows, offset);
            if snapshot.failed_panels() == snapshot.panels.len() {
                anyhow::bail!("Every interval failed to load.");
            }
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot, rows: usize, offset: FixedOffset) {
    println!("\n=== {} ({}) ===", snapshot.title, snapshot.symbol);
    println!("Sentiment: {} ({})", snapshot.sentiment.score, snapshot.sentiment.source);

    for panel in &snapshot.panels {
        match (panel.report(), panel.error()) {
            (Some(report), _) => print_interval(panel.interval, report, rows, offset),
            (None, Some(error)) => {
                println!("\n--- Timeframe: {} ---", panel.label);
                println!("  Data unavailable: {error}");
            }
            (None, None) => {}
        }
    }
}

/// Helper function to print one interval's table.
fn print_interval(interval: Interval, report: &IntervalReport, rows: usize, offset: FixedOffset) {
    println!("\n--- Timeframe: {} ---", interval.label());
    println!("{}", accuracy_label(&report.accuracy));
    println!(
        "{:<17} {:>10} {:>7} {:>10}  {}",
        "Time", "Close", "RSI", "MACD diff", "Signal"
    );

    for row in report.recent(rows) {
        let ind = &row.indicators;
        println!(
            "{:<17} {:>10.2} {:>7} {:>10}  {}",
            ind.bar.timestamp.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string(),
            ind.bar.close,
            ind.rsi.map(|v| format!("{v:.2}")).unwrap_or_else(|| "n/a".into()),
            ind.macd_diff.map(|v| format!("{v:.4}")).unwrap_or_else(|| "n/a".into()),
            row.signal,
        );
    }
}
