//! # Hubconn CLI
//!
//! Command-line interface for the hubconn library.
//! Reads an airport table and a weekly schedule, writes the classified connection tables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hubconn::{BuildOptions, ConnectionSettings, Pipeline};
use log::error;

mod cli;

/// Command-line interface for hubconn
#[derive(Parser, Debug)]
#[command(name = "hubconn")]
#[command(about = "Builds and classifies hub connections from a weekly flight schedule")]
#[command(long_about = "Pairs every arrival at the hub with every departure from it:
  hubconn --airports airports.csv --schedule schedule.csv
  hubconn --airports airports.csv --schedule schedule.csv --hub DOH --output out/

Connections are written to three tables in the output directory:
  valid_connections.csv            # feasible connection time, acceptable detour
  illogical_connections.csv        # feasible connection time, excessive detour
  missed_connections.csv           # connection time just below the minimum

Thresholds come from --config (TOML) and are overridden by the flags below.")]
#[command(version = env!("HUBCONN_VERSION"))]
struct Cli {
    /// Airport coordinates CSV (Code, Latitude, Longitude)
    #[arg(long)]
    airports: PathBuf,

    /// Weekly schedule CSV
    #[arg(long)]
    schedule: PathBuf,

    /// Output directory for the connection tables
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hub airport code
    #[arg(long)]
    hub: Option<String>,

    /// Minimum connection time in minutes
    #[arg(long)]
    min_connect: Option<f64>,

    /// Maximum connection time in minutes
    #[arg(long)]
    max_connect: Option<f64>,

    /// Lower bound of the missed window in minutes, usually negative
    #[arg(long, allow_negative_numbers = true)]
    max_missed: Option<f64>,

    /// Maximum circuity as a multiple of the direct distance
    #[arg(long)]
    max_circuity: Option<f64>,

    /// Maximum extra distance via the hub in kilometers
    #[arg(long)]
    max_abs_circuity: Option<f64>,

    /// Enable dry-run mode (validate inputs without building connections)
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Settings file values with command-line overrides applied
    fn settings(&self) -> Result<ConnectionSettings> {
        let mut settings = match &self.config {
            Some(path) => ConnectionSettings::from_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => ConnectionSettings::default(),
        };

        if let Some(hub) = &self.hub {
            settings.hub = hub.clone();
        }
        let t = &mut settings.thresholds;
        if let Some(v) = self.min_connect {
            t.min_connect_minutes = v;
        }
        if let Some(v) = self.max_connect {
            t.max_connect_minutes = v;
        }
        if let Some(v) = self.max_missed {
            t.max_missed_connect_minutes = v;
        }
        if let Some(v) = self.max_circuity {
            t.max_circuity = v;
        }
        if let Some(v) = self.max_abs_circuity {
            t.max_abs_circuity_km = v;
        }
        Ok(settings)
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr; RUST_LOG still wins over --verbose
    let mut logger = env_logger::Builder::new();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Info);
    }
    logger
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        eprintln!("✈️  Hubconn v{} starting...", env!("HUBCONN_VERSION"));
    }

    let config = cli
        .settings()?
        .to_config()
        .context("invalid connection settings")?;

    let airports = hubconn::io::airports::read_airports(&cli.airports)
        .with_context(|| format!("failed to read airports from {}", cli.airports.display()))?;
    let rows = hubconn::io::schedule::read_schedule(&cli.schedule)
        .with_context(|| format!("failed to read schedule from {}", cli.schedule.display()))?;
    airports
        .get(&config.hub)
        .context("hub is missing from the airport table")?;

    if cli.dry_run {
        eprintln!(
            "🔍 [DRY RUN] Would build connections at {} from {} schedule rows ({} airports) into {}",
            config.hub,
            rows.len(),
            airports.len(),
            cli.output.display()
        );
        return Ok(());
    }

    let progress = cli::ProgressManager::new(&format!("🔗 Building connections at {}", config.hub));
    let options = BuildOptions {
        progress: Some(progress.callback()),
    };
    let report = Pipeline::with_options(&airports, config.clone(), options)
        .run_schedule(&rows)
        .context("failed to build connections")?;
    progress.finish();

    eprintln!("📁 Saving to: {}", cli.output.display());
    let summary = hubconn::write_report(&report, &config, &cli.output)
        .with_context(|| format!("failed to write results to {}", cli.output.display()))?;

    eprintln!(
        "✅ {} valid, {} illogical, {} missed connections",
        summary.valid_connections, summary.illogical_connections, summary.missed_connections
    );
    Ok(())
}
