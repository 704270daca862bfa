//! # Hubconn Library
//!
//! Builds every two-leg connection through a hub airport from a weekly flight
//! schedule, grades each one on connection time and geographic detour, and collapses
//! the per-day results into weekly itineraries.
//!
//! ## Features
//!
//! - **Great-circle circuity**: haversine distances with a per-route memo cache
//! - **Parallel building**: arrivals are paired with departures across a rayon pool
//! - **Three classes**: Logical, Illogical-Feasible and Missed connections
//! - **Week wrap**: Sunday arrivals connect to Monday departures through a synthetic day 8
//! - **Calendar compaction**: one row per itinerary with canonical `1.3.5..` day patterns
//! - **Progress tracking**: optional progress callbacks for custom UIs
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = hubconn::ConnectionSettings::default();
//!     let report = hubconn::build_connections(
//!         Path::new("airports.csv"),
//!         Path::new("schedule.csv"),
//!         &settings,
//!     )?;
//!     hubconn::write_report(&report, &settings.to_config()?, Path::new("out"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Progress Tracking
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = hubconn::BuildOptions {
//!         progress: Some(Arc::new(|done, total| {
//!             println!("Progress: {}/{} arrivals", done, total);
//!         })),
//!     };
//!     hubconn::build_connections_with_options(
//!         Path::new("airports.csv"),
//!         Path::new("schedule.csv"),
//!         &hubconn::ConnectionSettings::default(),
//!         options,
//!     )?;
//!     Ok(())
//! }
//! ```

use std::path::Path;

use log::info;

pub use crate::core::builder::{BuildOptions, CandidateConnection, ProgressCallback};
pub use crate::core::calendar::{DayOfWeek, DayPattern};
pub use crate::core::classifier::{ConnectionClass, Thresholds};
pub use crate::core::compactor::{CompactedItinerary, LegSummary};
pub use crate::core::config::{ConnectionConfig, ConnectionSettings, ThresholdSettings};
pub use crate::core::geodesy::{haversine_distance, AirportCoordinate, AirportTable};
pub use crate::core::pipeline::{ClassCounts, ConnectionReport, Pipeline};
pub use crate::core::preprocess::ScheduleRow;
pub use crate::core::schedule::{FlightLeg, Movement};
pub use crate::io::export::{write_report, ReportSummary};
pub use hubconn_common::{Error, Result};

pub mod core;
pub mod io;

/// Build and classify connections from an airport file and a schedule file
///
/// # Arguments
/// * `airports` - CSV with `Code`, `Latitude` and `Longitude` columns
/// * `schedule` - CSV schedule, one row per flight with a `Dep Day` pattern
/// * `settings` - hub and thresholds
pub fn build_connections(
    airports: &Path,
    schedule: &Path,
    settings: &ConnectionSettings,
) -> Result<ConnectionReport> {
    build_connections_with_options(airports, schedule, settings, BuildOptions::default())
}

/// Build and classify connections with custom options
pub fn build_connections_with_options(
    airports: &Path,
    schedule: &Path,
    settings: &ConnectionSettings,
    options: BuildOptions,
) -> Result<ConnectionReport> {
    let config = settings.to_config()?;
    let table = io::airports::read_airports(airports)?;
    let rows = io::schedule::read_schedule(schedule)?;
    info!(
        "Loaded {} airports and {} schedule rows",
        table.len(),
        rows.len()
    );
    Pipeline::with_options(&table, config, options).run_schedule(&rows)
}
