//! Connection table and summary writers
//!
//! Each class is written to its own CSV file in the output directory:
//!
//! | class              | file                        |
//! |--------------------|-----------------------------|
//! | Logical            | `valid_connections.csv`     |
//! | Missed             | `missed_connections.csv`    |
//! | Illogical-Feasible | `illogical_connections.csv` |
//!
//! `summary.json` carries the headline statistics of the valid connections and the
//! parameters they were built with.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::core::classifier::{ConnectionClass, Thresholds};
use crate::core::compactor::CompactedItinerary;
use crate::core::config::ConnectionConfig;
use crate::core::pipeline::ConnectionReport;
use crate::core::time::{format_clock, fraction_to_minutes};
use hubconn_common::{Error, Result};

pub const SUMMARY_FILE: &str = "summary.json";

/// Output file name for a connection class
pub fn file_name(class: ConnectionClass) -> &'static str {
    match class {
        ConnectionClass::Logical => "valid_connections.csv",
        ConnectionClass::IllogicalFeasible => "illogical_connections.csv",
        ConnectionClass::Missed => "missed_connections.csv",
    }
}

/// Column headers of every connection table
pub const HEADERS: [&str; 26] = [
    "Inbound Airline",
    "Inbound Flt no",
    "Inbound Orig Airp",
    "Inbound STD (UTC)",
    "Inbound STD (Local)",
    "Via",
    "Inbound STA (UTC)",
    "Inbound STA (Local)",
    "Inbound Block Hrs",
    "Inbound Dep Day (UTC)",
    "Inbound Equip",
    "Inbound Seats",
    "Outbound Airline",
    "Outbound Flt no",
    "Outbound STD (UTC)",
    "Outbound STD (Local)",
    "Outbound Dest Airp",
    "Outbound STA (UTC)",
    "Outbound STA (Local)",
    "Outbound Block Hrs",
    "Outbound Dep Day (UTC)",
    "Outbound Equip",
    "Outbound Seats",
    "Connection Time (min)",
    "Circuity x",
    "Circuity (abs)",
];

/// One table row, fields in [`HEADERS`] order
#[derive(Debug, Serialize)]
struct ConnectionRecord<'a> {
    inbound_airline: &'a str,
    inbound_flight: &'a str,
    inbound_origin: &'a str,
    inbound_std_utc: String,
    inbound_std_local: String,
    via: &'a str,
    inbound_sta_utc: String,
    inbound_sta_local: String,
    inbound_block: String,
    inbound_days: String,
    inbound_equipment: &'a str,
    inbound_seats: u32,
    outbound_airline: &'a str,
    outbound_flight: &'a str,
    outbound_std_utc: String,
    outbound_std_local: String,
    outbound_destination: &'a str,
    outbound_sta_utc: String,
    outbound_sta_local: String,
    outbound_block: String,
    outbound_days: String,
    outbound_equipment: &'a str,
    outbound_seats: u32,
    connection_minutes: i64,
    circuity_ratio: String,
    absolute_circuity: String,
}

impl<'a> From<&'a CompactedItinerary> for ConnectionRecord<'a> {
    fn from(it: &'a CompactedItinerary) -> Self {
        let (i, o) = (&it.inbound, &it.outbound);
        Self {
            inbound_airline: &i.airline,
            inbound_flight: &i.flight_number,
            inbound_origin: &i.origin,
            inbound_std_utc: format_clock(i.std_utc),
            inbound_std_local: format_clock(i.std_local),
            via: it.via(),
            inbound_sta_utc: format_clock(i.sta_utc),
            inbound_sta_local: format_clock(i.sta_local),
            inbound_block: format_clock(i.block),
            inbound_days: it.inbound_days.to_string(),
            inbound_equipment: &i.equipment,
            inbound_seats: i.seats,
            outbound_airline: &o.airline,
            outbound_flight: &o.flight_number,
            outbound_std_utc: format_clock(o.std_utc),
            outbound_std_local: format_clock(o.std_local),
            outbound_destination: &o.destination,
            outbound_sta_utc: format_clock(o.sta_utc),
            outbound_sta_local: format_clock(o.sta_local),
            outbound_block: format_clock(o.block),
            outbound_days: it.outbound_days.to_string(),
            outbound_equipment: &o.equipment,
            outbound_seats: o.seats,
            connection_minutes: it.connection_minutes().round() as i64,
            circuity_ratio: format!("{:.3}", rounded(it.circuity_ratio, 3)),
            absolute_circuity: format!("{:.1}", rounded(it.absolute_circuity, 1)),
        }
    }
}

/// Round to `decimals` places without producing a negative zero
fn rounded(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale + 0.0
}

/// Write one connection table as CSV; an empty table still gets its header row
pub fn write_connections<W: Write>(writer: W, itineraries: &[CompactedItinerary]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(HEADERS).map_err(|e| Error::IoError(e.into()))?;
    for itinerary in itineraries {
        csv.serialize(ConnectionRecord::from(itinerary))
            .map_err(|e| Error::IoError(e.into()))?;
    }
    csv.flush()?;
    Ok(())
}

/// Headline statistics of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub valid_connections: usize,
    /// `None` when there is no valid connection
    pub median_connection_minutes: Option<f64>,
    /// Median detour over the direct distance, in percent
    pub median_circuity_percent: Option<f64>,
    pub median_circuity_km: Option<f64>,
    pub missed_connections: usize,
    pub illogical_connections: usize,
    pub hub: String,
    pub parameters: Vec<String>,
}

impl ReportSummary {
    pub fn new(report: &ConnectionReport, config: &ConnectionConfig) -> Self {
        let valid = &report.logical;
        let median_of = |f: fn(&CompactedItinerary) -> f64| median(valid.iter().map(f).collect());

        Self {
            valid_connections: valid.len(),
            median_connection_minutes: median_of(CompactedItinerary::connection_minutes)
                .map(f64::round),
            median_circuity_percent: median_of(|it| it.circuity_ratio)
                .map(|ratio| ((ratio - 1.0) * 100.0).round()),
            median_circuity_km: median_of(|it| it.absolute_circuity).map(f64::round),
            missed_connections: report.missed.len(),
            illogical_connections: report.illogical_feasible.len(),
            hub: config.hub.clone(),
            parameters: parameter_sentences(&config.thresholds),
        }
    }
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}

/// Human-readable description of the thresholds
pub fn parameter_sentences(thresholds: &Thresholds) -> Vec<String> {
    let min = fraction_to_minutes(thresholds.min_connect_time());
    let max = fraction_to_minutes(thresholds.max_connect_time());
    let missed = fraction_to_minutes(thresholds.max_missed_time());
    vec![
        format!("CTs are considered valid between {min:.0} and {max:.0} minutes"),
        format!(
            "CTs are considered missed between {missed:.0} and {:.0} minutes",
            min - 1.0
        ),
        format!(
            "Circuity considered valid if not exceeding {}x & {}km vs. direct GC distance",
            thresholds.max_circuity(),
            thresholds.max_abs_circuity_km()
        ),
    ]
}

/// Write the three connection tables and the summary into `dir`, creating it if needed
pub fn write_report(
    report: &ConnectionReport,
    config: &ConnectionConfig,
    dir: &Path,
) -> Result<ReportSummary> {
    fs::create_dir_all(dir)?;

    for class in [
        ConnectionClass::Logical,
        ConnectionClass::Missed,
        ConnectionClass::IllogicalFeasible,
    ] {
        let path = dir.join(file_name(class));
        write_connections(File::create(&path)?, report.get(class))?;
        info!(
            "Wrote {} {} connections to {}",
            report.get(class).len(),
            class.as_str(),
            path.display()
        );
    }

    let summary = ReportSummary::new(report, config);
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| Error::invalid_input(format!("cannot encode summary: {e}")))?;
    fs::write(dir.join(SUMMARY_FILE), json)?;
    Ok(summary)
}
