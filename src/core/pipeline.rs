//! End-to-end connection pipeline
//!
//! prepared legs -> split by movement -> build candidates -> classify -> compact

use log::{info, warn};
use serde::Serialize;

use crate::core::builder::{split_by_movement, BuildOptions, ConnectionBuilder};
use crate::core::circuity::CircuityCalculator;
use crate::core::classifier::{classify, ConnectionClass};
use crate::core::compactor::{compact, CompactedItinerary};
use crate::core::config::ConnectionConfig;
use crate::core::geodesy::AirportTable;
use crate::core::preprocess::{prepare_legs, ScheduleRow};
use crate::core::schedule::FlightLeg;
use hubconn_common::Result;

/// Per-day connection counts before compaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub candidates: usize,
    pub logical: usize,
    pub illogical_feasible: usize,
    pub missed: usize,
}

/// Compacted itineraries for each class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionReport {
    pub logical: Vec<CompactedItinerary>,
    pub illogical_feasible: Vec<CompactedItinerary>,
    pub missed: Vec<CompactedItinerary>,
    pub counts: ClassCounts,
}

impl ConnectionReport {
    pub fn get(&self, class: ConnectionClass) -> &[CompactedItinerary] {
        match class {
            ConnectionClass::Logical => &self.logical,
            ConnectionClass::IllogicalFeasible => &self.illogical_feasible,
            ConnectionClass::Missed => &self.missed,
        }
    }
}

/// Runs the connection pipeline for one hub against one coordinate table
pub struct Pipeline<'a> {
    airports: &'a AirportTable,
    config: ConnectionConfig,
    options: BuildOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(airports: &'a AirportTable, config: ConnectionConfig) -> Self {
        Self::with_options(airports, config, BuildOptions::default())
    }

    pub fn with_options(
        airports: &'a AirportTable,
        config: ConnectionConfig,
        options: BuildOptions,
    ) -> Self {
        Self {
            airports,
            config,
            options,
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Pre-process raw schedule rows, then run
    pub fn run_schedule(&self, rows: &[ScheduleRow]) -> Result<ConnectionReport> {
        let legs = prepare_legs(rows, &self.config.hub)?;
        self.run(legs)
    }

    /// Build, classify and compact connections from pre-processed legs
    ///
    /// Fails with `NotFound` when the hub or any airport of a candidate pair is
    /// missing from the coordinate table.
    pub fn run(&self, legs: Vec<FlightLeg>) -> Result<ConnectionReport> {
        let hub = self.config.hub.as_str();
        self.airports.get(hub)?;

        let detached = legs
            .iter()
            .filter(|leg| leg.origin != hub && leg.destination != hub)
            .count();
        if detached > 0 {
            warn!("{detached} legs neither depart from nor arrive at {hub}");
        }

        let (arrivals, departures) = split_by_movement(legs);
        info!(
            "Building connections at {hub} from {} arrivals and {} departures",
            arrivals.len(),
            departures.len()
        );

        let calculator = CircuityCalculator::new(self.airports);
        let builder = ConnectionBuilder::with_options(&calculator, self.options.clone());
        let candidates = builder.build(&arrivals, &departures)?;
        let classified = classify(&candidates, &self.config.thresholds);

        let counts = ClassCounts {
            candidates: candidates.len(),
            logical: classified.logical.len(),
            illogical_feasible: classified.illogical_feasible.len(),
            missed: classified.missed.len(),
        };

        let report = ConnectionReport {
            logical: compact(&classified.logical),
            illogical_feasible: compact(&classified.illogical_feasible),
            missed: compact(&classified.missed),
            counts,
        };
        info!(
            "Compacted into {} logical, {} illogical and {} missed itineraries",
            report.logical.len(),
            report.illogical_feasible.len(),
            report.missed.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::Thresholds;
    use crate::core::geodesy::AirportCoordinate;
    use crate::core::schedule::Movement;
    use crate::core::test_support::leg;
    use hubconn_common::Error;

    fn config() -> ConnectionConfig {
        ConnectionConfig {
            hub: "HUB".to_string(),
            thresholds: Thresholds::from_minutes(60.0, 240.0, -120.0, 1.5, 1200.0).unwrap(),
        }
    }

    fn table(b_longitude: f64) -> AirportTable {
        [
            AirportCoordinate::new("HUB", 0.0, 0.0),
            AirportCoordinate::new("A", 0.0, 10.0),
            AirportCoordinate::new("B", 0.0, b_longitude),
        ]
        .into_iter()
        .collect()
    }

    fn legs(departure: f64) -> Vec<FlightLeg> {
        vec![
            leg("A", "HUB", 1, Movement::Arrival, 1.30, 1.40),
            leg("HUB", "B", 1, Movement::Departure, departure, departure + 0.1),
        ]
    }

    #[test]
    fn test_collinear_connection_is_logical() {
        let airports = table(-10.0);
        let report = Pipeline::new(&airports, config()).run(legs(1.45)).unwrap();

        assert_eq!(report.logical.len(), 1);
        assert!(report.illogical_feasible.is_empty());
        assert!(report.missed.is_empty());
        let itinerary = &report.logical[0];
        assert!((itinerary.connection_minutes() - 72.0).abs() < 1e-6);
        assert!((itinerary.circuity_ratio - 1.0).abs() < 1e-9);
        assert!(itinerary.absolute_circuity.abs() < 1e-6);
    }

    #[test]
    fn test_short_connection_is_missed() {
        let airports = table(-10.0);
        let report = Pipeline::new(&airports, config()).run(legs(1.401)).unwrap();

        assert!(report.logical.is_empty());
        assert!(report.illogical_feasible.is_empty());
        assert_eq!(report.missed.len(), 1);
        assert_eq!(report.counts.missed, 1);
    }

    #[test]
    fn test_backtracking_connection_is_illogical() {
        // B beyond A as seen from the hub: A -> HUB -> B flies 3x the direct distance
        let airports = table(20.0);
        let report = Pipeline::new(&airports, config()).run(legs(1.45)).unwrap();

        assert!(report.logical.is_empty());
        assert_eq!(report.illogical_feasible.len(), 1);
        let itinerary = &report.illogical_feasible[0];
        assert!(itinerary.circuity_ratio > 1.5);
        assert!(itinerary.absolute_circuity > 1200.0);
    }

    #[test]
    fn test_unknown_hub_is_not_found() {
        let airports = table(-10.0);
        let config = ConnectionConfig {
            hub: "XXX".to_string(),
            ..config()
        };
        let result = Pipeline::new(&airports, config).run(legs(1.45));
        assert!(matches!(result, Err(Error::NotFound(code)) if code == "XXX"));
    }

    #[test]
    fn test_empty_schedule_gives_empty_report() {
        let airports = table(-10.0);
        let report = Pipeline::new(&airports, config()).run(Vec::new()).unwrap();
        assert_eq!(report, ConnectionReport::default());
    }

    #[test]
    fn test_run_schedule_folds_week_wrap() {
        let airports = table(-10.0);
        let row = |origin: &str, destination: &str, std: &str, days: &str| ScheduleRow {
            airline: "XY".to_string(),
            flight_number: "1".to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            std_utc: std.to_string(),
            sta_utc: "00:00".to_string(),
            std_local: std.to_string(),
            sta_local: "00:00".to_string(),
            block_hours: "01:00".to_string(),
            days: days.to_string(),
            equipment: "320".to_string(),
            seats: 150,
        };
        // Sunday 21:00 + 1h lands 22:00; Monday 00:30 departure is 150 minutes later
        let rows = vec![
            row("A", "HUB", "21:00", "......7"),
            row("HUB", "B", "00:30", "1......"),
        ];

        let report = Pipeline::new(&airports, config()).run_schedule(&rows).unwrap();

        assert_eq!(report.logical.len(), 1);
        let itinerary = &report.logical[0];
        assert_eq!(itinerary.inbound_days.to_string(), "......7");
        assert_eq!(itinerary.outbound_days.to_string(), "1......");
        assert!((itinerary.connection_minutes() - 150.0).abs() < 1e-6);
    }
}
