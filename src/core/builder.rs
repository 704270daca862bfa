//! Connection building
//!
//! Pairs every arrival with every departure leaving from the airport the arrival lands
//! at. Departures are indexed by origin; with a single hub this is the full cross
//! product of arrivals and departures, so circuity is served from the
//! [`CircuityCalculator`] cache rather than recomputed per pair.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::core::circuity::CircuityCalculator;
use crate::core::schedule::{FlightLeg, Movement};
use hubconn_common::{Error, Result};

/// Progress callback receiving (arrivals processed, total arrivals)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Options for building connections
#[derive(Clone, Default)]
pub struct BuildOptions {
    /// Optional progress callback
    pub progress: Option<ProgressCallback>,
}

/// An inbound leg and an outbound leg meeting at the same airport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateConnection<'a> {
    pub inbound: &'a FlightLeg,
    pub outbound: &'a FlightLeg,
    /// Outbound UTC departure minus inbound UTC arrival, in days; may be negative
    pub connection_time: f64,
    pub circuity_ratio: f64,
    /// Extra distance flown via the connecting airport, in kilometers
    pub absolute_circuity: f64,
}

impl CandidateConnection<'_> {
    /// Airport where the two legs meet
    pub fn via(&self) -> &str {
        &self.inbound.destination
    }
}

/// Builds candidate connections between arrivals and departures
pub struct ConnectionBuilder<'c, 'a> {
    circuity: &'c CircuityCalculator<'a>,
    options: BuildOptions,
}

impl<'c, 'a> ConnectionBuilder<'c, 'a> {
    pub fn new(circuity: &'c CircuityCalculator<'a>) -> Self {
        Self::with_options(circuity, BuildOptions::default())
    }

    pub fn with_options(circuity: &'c CircuityCalculator<'a>, options: BuildOptions) -> Self {
        Self { circuity, options }
    }

    /// Pair every arrival with every departure from its destination
    ///
    /// Self-connections (back to the arrival's own origin) are dropped before circuity
    /// is evaluated. The output order is arrival order, then departure order, whatever
    /// the degree of parallelism.
    pub fn build<'l>(
        &self,
        arrivals: &'l [FlightLeg],
        departures: &'l [FlightLeg],
    ) -> Result<Vec<CandidateConnection<'l>>> {
        check_movement(arrivals, Movement::Arrival)?;
        check_movement(departures, Movement::Departure)?;

        let mut by_origin: HashMap<&str, Vec<&'l FlightLeg>> = HashMap::new();
        for departure in departures {
            by_origin
                .entry(departure.origin.as_str())
                .or_default()
                .push(departure);
        }

        let total = arrivals.len() as u64;
        let done = AtomicU64::new(0);
        let self_connections = AtomicUsize::new(0);

        let per_arrival: Vec<Vec<CandidateConnection<'l>>> = arrivals
            .par_iter()
            .map(|arrival| -> Result<Vec<CandidateConnection<'l>>> {
                let mut pairs = Vec::new();
                if let Some(outbound) = by_origin.get(arrival.destination.as_str()) {
                    for departure in outbound {
                        if arrival.origin == departure.destination {
                            self_connections.fetch_add(1, Ordering::Relaxed);
                            continue;
                        }
                        pairs.push(self.pair(arrival, departure)?);
                    }
                }
                if let Some(progress) = &self.options.progress {
                    let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                    progress(n, total);
                }
                Ok(pairs)
            })
            .collect::<Result<_>>()?;

        let connections: Vec<CandidateConnection<'l>> =
            per_arrival.into_iter().flatten().collect();
        debug!(
            "Built {} candidate connections from {} arrivals x {} departures ({} self-connections dropped)",
            connections.len(),
            arrivals.len(),
            departures.len(),
            self_connections.load(Ordering::Relaxed)
        );
        self.circuity.log_cache_stats();
        Ok(connections)
    }

    fn pair<'l>(
        &self,
        inbound: &'l FlightLeg,
        outbound: &'l FlightLeg,
    ) -> Result<CandidateConnection<'l>> {
        let origin = inbound.origin.as_str();
        let destination = outbound.destination.as_str();
        let hub = inbound.destination.as_str();
        Ok(CandidateConnection {
            inbound,
            outbound,
            connection_time: outbound.utc_departure - inbound.utc_arrival,
            circuity_ratio: self.circuity.circuity_ratio(origin, destination, hub)?,
            absolute_circuity: self.circuity.absolute_circuity(origin, destination, hub)?,
        })
    }
}

fn check_movement(legs: &[FlightLeg], expected: Movement) -> Result<()> {
    match legs.iter().find(|leg| leg.movement != expected) {
        Some(leg) => Err(Error::invalid_input(format!(
            "leg {} is not an {expected:?} leg",
            leg.label()
        ))),
        None => Ok(()),
    }
}

/// Split legs into (arrivals, departures) by movement role, preserving order
pub fn split_by_movement(legs: Vec<FlightLeg>) -> (Vec<FlightLeg>, Vec<FlightLeg>) {
    legs.into_iter()
        .partition(|leg| leg.movement == Movement::Arrival)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geodesy::{AirportCoordinate, AirportTable};
    use crate::core::test_support::leg;
    use std::sync::Mutex;

    fn table() -> AirportTable {
        [
            AirportCoordinate::new("HUB", 0.0, 0.0),
            AirportCoordinate::new("A", 0.0, 10.0),
            AirportCoordinate::new("B", 0.0, -10.0),
            AirportCoordinate::new("C", 10.0, 0.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_cross_product_without_self_connections() {
        let table = table();
        let calc = CircuityCalculator::new(&table);
        let arrivals = vec![
            leg("A", "HUB", 1, Movement::Arrival, 1.30, 1.40),
            leg("B", "HUB", 1, Movement::Arrival, 1.30, 1.40),
        ];
        let departures = vec![
            leg("HUB", "A", 1, Movement::Departure, 1.45, 1.55),
            leg("HUB", "B", 1, Movement::Departure, 1.45, 1.55),
            leg("HUB", "C", 1, Movement::Departure, 1.45, 1.55),
        ];

        let built = ConnectionBuilder::new(&calc)
            .build(&arrivals, &departures)
            .unwrap();

        // 2 x 3 pairs minus A->A and B->B
        assert_eq!(built.len(), 4);
        assert!(built
            .iter()
            .all(|c| c.inbound.origin != c.outbound.destination));
        let routes: Vec<(&str, &str)> = built
            .iter()
            .map(|c| (c.inbound.origin.as_str(), c.outbound.destination.as_str()))
            .collect();
        assert_eq!(routes, vec![("A", "B"), ("A", "C"), ("B", "A"), ("B", "C")]);
        assert_eq!(calc.cached_triples(), 4);
    }

    #[test]
    fn test_connection_time_and_circuity() {
        let table = table();
        let calc = CircuityCalculator::new(&table);
        let arrivals = vec![leg("A", "HUB", 1, Movement::Arrival, 1.30, 1.40)];
        let departures = vec![leg("HUB", "B", 1, Movement::Departure, 1.45, 1.55)];

        let built = ConnectionBuilder::new(&calc)
            .build(&arrivals, &departures)
            .unwrap();

        assert_eq!(built.len(), 1);
        assert!((built[0].connection_time - 0.05).abs() < 1e-12);
        assert!((built[0].circuity_ratio - 1.0).abs() < 1e-9);
        assert_eq!(built[0].via(), "HUB");
    }

    #[test]
    fn test_negative_connection_time_is_kept() {
        let table = table();
        let calc = CircuityCalculator::new(&table);
        let arrivals = vec![leg("A", "HUB", 2, Movement::Arrival, 2.30, 2.40)];
        let departures = vec![leg("HUB", "B", 1, Movement::Departure, 1.45, 1.55)];

        let built = ConnectionBuilder::new(&calc)
            .build(&arrivals, &departures)
            .unwrap();
        assert!(built[0].connection_time < 0.0);
    }

    #[test]
    fn test_missing_airport_aborts_build() {
        let table = table();
        let calc = CircuityCalculator::new(&table);
        let arrivals = vec![leg("ZZZ", "HUB", 1, Movement::Arrival, 1.30, 1.40)];
        let departures = vec![leg("HUB", "B", 1, Movement::Departure, 1.45, 1.55)];

        let result = ConnectionBuilder::new(&calc).build(&arrivals, &departures);
        assert!(matches!(result, Err(Error::NotFound(code)) if code == "ZZZ"));
    }

    #[test]
    fn test_wrong_movement_is_invalid_input() {
        let table = table();
        let calc = CircuityCalculator::new(&table);
        let departures = vec![leg("HUB", "B", 1, Movement::Departure, 1.45, 1.55)];

        let result = ConnectionBuilder::new(&calc).build(&departures, &departures);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_progress_reports_every_arrival() {
        let table = table();
        let calc = CircuityCalculator::new(&table);
        let arrivals = vec![
            leg("A", "HUB", 1, Movement::Arrival, 1.30, 1.40),
            leg("B", "HUB", 1, Movement::Arrival, 1.30, 1.40),
            leg("C", "HUB", 1, Movement::Arrival, 1.30, 1.40),
        ];
        let departures = vec![leg("HUB", "B", 1, Movement::Departure, 1.45, 1.55)];

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let options = BuildOptions {
            progress: Some(Arc::new(move |done, total| {
                sink.lock().unwrap().push((done, total));
            })),
        };

        ConnectionBuilder::with_options(&calc, options)
            .build(&arrivals, &departures)
            .unwrap();

        let mut seen = seen.lock().unwrap().clone();
        seen.sort();
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_split_by_movement() {
        let legs = vec![
            leg("A", "HUB", 1, Movement::Arrival, 1.30, 1.40),
            leg("HUB", "B", 1, Movement::Departure, 1.45, 1.55),
            leg("C", "HUB", 1, Movement::Arrival, 1.30, 1.40),
        ];
        let (arrivals, departures) = split_by_movement(legs);
        assert_eq!(arrivals.len(), 2);
        assert_eq!(departures.len(), 1);
        assert_eq!(arrivals[1].origin, "C");
    }
}
