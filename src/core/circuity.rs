//! Circuity of a connection routed through a hub
//!
//! For a true origin `o`, true destination `d` and hub `h`:
//!
//! - **ratio**: `(dist(o, h) + dist(h, d)) / dist(o, d)`, 1.0 meaning no detour
//! - **absolute**: `dist(o, h) + dist(h, d) - dist(o, d)`, in kilometers
//!
//! The same (origin, destination, hub) triple recurs for every day-of-week expansion of a
//! flight pair, so [`CircuityCalculator`] memoizes the underlying distances per triple
//! for the lifetime of one run.

use std::collections::HashMap;

use log::debug;
use parking_lot::RwLock;

use crate::core::geodesy::{great_circle_distance, AirportTable};
use hubconn_common::{Error, Result};

/// Distances of one routed triple, in kilometers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteDistances {
    /// `dist(origin, hub) + dist(hub, destination)`
    pub via_hub_km: f64,
    /// `dist(origin, destination)`
    pub direct_km: f64,
}

impl RouteDistances {
    /// Routed distance minus direct distance; defined for every triple
    pub fn absolute_circuity(&self) -> f64 {
        self.via_hub_km - self.direct_km
    }

    /// Routed distance over direct distance, `None` when the direct distance is zero
    pub fn circuity_ratio(&self) -> Option<f64> {
        if self.direct_km > 0.0 {
            Some(self.via_hub_km / self.direct_km)
        } else {
            None
        }
    }
}

type TripleKey = (String, String, String);

/// Memoizing circuity calculator bound to one coordinate table
///
/// Safe to share across threads. Concurrent first-time computations of the same triple
/// are deterministic, and only the first stored value is ever kept.
pub struct CircuityCalculator<'a> {
    airports: &'a AirportTable,
    cache: RwLock<HashMap<TripleKey, RouteDistances>>,
}

impl<'a> CircuityCalculator<'a> {
    pub fn new(airports: &'a AirportTable) -> Self {
        Self {
            airports,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn airports(&self) -> &'a AirportTable {
        self.airports
    }

    /// Distances for one triple, computed once and then served from the cache
    pub fn route_distances(
        &self,
        origin: &str,
        destination: &str,
        hub: &str,
    ) -> Result<RouteDistances> {
        let key = (origin.to_string(), destination.to_string(), hub.to_string());
        if let Some(cached) = self.cache.read().get(&key) {
            return Ok(*cached);
        }

        let distances = RouteDistances {
            via_hub_km: great_circle_distance(origin, hub, self.airports)?
                + great_circle_distance(hub, destination, self.airports)?,
            direct_km: great_circle_distance(origin, destination, self.airports)?,
        };

        let mut cache = self.cache.write();
        Ok(*cache.entry(key).or_insert(distances))
    }

    /// Detour ratio of `origin -> hub -> destination` against the direct route
    ///
    /// Fails with [`Error::InvalidInput`] when origin and destination coincide, since the
    /// ratio would divide by a zero direct distance.
    pub fn circuity_ratio(&self, origin: &str, destination: &str, hub: &str) -> Result<f64> {
        if origin == destination {
            return Err(Error::invalid_input(format!(
                "circuity ratio undefined for origin == destination ({origin})"
            )));
        }
        self.route_distances(origin, destination, hub)?
            .circuity_ratio()
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "circuity ratio undefined: {origin} and {destination} share coordinates"
                ))
            })
    }

    /// Extra kilometers flown by routing `origin -> hub -> destination`
    pub fn absolute_circuity(&self, origin: &str, destination: &str, hub: &str) -> Result<f64> {
        Ok(self
            .route_distances(origin, destination, hub)?
            .absolute_circuity())
    }

    /// Number of distinct triples computed so far
    pub fn cached_triples(&self) -> usize {
        self.cache.read().len()
    }

    pub fn log_cache_stats(&self) {
        debug!("Circuity cache holds {} triples", self.cached_triples());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geodesy::AirportCoordinate;

    fn collinear_table() -> AirportTable {
        [
            AirportCoordinate::new("HUB", 0.0, 0.0),
            AirportCoordinate::new("A", 0.0, 10.0),
            AirportCoordinate::new("B", 0.0, -10.0),
            AirportCoordinate::new("C", 40.0, 5.0),
            AirportCoordinate::new("TWIN", 0.0, 10.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_collinear_route_has_no_detour() {
        let table = collinear_table();
        let calc = CircuityCalculator::new(&table);
        let ratio = calc.circuity_ratio("A", "B", "HUB").unwrap();
        let abs = calc.absolute_circuity("A", "B", "HUB").unwrap();
        assert!((ratio - 1.0).abs() < 1e-9);
        assert!(abs.abs() < 1e-6);
    }

    #[test]
    fn test_detour_via_hub() {
        let table = collinear_table();
        let calc = CircuityCalculator::new(&table);
        // A and C are both north/east of HUB, so flying through HUB backtracks
        let ratio = calc.circuity_ratio("A", "C", "HUB").unwrap();
        let abs = calc.absolute_circuity("A", "C", "HUB").unwrap();
        assert!(ratio > 1.0);
        assert!(abs > 0.0);
    }

    #[test]
    fn test_ratio_rejects_same_origin_and_destination() {
        let table = collinear_table();
        let calc = CircuityCalculator::new(&table);
        assert!(matches!(
            calc.circuity_ratio("A", "A", "HUB"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ratio_rejects_colocated_airports() {
        let table = collinear_table();
        let calc = CircuityCalculator::new(&table);
        assert!(matches!(
            calc.circuity_ratio("A", "TWIN", "HUB"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_absolute_defined_for_same_origin_and_destination() {
        let table = collinear_table();
        let calc = CircuityCalculator::new(&table);
        let abs = calc.absolute_circuity("A", "A", "HUB").unwrap();
        let out_and_back = 2.0 * great_circle_distance("A", "HUB", &table).unwrap();
        assert!((abs - out_and_back).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_airport_is_not_found() {
        let table = collinear_table();
        let calc = CircuityCalculator::new(&table);
        assert!(matches!(
            calc.absolute_circuity("A", "ZZZ", "HUB"),
            Err(Error::NotFound(code)) if code == "ZZZ"
        ));
        assert_eq!(calc.cached_triples(), 0);
    }

    #[test]
    fn test_repeated_triples_are_cached_once() {
        let table = collinear_table();
        let calc = CircuityCalculator::new(&table);
        for _ in 0..5 {
            calc.circuity_ratio("A", "B", "HUB").unwrap();
            calc.absolute_circuity("A", "B", "HUB").unwrap();
        }
        calc.absolute_circuity("B", "A", "HUB").unwrap();
        assert_eq!(calc.cached_triples(), 2);
    }
}
