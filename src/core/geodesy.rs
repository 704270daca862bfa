//! Great-circle distances between airports
//!
//! Distances use the haversine formula on a sphere of radius 6371 km.

use std::collections::HashMap;

use hubconn_common::{Error, Result};

/// Mean Earth radius used for all distances, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Position of a single airport, in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct AirportCoordinate {
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl AirportCoordinate {
    pub fn new(code: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            code: code.into(),
            latitude,
            longitude,
        }
    }
}

/// Read-only lookup of airport coordinates by code
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    airports: HashMap<String, AirportCoordinate>,
}

impl AirportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an airport, replacing any previous entry with the same code
    pub fn insert(&mut self, airport: AirportCoordinate) {
        self.airports.insert(airport.code.clone(), airport);
    }

    /// Look up an airport by code
    pub fn get(&self, code: &str) -> Result<&AirportCoordinate> {
        self.airports
            .get(code)
            .ok_or_else(|| Error::NotFound(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl FromIterator<AirportCoordinate> for AirportTable {
    fn from_iter<I: IntoIterator<Item = AirportCoordinate>>(iter: I) -> Self {
        let mut table = AirportTable::new();
        for airport in iter {
            table.insert(airport);
        }
        table
    }
}

/// Haversine distance in kilometers between two points given in degrees
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Clamp guards sqrt(1 - a) against rounding just above 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Great-circle distance in kilometers between two airports of the table
pub fn great_circle_distance(code_a: &str, code_b: &str, airports: &AirportTable) -> Result<f64> {
    let a = airports.get(code_a)?;
    let b = airports.get(code_b)?;
    Ok(haversine_distance(
        a.latitude,
        a.longitude,
        b.latitude,
        b.longitude,
    ))
}
