//! Airport coordinate CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use crate::core::geodesy::{AirportCoordinate, AirportTable};
use crate::io::csv_error;
use hubconn_common::{Error, Result};

#[derive(Debug, Deserialize)]
struct AirportRecord {
    #[serde(rename = "Code", alias = "IATA", alias = "code")]
    code: String,
    #[serde(rename = "Latitude", alias = "latitude")]
    latitude: f64,
    #[serde(rename = "Longitude", alias = "longitude")]
    longitude: f64,
}

impl AirportRecord {
    fn into_coordinate(self) -> Result<AirportCoordinate> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(Error::invalid_input("airport row with an empty code"));
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(Error::invalid_input(format!(
                "airport {code}: coordinates ({}, {}) out of range",
                self.latitude, self.longitude
            )));
        }
        Ok(AirportCoordinate::new(code, self.latitude, self.longitude))
    }
}

/// Read an airport table from a CSV file
pub fn read_airports(path: &Path) -> Result<AirportTable> {
    let file = File::open(path)?;
    read_airports_from(file, path)
}

/// Read an airport table from any CSV source; `origin` names it in error messages
pub fn read_airports_from<R: Read>(reader: R, origin: &Path) -> Result<AirportTable> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = AirportTable::new();
    let mut rows = 0usize;
    for record in csv.deserialize::<AirportRecord>() {
        let airport = record
            .map_err(|e| csv_error(origin, e))?
            .into_coordinate()
            .map_err(|e| Error::invalid_input(format!("{}: {e}", origin.display())))?;
        rows += 1;
        table.insert(airport);
    }

    if table.len() < rows {
        warn!(
            "{}: {} duplicate airport codes, last row wins",
            origin.display(),
            rows - table.len()
        );
    }
    debug!("Read {} airports from {}", table.len(), origin.display());
    Ok(table)
}
