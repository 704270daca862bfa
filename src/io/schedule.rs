//! Schedule CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::core::preprocess::ScheduleRow;
use crate::io::csv_error;
use hubconn_common::Result;

/// Read schedule rows from a CSV file
pub fn read_schedule(path: &Path) -> Result<Vec<ScheduleRow>> {
    let file = File::open(path)?;
    read_schedule_from(file, path)
}

/// Read schedule rows from any CSV source; `origin` names it in error messages
pub fn read_schedule_from<R: Read>(reader: R, origin: &Path) -> Result<Vec<ScheduleRow>> {
    let rows = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect::<std::result::Result<Vec<ScheduleRow>, _>>()
        .map_err(|e| csv_error(origin, e))?;
    debug!("Read {} schedule rows from {}", rows.len(), origin.display());
    Ok(rows)
}
