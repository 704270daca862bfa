//! File adapters around the core pipeline
//!
//! CSV readers for the coordinate table and the schedule, CSV writers for the three
//! connection tables and a JSON run summary. The core never touches the filesystem.

pub mod airports;
pub mod export;
pub mod schedule;

use std::path::Path;

use hubconn_common::Error;

/// Attach the offending file to a CSV parse error
pub(crate) fn csv_error(path: &Path, e: csv::Error) -> Error {
    if e.is_io_error() {
        return Error::IoError(e.into());
    }
    Error::invalid_input(format!("{}: {e}", path.display()))
}
