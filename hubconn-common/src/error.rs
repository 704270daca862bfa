//! Error types for the hubconn toolkit
//!
//! Every stage of the connection pipeline reports failures through [`Error`]. The
//! pipeline never retries and never suppresses partial results: the first error
//! aborts the run and is handed back to the caller.

use thiserror::Error;

/// Main error type for hubconn operations
#[derive(Debug, Error)]
pub enum Error {
    /// An airport code was referenced but is absent from the coordinate table
    #[error("Airport '{0}' not found in coordinate table")]
    NotFound(String),

    /// Malformed or degenerate input data
    ///
    /// Raised for a circuity ratio requested on an origin equal to its destination,
    /// a day-of-week outside 1..=8, or a schedule row that cannot be parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Thresholds or settings that form an empty or contradictory window
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File I/O error from one of the adapters
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Shorthand for [`Error::Configuration`]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}

/// Convenience result type for hubconn operations
pub type Result<T> = std::result::Result<T, Error>;
