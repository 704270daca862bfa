//! Core library modules for hubconn
//!
//! Geodesy and circuity at the bottom, schedule pre-processing and connection
//! building in the middle, classification and compaction on top, tied together
//! by the [`pipeline`].

pub mod builder;
pub mod calendar;
pub mod circuity;
pub mod classifier;
pub mod compactor;
pub mod config;
pub mod geodesy;
pub mod pipeline;
pub mod preprocess;
pub mod schedule;
pub mod time;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types for internal use
pub use builder::{BuildOptions, CandidateConnection, ConnectionBuilder, ProgressCallback};
pub use calendar::{DayOfWeek, DayPattern};
pub use circuity::CircuityCalculator;
pub use classifier::{ConnectionClass, Thresholds};
pub use compactor::{CompactedItinerary, LegSummary};
pub use config::{ConnectionConfig, ConnectionSettings};
pub use geodesy::{AirportCoordinate, AirportTable};
pub use pipeline::{ClassCounts, ConnectionReport, Pipeline};
pub use preprocess::ScheduleRow;
pub use schedule::{FlightLeg, Movement};
