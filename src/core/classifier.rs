//! Connection classification
//!
//! Three classes are derived from the same candidate set, each predicate evaluated on
//! its own rather than as an if/else chain:
//!
//! | class              | connection time            | circuity                            |
//! |--------------------|----------------------------|-------------------------------------|
//! | Logical            | `min <= ct <= max`         | `ratio <= max_x` OR `abs <= max_km` |
//! | Illogical-Feasible | `min <= ct <= max`         | `ratio > max_x` OR `abs > max_km`   |
//! | Missed             | `max_missed <= ct < min`   | `ratio <= max_x` AND `abs <= max_km`|
//!
//! The feasible and missed time windows are disjoint, so nothing is both Missed and
//! feasible. Logical and Illogical-Feasible overlap when exactly one circuity measure
//! exceeds its limit; such a connection is reported in both tables.

use log::info;

use crate::core::builder::CandidateConnection;
use crate::core::time::{fraction_to_minutes, minutes_to_fraction};
use hubconn_common::{Error, Result};

/// Label attached to a classified connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionClass {
    Logical,
    IllogicalFeasible,
    Missed,
}

impl ConnectionClass {
    pub const ALL: [ConnectionClass; 3] = [
        ConnectionClass::Logical,
        ConnectionClass::IllogicalFeasible,
        ConnectionClass::Missed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionClass::Logical => "logical",
            ConnectionClass::IllogicalFeasible => "illogical",
            ConnectionClass::Missed => "missed",
        }
    }
}

/// Classification thresholds; time bounds are fractions of a day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    min_connect_time: f64,
    max_connect_time: f64,
    max_missed_time: f64,
    max_circuity: f64,
    max_abs_circuity_km: f64,
}

impl Thresholds {
    /// Validate and build thresholds from day fractions
    pub fn new(
        min_connect_time: f64,
        max_connect_time: f64,
        max_missed_time: f64,
        max_circuity: f64,
        max_abs_circuity_km: f64,
    ) -> Result<Self> {
        let values = [
            ("min connect time", min_connect_time),
            ("max connect time", max_connect_time),
            ("max missed connect time", max_missed_time),
            ("max circuity", max_circuity),
            ("max absolute circuity", max_abs_circuity_km),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::configuration(format!("{name} is not finite ({value})")));
        }
        if min_connect_time > max_connect_time {
            return Err(Error::configuration(format!(
                "min connect time ({:.0} min) exceeds max connect time ({:.0} min)",
                fraction_to_minutes(min_connect_time),
                fraction_to_minutes(max_connect_time)
            )));
        }
        if max_missed_time > min_connect_time {
            return Err(Error::configuration(format!(
                "missed connection bound ({:.0} min) exceeds min connect time ({:.0} min)",
                fraction_to_minutes(max_missed_time),
                fraction_to_minutes(min_connect_time)
            )));
        }
        if max_circuity <= 0.0 {
            return Err(Error::configuration(format!(
                "max circuity must be positive, got {max_circuity}"
            )));
        }
        if max_abs_circuity_km < 0.0 {
            return Err(Error::configuration(format!(
                "max absolute circuity must not be negative, got {max_abs_circuity_km} km"
            )));
        }

        Ok(Self {
            min_connect_time,
            max_connect_time,
            max_missed_time,
            max_circuity,
            max_abs_circuity_km,
        })
    }

    /// Build thresholds with the time bounds given in minutes
    pub fn from_minutes(
        min_connect_minutes: f64,
        max_connect_minutes: f64,
        max_missed_minutes: f64,
        max_circuity: f64,
        max_abs_circuity_km: f64,
    ) -> Result<Self> {
        Self::new(
            minutes_to_fraction(min_connect_minutes),
            minutes_to_fraction(max_connect_minutes),
            minutes_to_fraction(max_missed_minutes),
            max_circuity,
            max_abs_circuity_km,
        )
    }

    pub fn min_connect_time(&self) -> f64 {
        self.min_connect_time
    }

    pub fn max_connect_time(&self) -> f64 {
        self.max_connect_time
    }

    pub fn max_missed_time(&self) -> f64 {
        self.max_missed_time
    }

    pub fn max_circuity(&self) -> f64 {
        self.max_circuity
    }

    pub fn max_abs_circuity_km(&self) -> f64 {
        self.max_abs_circuity_km
    }

    fn is_feasible_time(&self, ct: f64) -> bool {
        ct >= self.min_connect_time && ct <= self.max_connect_time
    }

    pub fn is_logical(&self, c: &CandidateConnection<'_>) -> bool {
        self.is_feasible_time(c.connection_time)
            && (c.circuity_ratio <= self.max_circuity
                || c.absolute_circuity <= self.max_abs_circuity_km)
    }

    pub fn is_illogical_feasible(&self, c: &CandidateConnection<'_>) -> bool {
        self.is_feasible_time(c.connection_time)
            && (c.circuity_ratio > self.max_circuity
                || c.absolute_circuity > self.max_abs_circuity_km)
    }

    pub fn is_missed(&self, c: &CandidateConnection<'_>) -> bool {
        c.connection_time >= self.max_missed_time
            && c.connection_time < self.min_connect_time
            && c.circuity_ratio <= self.max_circuity
            && c.absolute_circuity <= self.max_abs_circuity_km
    }

    pub fn matches(&self, class: ConnectionClass, c: &CandidateConnection<'_>) -> bool {
        match class {
            ConnectionClass::Logical => self.is_logical(c),
            ConnectionClass::IllogicalFeasible => self.is_illogical_feasible(c),
            ConnectionClass::Missed => self.is_missed(c),
        }
    }
}

/// Candidate connections split into the three classes
#[derive(Debug, Clone, Default)]
pub struct ClassifiedConnections<'a> {
    pub logical: Vec<CandidateConnection<'a>>,
    pub illogical_feasible: Vec<CandidateConnection<'a>>,
    pub missed: Vec<CandidateConnection<'a>>,
}

impl<'a> ClassifiedConnections<'a> {
    pub fn get(&self, class: ConnectionClass) -> &[CandidateConnection<'a>] {
        match class {
            ConnectionClass::Logical => &self.logical,
            ConnectionClass::IllogicalFeasible => &self.illogical_feasible,
            ConnectionClass::Missed => &self.missed,
        }
    }
}

/// Apply the three class predicates to every candidate
pub fn classify<'a>(
    candidates: &[CandidateConnection<'a>],
    thresholds: &Thresholds,
) -> ClassifiedConnections<'a> {
    let select = |class: ConnectionClass| -> Vec<CandidateConnection<'a>> {
        candidates
            .iter()
            .filter(|c| thresholds.matches(class, c))
            .copied()
            .collect()
    };

    let classified = ClassifiedConnections {
        logical: select(ConnectionClass::Logical),
        illogical_feasible: select(ConnectionClass::IllogicalFeasible),
        missed: select(ConnectionClass::Missed),
    };

    info!("Number of logical connections: {}", classified.logical.len());
    info!(
        "Number of illogical connections: {}",
        classified.illogical_feasible.len()
    );
    info!("Number of missed connections: {}", classified.missed.len());

    classified
}
