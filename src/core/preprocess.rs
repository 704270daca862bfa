//! Schedule pre-processing
//!
//! Turns compact schedule rows (one row per flight with a weekly pattern) into the
//! per-day [`FlightLeg`]s the connection builder consumes:
//!
//! 1. expand the `Dep Day` pattern into one leg per operating weekday
//! 2. flag each leg as an arrival at or a departure from the hub
//! 3. duplicate day-1 legs as synthetic day-8 legs
//! 4. convert clock columns to day fractions and derive the UTC floats

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::calendar::{DayOfWeek, DayPattern, SYNTHETIC_DAY};
use crate::core::schedule::{FlightLeg, LegTimes, Movement};
use crate::core::time::parse_clock;
use hubconn_common::{Error, Result};

/// One row of the input schedule, as found in the schedule file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(rename = "Aln")]
    pub airline: String,
    #[serde(rename = "Flt")]
    pub flight_number: String,
    #[serde(rename = "Orig")]
    pub origin: String,
    #[serde(rename = "Dest")]
    pub destination: String,
    #[serde(rename = "STD")]
    pub std_utc: String,
    #[serde(rename = "STA")]
    pub sta_utc: String,
    #[serde(rename = "DLcl")]
    pub std_local: String,
    #[serde(rename = "ALcl")]
    pub sta_local: String,
    #[serde(rename = "Blk Hrs")]
    pub block_hours: String,
    #[serde(rename = "Dep Day")]
    pub days: String,
    #[serde(rename = "Subfl")]
    pub equipment: String,
    #[serde(rename = "Seats")]
    pub seats: u32,
}

impl ScheduleRow {
    fn label(&self) -> String {
        format!(
            "{}{} {}-{}",
            self.airline, self.flight_number, self.origin, self.destination
        )
    }

    fn parse_times(&self) -> Result<LegTimes> {
        let clock = |column: &str, value: &str| {
            parse_clock(value).map_err(|e| {
                Error::invalid_input(format!("{} column {column}: {e}", self.label()))
            })
        };
        Ok(LegTimes {
            std_utc: clock("STD", &self.std_utc)?,
            sta_utc: clock("STA", &self.sta_utc)?,
            std_local: clock("DLcl", &self.std_local)?,
            sta_local: clock("ALcl", &self.sta_local)?,
            block: clock("Blk Hrs", &self.block_hours)?,
        })
    }
}

/// Place a leg on a given day and derive its UTC floats
fn on_day(mut leg: FlightLeg, day: DayOfWeek) -> FlightLeg {
    leg.day = day;
    leg.utc_departure = f64::from(day.value()) + leg.times.std_utc;
    leg.utc_arrival = leg.utc_departure + leg.times.block;
    leg
}

/// Expand one schedule row into one leg per operating weekday
pub fn expand_row(row: &ScheduleRow, hub: &str) -> Result<Vec<FlightLeg>> {
    let pattern = DayPattern::parse(&row.days)
        .map_err(|e| Error::invalid_input(format!("{}: {e}", row.label())))?;
    if pattern.is_empty() {
        return Err(Error::invalid_input(format!(
            "{}: day pattern '{}' has no operating day",
            row.label(),
            row.days
        )));
    }

    let template = FlightLeg {
        airline: row.airline.trim().to_string(),
        flight_number: row.flight_number.trim().to_string(),
        origin: row.origin.trim().to_string(),
        destination: row.destination.trim().to_string(),
        times: row.parse_times()?,
        equipment: row.equipment.trim().to_string(),
        seats: row.seats,
        day: DayOfWeek::new(1)?,
        movement: Movement::for_origin(row.origin.trim(), hub),
        utc_departure: 0.0,
        utc_arrival: 0.0,
    };

    Ok(pattern
        .days()
        .map(|day| on_day(template.clone(), day))
        .collect())
}

/// Append a day-8 copy of every day-1 leg
pub fn add_day_eight(mut legs: Vec<FlightLeg>) -> Result<Vec<FlightLeg>> {
    let day_eight = DayOfWeek::new(SYNTHETIC_DAY)?;
    let copies: Vec<FlightLeg> = legs
        .iter()
        .filter(|leg| leg.day.value() == 1)
        .map(|leg| on_day(leg.clone(), day_eight))
        .collect();
    debug!("Added {} synthetic day-8 legs", copies.len());
    legs.extend(copies);
    Ok(legs)
}

/// Run every pre-processing step over a schedule
pub fn prepare_legs(rows: &[ScheduleRow], hub: &str) -> Result<Vec<FlightLeg>> {
    let mut legs = Vec::new();
    for row in rows {
        legs.extend(expand_row(row, hub)?);
    }
    debug!("Expanded {} schedule rows into {} legs", rows.len(), legs.len());
    add_day_eight(legs)
}
