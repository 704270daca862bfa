//! Flight legs as consumed by the connection builder

use crate::core::calendar::DayOfWeek;

/// Direction of a leg relative to the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    /// The leg terminates at the hub
    Arrival,
    /// The leg originates at the hub
    Departure,
}

impl Movement {
    /// A leg leaving the hub is a departure, anything else arrives at it
    pub fn for_origin(origin: &str, hub: &str) -> Self {
        if origin == hub {
            Movement::Departure
        } else {
            Movement::Arrival
        }
    }
}

/// Clock times of a leg as fractions of a day, within the day of operation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LegTimes {
    pub std_utc: f64,
    pub sta_utc: f64,
    pub std_local: f64,
    pub sta_local: f64,
    pub block: f64,
}

/// One scheduled operation of a flight on one day-of-week
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLeg {
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub times: LegTimes,
    pub equipment: String,
    pub seats: u32,
    pub day: DayOfWeek,
    pub movement: Movement,
    /// Day-of-week plus UTC departure time, in days
    pub utc_departure: f64,
    /// UTC departure plus block time, in days
    pub utc_arrival: f64,
}

impl FlightLeg {
    /// Short label used in log lines, e.g. `XY123 LHR-NUM d3`
    pub fn label(&self) -> String {
        format!(
            "{}{} {}-{} d{}",
            self.airline, self.flight_number, self.origin, self.destination, self.day
        )
    }
}
