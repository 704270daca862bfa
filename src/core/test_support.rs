//! Leg fixtures shared by the core unit tests

use crate::core::calendar::DayOfWeek;
use crate::core::schedule::{FlightLeg, LegTimes, Movement};

/// A leg with fixed descriptive fields and the given route, day and UTC floats
pub fn leg(
    origin: &str,
    destination: &str,
    day: u8,
    movement: Movement,
    utc_departure: f64,
    utc_arrival: f64,
) -> FlightLeg {
    let day = DayOfWeek::new(day).unwrap();
    let std_utc = utc_departure - f64::from(day.value());
    FlightLeg {
        airline: "XY".to_string(),
        flight_number: format!("{origin}{destination}"),
        origin: origin.to_string(),
        destination: destination.to_string(),
        times: LegTimes {
            std_utc,
            sta_utc: std_utc + (utc_arrival - utc_departure),
            std_local: std_utc,
            sta_local: std_utc + (utc_arrival - utc_departure),
            block: utc_arrival - utc_departure,
        },
        equipment: "320".to_string(),
        seats: 180,
        day,
        movement,
        utc_departure,
        utc_arrival,
    }
}
