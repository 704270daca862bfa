//! Calendar compaction
//!
//! A connection operating on several weekdays appears once per day after building.
//! Compaction folds the synthetic day 8 back onto day 1, then groups rows that differ
//! only by their day-of-week (and the UTC floats, which embed the day) into one
//! [`CompactedItinerary`] carrying the inbound and outbound weekly patterns.

use std::collections::HashMap;

use crate::core::builder::CandidateConnection;
use crate::core::calendar::DayPattern;
use crate::core::schedule::FlightLeg;
use crate::core::time::{fraction_to_minutes, SECONDS_PER_DAY};

/// Descriptive fields of one leg of an itinerary
#[derive(Debug, Clone, PartialEq)]
pub struct LegSummary {
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub std_utc: f64,
    pub sta_utc: f64,
    pub std_local: f64,
    pub sta_local: f64,
    pub block: f64,
    pub equipment: String,
    pub seats: u32,
}

impl From<&FlightLeg> for LegSummary {
    fn from(leg: &FlightLeg) -> Self {
        Self {
            airline: leg.airline.clone(),
            flight_number: leg.flight_number.clone(),
            origin: leg.origin.clone(),
            destination: leg.destination.clone(),
            std_utc: leg.times.std_utc,
            sta_utc: leg.times.sta_utc,
            std_local: leg.times.std_local,
            sta_local: leg.times.sta_local,
            block: leg.times.block,
            equipment: leg.equipment.clone(),
            seats: leg.seats,
        }
    }
}

/// One connection with its operating days collapsed into weekly patterns
#[derive(Debug, Clone, PartialEq)]
pub struct CompactedItinerary {
    pub inbound: LegSummary,
    pub outbound: LegSummary,
    /// Connection time in days
    pub connection_time: f64,
    pub circuity_ratio: f64,
    pub absolute_circuity: f64,
    pub inbound_days: DayPattern,
    pub outbound_days: DayPattern,
}

impl CompactedItinerary {
    pub fn via(&self) -> &str {
        &self.inbound.destination
    }

    pub fn connection_minutes(&self) -> f64 {
        fraction_to_minutes(self.connection_time)
    }
}

/// Whole minutes of a clock value, the resolution schedules are published at
fn minute_key(fraction: f64) -> i64 {
    fraction_to_minutes(fraction).round() as i64
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct LegKey<'a> {
    airline: &'a str,
    flight_number: &'a str,
    origin: &'a str,
    destination: &'a str,
    clock: [i64; 5],
    equipment: &'a str,
    seats: u32,
}

impl<'a> LegKey<'a> {
    fn new(leg: &'a FlightLeg) -> Self {
        let t = &leg.times;
        Self {
            airline: &leg.airline,
            flight_number: &leg.flight_number,
            origin: &leg.origin,
            destination: &leg.destination,
            clock: [
                minute_key(t.std_utc),
                minute_key(t.sta_utc),
                minute_key(t.std_local),
                minute_key(t.sta_local),
                minute_key(t.block),
            ],
            equipment: &leg.equipment,
            seats: leg.seats,
        }
    }
}

/// Grouping key: every field except the day-of-week and the UTC floats
#[derive(Debug, PartialEq, Eq, Hash)]
struct ItineraryKey<'a> {
    inbound: LegKey<'a>,
    outbound: LegKey<'a>,
    connection_seconds: i64,
    circuity_ratio: u64,
    absolute_circuity: u64,
}

impl<'a> ItineraryKey<'a> {
    fn new(c: &CandidateConnection<'a>) -> Self {
        Self {
            inbound: LegKey::new(c.inbound),
            outbound: LegKey::new(c.outbound),
            // Day-8 arithmetic differs from day-1 arithmetic in the last bits
            connection_seconds: (c.connection_time * SECONDS_PER_DAY).round() as i64,
            // Served from one cache entry per triple, so bit-identical across days
            circuity_ratio: c.circuity_ratio.to_bits(),
            absolute_circuity: c.absolute_circuity.to_bits(),
        }
    }
}

/// Collapse per-day connections into one row per itinerary
///
/// Rows come out in the order their itinerary is first encountered. Day patterns are
/// accumulated as sets, so duplicate rows and input order do not affect them.
pub fn compact(connections: &[CandidateConnection<'_>]) -> Vec<CompactedItinerary> {
    let mut index: HashMap<ItineraryKey<'_>, usize> = HashMap::new();
    let mut itineraries: Vec<CompactedItinerary> = Vec::new();

    for c in connections {
        let slot = *index.entry(ItineraryKey::new(c)).or_insert_with(|| {
            itineraries.push(CompactedItinerary {
                inbound: LegSummary::from(c.inbound),
                outbound: LegSummary::from(c.outbound),
                connection_time: c.connection_time,
                circuity_ratio: c.circuity_ratio,
                absolute_circuity: c.absolute_circuity,
                inbound_days: DayPattern::empty(),
                outbound_days: DayPattern::empty(),
            });
            itineraries.len() - 1
        });

        let itinerary = &mut itineraries[slot];
        itinerary.inbound_days.insert(c.inbound.day);
        itinerary.outbound_days.insert(c.outbound.day);
    }

    itineraries
}
