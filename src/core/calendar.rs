//! Weekly calendar model
//!
//! Schedules describe the days a flight operates with a 7-slot pattern such as
//! `1.3.5.7`: slot `n` holds the digit `n` when the flight operates on weekday `n`
//! and a `.` filler otherwise. During connection building, day 1 is also duplicated as
//! a synthetic day 8 so that Sunday arrivals can pair with Monday departures.

use std::fmt;
use std::str::FromStr;

use hubconn_common::{Error, Result};

/// Filler character for non-operating slots of a [`DayPattern`]
pub const PATTERN_FILLER: char = '.';

/// Synthetic weekday used to detect connections spanning the week boundary
pub const SYNTHETIC_DAY: u8 = 8;

/// A day-of-week in `1..=8`, where 8 is the synthetic copy of day 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub fn new(day: u8) -> Result<Self> {
        if (1..=SYNTHETIC_DAY).contains(&day) {
            Ok(Self(day))
        } else {
            Err(Error::invalid_input(format!(
                "day-of-week {day} outside 1..={SYNTHETIC_DAY}"
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_synthetic(self) -> bool {
        self.0 == SYNTHETIC_DAY
    }

    /// Collapse the synthetic day 8 back onto day 1
    pub fn fold(self) -> Self {
        if self.is_synthetic() {
            Self(1)
        } else {
            self
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of operating weekdays, rendered in the fixed 7-slot form
///
/// The rendering is canonical: it does not depend on the order in which days were
/// added, and adding a day twice has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DayPattern(u8);

impl DayPattern {
    pub fn empty() -> Self {
        Self(0)
    }

    /// Every weekday, `1234567`
    pub fn daily() -> Self {
        Self(0b0111_1111)
    }

    /// Add a day; the synthetic day 8 is recorded as day 1
    pub fn insert(&mut self, day: DayOfWeek) {
        self.0 |= 1 << (day.fold().value() - 1);
    }

    pub fn contains(&self, weekday: u8) -> bool {
        (1..=7).contains(&weekday) && self.0 & (1 << (weekday - 1)) != 0
    }

    /// Operating weekdays in ascending order
    pub fn days(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        (1..=7u8)
            .filter(|d| self.contains(*d))
            .map(DayOfWeek)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Parse any pattern string, keeping only its digits
    ///
    /// Accepts the canonical form (`1.3.5..`) as well as loose spellings such as
    /// `135` or `1 3 5`. A digit outside 1..=7 is rejected.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut days = Self::empty();
        for c in pattern.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=7).contains(&digit) {
                    return Err(Error::invalid_input(format!(
                        "weekday {digit} in pattern '{pattern}' outside 1..=7"
                    )));
                }
                days.insert(DayOfWeek(digit as u8));
            }
        }
        Ok(days)
    }
}

impl FromIterator<DayOfWeek> for DayPattern {
    fn from_iter<I: IntoIterator<Item = DayOfWeek>>(iter: I) -> Self {
        let mut pattern = DayPattern::empty();
        for day in iter {
            pattern.insert(day);
        }
        pattern
    }
}

impl FromStr for DayPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DayPattern::parse(s)
    }
}

impl fmt::Display for DayPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for weekday in 1..=7u8 {
            if self.contains(weekday) {
                write!(f, "{weekday}")?;
            } else {
                write!(f, "{PATTERN_FILLER}")?;
            }
        }
        Ok(())
    }
}
