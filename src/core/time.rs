//! Fractional-day time arithmetic
//!
//! All schedule instants are expressed as fractions of a day. A UTC instant carries its
//! day-of-week as the integer part (`3.25` is 06:00 UTC on day 3), so subtracting two
//! instants yields a connection time in days.

use hubconn_common::{Error, Result};

pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a duration in minutes to a fraction of a day
pub fn minutes_to_fraction(minutes: f64) -> f64 {
    minutes / MINUTES_PER_DAY
}

/// Convert a fraction of a day to minutes
pub fn fraction_to_minutes(fraction: f64) -> f64 {
    fraction * MINUTES_PER_DAY
}

/// Parse a clock value into a fraction of a day
///
/// Accepts `HH:MM`, `HH:MM:SS`, or a plain decimal fraction such as `0.4375` (the
/// form spreadsheets export time cells in).
pub fn parse_clock(value: &str) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::invalid_input("empty time value"));
    }

    if !value.contains(':') {
        let fraction: f64 = value
            .parse()
            .map_err(|_| Error::invalid_input(format!("invalid time '{value}'")))?;
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(Error::invalid_input(format!("invalid time '{value}'")));
        }
        return Ok(fraction);
    }

    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(Error::invalid_input(format!(
            "time '{value}' must be HH:MM or HH:MM:SS"
        )));
    }

    let field = |s: &str, max: u32| -> Result<u32> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| Error::invalid_input(format!("invalid time '{value}'")))?;
        if n > max {
            return Err(Error::invalid_input(format!("invalid time '{value}'")));
        }
        Ok(n)
    };

    // Hours may exceed 23 for block times of long flights
    let hours = field(parts[0], 99)?;
    let minutes = field(parts[1], 59)?;
    let seconds = match parts.get(2) {
        Some(s) => field(s, 59)?,
        None => 0,
    };

    let total_seconds = hours * 3600 + minutes * 60 + seconds;
    Ok(total_seconds as f64 / SECONDS_PER_DAY)
}

/// Render a fraction of a day as `HH:MM`
///
/// Rounds to the nearest minute and wraps hours modulo 24, so `1.25` renders as
/// `06:00`. Negative values keep a leading `-`.
pub fn format_clock(fraction: f64) -> String {
    let sign = if fraction < 0.0 { "-" } else { "" };
    let total_minutes = fraction_to_minutes(fraction.abs()).round() as u64;
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;
    format!("{sign}{hours:02}:{minutes:02}")
}
