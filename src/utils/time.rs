//! Time utilities: parsing HH:MM, lateness in minutes.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Parse an optional form time: empty input means "not given".
pub fn parse_optional_time(input: &str) -> AppResult<Option<NaiveTime>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_time(input)
        .map(Some)
        .ok_or_else(|| AppError::InvalidTime(input.to_string()))
}

/// Minutes of delay of `arrival` after `expected`; zero when on time or early.
pub fn late_minutes(arrival: NaiveTime, expected: NaiveTime) -> i64 {
    minutes_between(expected, arrival).max(0)
}
