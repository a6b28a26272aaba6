// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::month_last_day;
use chrono::{Datelike, NaiveDate};

/// Parse `--range` into inclusive date bounds.
///
/// Accepts:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any two of the above joined by `:` (same format on both sides)
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());
        if start.len() != end.len() {
            return Err(invalid(r, "start and end must have the same format"));
        }
        let (d1, _) = bounds_of(start).ok_or_else(|| invalid(r, "invalid start"))?;
        let (_, d2) = bounds_of(end).ok_or_else(|| invalid(r, "invalid end"))?;
        if d2 < d1 {
            return Err(invalid(r, "end is before start"));
        }
        return Ok((d1, d2));
    }

    bounds_of(r).ok_or_else(|| invalid(r, "expected YYYY, YYYY-MM or YYYY-MM-DD"))
}

fn bounds_of(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        // YYYY-MM
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d").ok()?;
            let last = month_last_day(first.year(), first.month())?;
            Some((first, last))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}

fn invalid(r: &str, why: &str) -> AppError {
    AppError::InvalidDate(format!("range '{r}': {why}"))
}
