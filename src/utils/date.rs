use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `--date` argument, today when absent.
pub fn date_or_today(input: Option<&str>) -> AppResult<NaiveDate> {
    match input {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(today()),
    }
}

/// First day of a `YYYY-MM` month.
pub fn parse_month(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

pub fn month_last_day(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// First and last day of the month containing `day`.
pub fn month_bounds(day: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = day
        .with_day(1)
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))?;
    let last = month_last_day(day.year(), day.month())
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))?;
    Ok((first, last))
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = NaiveDate::from_ymd_opt(year, month, 1);

    while let Some(day) = d {
        if day.month() != month {
            break;
        }
        out.push(day);
        d = day.succ_opt();
    }

    out
}
