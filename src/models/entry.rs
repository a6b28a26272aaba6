use super::status::StatusKind;
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

/// Persisted attendance of one student on one date.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: i64,                     // ⇔ entries.id (0 = not stored yet)
    pub student_id: i64,             // ⇔ entries.student_id
    pub date: NaiveDate,             // ⇔ entries.date (TEXT "YYYY-MM-DD")
    pub status: StatusKind,          // ⇔ entries.status_id → statuses.label
    pub arrival: Option<NaiveTime>,  // ⇔ entries.arrival (TEXT "HH:MM" or '')
    pub departure: Option<NaiveTime>, // ⇔ entries.departure
    pub late_minutes: i64,           // ⇔ entries.late_minutes
    pub comment: String,             // ⇔ entries.comment
    pub updated_at: String,          // ⇔ entries.updated_at (ISO8601)
}

impl Entry {
    pub fn new(student_id: i64, date: NaiveDate, status: StatusKind) -> Self {
        Self {
            id: 0,
            student_id,
            date,
            status,
            arrival: None,
            departure: None,
            late_minutes: 0,
            comment: String::new(),
            updated_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn arrival_str(&self) -> String {
        fmt_opt_time(self.arrival)
    }

    pub fn departure_str(&self) -> String {
        fmt_opt_time(self.departure)
    }

    pub fn is_late(&self) -> bool {
        self.late_minutes > 0
    }
}

fn fmt_opt_time(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}
