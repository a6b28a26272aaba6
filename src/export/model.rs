// src/export/model.rs

use serde::Serialize;

/// Flat export row: one attendance entry joined with its student and group.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub date: String,
    pub group: String,
    pub student_id: i64,
    pub last_name: String,
    pub first_name: String,
    pub status: String,
    pub arrival: String,
    pub departure: String,
    pub late_minutes: i64,
    pub comment: String,
}

/// Column titles, in the field order of `EntryExport`.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "date",
        "group",
        "student_id",
        "last_name",
        "first_name",
        "status",
        "arrival",
        "departure",
        "late_minutes",
        "comment",
    ]
}

pub(crate) fn entry_to_row(e: &EntryExport) -> Vec<String> {
    vec![
        e.date.clone(),
        e.group.clone(),
        e.student_id.to_string(),
        e.last_name.clone(),
        e.first_name.clone(),
        e.status.clone(),
        e.arrival.clone(),
        e.departure.clone(),
        e.late_minutes.to_string(),
        e.comment.clone(),
    ]
}
