use crate::core::sheet::{AttendanceBatch, AttendanceRecord};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{find_entry, find_group, load_students_by_group, upsert_entry};
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::status::StatusKind;
use crate::models::student::Student;
use crate::utils::time::{late_minutes, parse_optional_time};
use chrono::{Local, NaiveDate, NaiveTime};

/// Outcome of persisting one batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub inserted: usize,
    pub updated: usize,
    /// Names of rows with neither flag set.
    pub skipped: Vec<String>,
}

/// Turns a collected batch into dated attendance entries.
pub struct RecordLogic;

impl RecordLogic {
    /// Status for a record: `None` when neither present nor absent is set.
    pub fn status_for(rec: &AttendanceRecord) -> AppResult<Option<StatusKind>> {
        if rec.present {
            return Ok(Some(StatusKind::Present));
        }
        if !rec.absent {
            return Ok(None);
        }
        if rec.reason.trim().is_empty() {
            return Ok(Some(StatusKind::Unexcused));
        }
        match StatusKind::from_label(&rec.reason) {
            Some(kind) if kind.is_absence() => Ok(Some(kind)),
            _ => {
                let valid: Vec<&str> = StatusKind::reasons().map(|k| k.label()).collect();
                Err(AppError::UnknownStatus(format!(
                    "'{}' is not an absence reason for {} (expected one of: {})",
                    rec.reason,
                    rec.name,
                    valid.join(", ")
                )))
            }
        }
    }

    /// Persist `batch` for `date`. `student_ids` runs parallel to the batch;
    /// rows without an id are matched by display name inside the group.
    ///
    /// All rows are written in one transaction: one bad row and nothing is saved.
    pub fn persist(
        pool: &mut DbPool,
        group_id: i64,
        date: NaiveDate,
        student_ids: &[Option<i64>],
        batch: &AttendanceBatch,
        expected_arrival: NaiveTime,
    ) -> AppResult<SaveSummary> {
        if student_ids.len() != batch.len() {
            return Err(AppError::Other(format!(
                "batch has {} records but {} row ids",
                batch.len(),
                student_ids.len()
            )));
        }

        let group = find_group(&pool.conn, group_id)?;
        let roster = load_students_by_group(&pool.conn, group_id)?;

        let tx = pool.conn.transaction()?;
        let mut summary = SaveSummary::default();

        for (rec, id) in batch.iter().zip(student_ids) {
            let Some(status) = Self::status_for(rec)? else {
                summary.skipped.push(rec.name.clone());
                continue;
            };

            let student_id = resolve_student(&roster, *id, &rec.name)?;

            let arrival = parse_optional_time(&rec.arrival)?;
            let departure = parse_optional_time(&rec.departure)?;

            let late = match (status, arrival) {
                (StatusKind::Present, Some(t)) => late_minutes(t, expected_arrival),
                _ => 0,
            };
            let comment = if late > 0 {
                format!("Late: {} minutes", late)
            } else {
                String::new()
            };

            let entry = match find_entry(&tx, student_id, &date)? {
                Some(mut existing) => {
                    existing.status = status;
                    existing.updated_at = Local::now().to_rfc3339();
                    summary.updated += 1;
                    existing
                }
                None => {
                    summary.inserted += 1;
                    Entry::new(student_id, date, status)
                }
            };

            upsert_entry(
                &tx,
                &Entry {
                    arrival,
                    departure,
                    late_minutes: late,
                    comment,
                    ..entry
                },
            )?;
        }

        audit(
            &tx,
            "take",
            &format!("{} {}", group.name, date),
            &format!(
                "{} inserted, {} updated, {} skipped",
                summary.inserted,
                summary.updated,
                summary.skipped.len()
            ),
        )?;

        tx.commit()?;
        Ok(summary)
    }
}

fn resolve_student(roster: &[Student], id: Option<i64>, name: &str) -> AppResult<i64> {
    if let Some(id) = id {
        return roster
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.id)
            .ok_or_else(|| AppError::UnknownStudent(format!("{} is not in this group", id)));
    }

    let mut matches = roster.iter().filter(|s| s.display_name() == name.trim());
    match (matches.next(), matches.next()) {
        (Some(s), None) => Ok(s.id),
        (Some(_), Some(_)) => Err(AppError::UnknownStudent(format!(
            "'{}' matches more than one student",
            name
        ))),
        (None, _) => Err(AppError::UnknownStudent(format!(
            "'{}' is not in this group",
            name
        ))),
    }
}
