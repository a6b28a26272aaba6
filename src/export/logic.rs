// src/export/logic.rs

use crate::db::pool::DbPool;
use crate::db::queries::find_group;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryExport;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, Row, params_from_iter};
use std::io;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export attendance entries.
    ///
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"` or one of `YYYY`, `YYYY-MM`, `YYYY-MM-DD`,
    ///   optionally as `start:end`
    /// - `group`: restrict to one group
    ///
    /// Returns the number of exported entries.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        group: Option<i64>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        let date_bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        if let Some(gid) = group {
            find_group(&pool.conn, gid)?;
        }

        ensure_writable(path, force)?;

        let entries = load_entries(&pool.conn, date_bounds, group)?;

        if entries.is_empty() {
            warning("No attendance entries found for the selected range.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&entries, path)?,
            ExportFormat::Json => export_json(&entries, path)?,
            ExportFormat::Xlsx => export_xlsx(&entries, path)?,
        }

        Ok(entries.len())
    }
}

/// Entries joined with student, group and status, ordered by date then sheet order.
pub(crate) fn load_entries(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
    group: Option<i64>,
) -> AppResult<Vec<EntryExport>> {
    let mut sql = String::from(
        r#"
        SELECT e.date, g.name AS group_name, s.id AS student_id,
               s.last_name, s.first_name, st.label AS status,
               e.arrival, e.departure, e.late_minutes, e.comment
        FROM entries e
        JOIN students s        ON s.id = e.student_id
        JOIN student_groups g  ON g.id = s.group_id
        JOIN statuses st       ON st.id = e.status_id
        WHERE 1 = 1
        "#,
    );
    let mut args: Vec<Value> = Vec::new();

    if let Some((start, end)) = bounds {
        sql.push_str(" AND e.date BETWEEN ? AND ?");
        args.push(Value::Text(start.format("%Y-%m-%d").to_string()));
        args.push(Value::Text(end.format("%Y-%m-%d").to_string()));
    }
    if let Some(gid) = group {
        sql.push_str(" AND s.group_id = ?");
        args.push(Value::Integer(gid));
    }
    sql.push_str(" ORDER BY e.date ASC, g.name ASC, s.last_name ASC, s.first_name ASC, s.id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_export_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_export_row(row: &Row) -> rusqlite::Result<EntryExport> {
    Ok(EntryExport {
        date: row.get("date")?,
        group: row.get("group_name")?,
        student_id: row.get("student_id")?,
        last_name: row.get("last_name")?,
        first_name: row.get("first_name")?,
        status: row.get("status")?,
        arrival: row.get("arrival")?,
        departure: row.get("departure")?,
        late_minutes: row.get("late_minutes")?,
        comment: row.get("comment")?,
    })
}
