use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::group::Group;
use crate::models::status::{Status, StatusKind};
use crate::models::student::Student;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------
// Groups
// ---------------------------

pub fn insert_group(conn: &Connection, name: &str) -> AppResult<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Other("group name must not be empty".into()));
    }

    let exists: Option<i64> = conn
        .query_row(
            "SELECT id FROM student_groups WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    if exists.is_some() {
        return Err(AppError::Duplicate(format!("group '{}'", name)));
    }

    conn.execute("INSERT INTO student_groups (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

pub fn load_groups(conn: &Connection) -> AppResult<Vec<Group>> {
    let mut stmt = conn.prepare("SELECT id, name FROM student_groups ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Group {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_group(conn: &Connection, id: i64) -> AppResult<Group> {
    conn.query_row(
        "SELECT id, name FROM student_groups WHERE id = ?1",
        [id],
        |row| {
            Ok(Group {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| AppError::UnknownGroup(id.to_string()))
}

// ---------------------------
// Students
// ---------------------------

fn map_student(row: &Row) -> Result<Student> {
    Ok(Student {
        id: row.get("id")?,
        last_name: row.get("last_name")?,
        first_name: row.get("first_name")?,
        group_id: row.get("group_id")?,
    })
}

pub fn insert_student(
    conn: &Connection,
    last_name: &str,
    first_name: &str,
    group_id: i64,
) -> AppResult<i64> {
    find_group(conn, group_id)?;

    if last_name.trim().is_empty() || first_name.trim().is_empty() {
        return Err(AppError::Other(
            "student first and last name must not be empty".into(),
        ));
    }

    conn.execute(
        "INSERT INTO students (last_name, first_name, group_id) VALUES (?1, ?2, ?3)",
        params![last_name.trim(), first_name.trim(), group_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Students of a group in sheet order (last name, first name).
pub fn load_students_by_group(conn: &Connection, group_id: i64) -> AppResult<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT id, last_name, first_name, group_id FROM students
         WHERE group_id = ?1
         ORDER BY last_name ASC, first_name ASC, id ASC",
    )?;

    let rows = stmt.query_map([group_id], map_student)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_student(conn: &Connection, id: i64) -> AppResult<Student> {
    conn.query_row(
        "SELECT id, last_name, first_name, group_id FROM students WHERE id = ?1",
        [id],
        map_student,
    )
    .optional()?
    .ok_or_else(|| AppError::UnknownStudent(id.to_string()))
}

// ---------------------------
// Statuses
// ---------------------------

pub fn load_statuses(conn: &Connection) -> AppResult<Vec<Status>> {
    let mut stmt = conn.prepare("SELECT id, label FROM statuses ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, label) = r?;
        let kind = StatusKind::from_label(&label).ok_or(AppError::UnknownStatus(label))?;
        out.push(Status { id, kind });
    }
    Ok(out)
}

pub fn status_id(conn: &Connection, kind: StatusKind) -> AppResult<i64> {
    conn.query_row(
        "SELECT id FROM statuses WHERE label = ?1",
        [kind.label()],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| AppError::UnknownStatus(kind.label().to_string()))
}

// ---------------------------
// Entries
// ---------------------------

const ENTRY_SELECT: &str = "SELECT e.id, e.student_id, e.date, s.label AS status,
            e.arrival, e.departure, e.late_minutes, e.comment, e.updated_at
     FROM entries e
     JOIN statuses s ON s.id = e.status_id";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_stored_time(raw: &str) -> Result<Option<NaiveTime>> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(Some)
        .map_err(|_| conversion_error(AppError::InvalidTime(raw.to_string())))
}

pub fn map_entry(row: &Row) -> Result<Entry> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;

    let label: String = row.get("status")?;
    let status = StatusKind::from_label(&label)
        .ok_or_else(|| conversion_error(AppError::UnknownStatus(label.clone())))?;

    let arrival: String = row.get("arrival")?;
    let departure: String = row.get("departure")?;

    Ok(Entry {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        date,
        status,
        arrival: parse_stored_time(&arrival)?,
        departure: parse_stored_time(&departure)?,
        late_minutes: row.get("late_minutes")?,
        comment: row.get("comment")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn find_entry(conn: &Connection, student_id: i64, date: &NaiveDate) -> AppResult<Option<Entry>> {
    let sql = format!("{ENTRY_SELECT} WHERE e.student_id = ?1 AND e.date = ?2");
    let entry = conn
        .query_row(
            &sql,
            params![student_id, date.format("%Y-%m-%d").to_string()],
            map_entry,
        )
        .optional()?;
    Ok(entry)
}

/// Insert a new entry (id == 0) or update the stored one.
pub fn upsert_entry(conn: &Connection, entry: &Entry) -> AppResult<()> {
    let status_id = status_id(conn, entry.status)?;

    if entry.id == 0 {
        conn.execute(
            "INSERT INTO entries
                (student_id, date, status_id, arrival, departure, late_minutes, comment, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entry.student_id,
                entry.date_str(),
                status_id,
                entry.arrival_str(),
                entry.departure_str(),
                entry.late_minutes,
                entry.comment,
                entry.updated_at,
            ],
        )?;
    } else {
        conn.execute(
            "UPDATE entries
             SET status_id = ?1, arrival = ?2, departure = ?3,
                 late_minutes = ?4, comment = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                status_id,
                entry.arrival_str(),
                entry.departure_str(),
                entry.late_minutes,
                entry.comment,
                entry.updated_at,
                entry.id,
            ],
        )?;
    }
    Ok(())
}

pub fn load_entries_by_student(conn: &Connection, student_id: i64) -> AppResult<Vec<Entry>> {
    let sql = format!("{ENTRY_SELECT} WHERE e.student_id = ?1 ORDER BY e.date ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([student_id], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries of every student of a group between two dates (inclusive).
pub fn load_entries_by_group_between(
    conn: &Connection,
    group_id: i64,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<Entry>> {
    let sql = format!(
        "{ENTRY_SELECT}
         JOIN students st ON st.id = e.student_id
         WHERE st.group_id = ?1 AND e.date BETWEEN ?2 AND ?3
         ORDER BY e.date ASC, e.student_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            group_id,
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_entry,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
