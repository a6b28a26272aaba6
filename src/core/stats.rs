use crate::db::queries::{
    find_group, find_student, load_entries_by_student, load_students_by_group,
};
use crate::errors::AppResult;
use crate::models::entry::Entry;
use crate::models::status::StatusKind;
use crate::models::student::Student;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_rate};
use crate::utils::table::Table;
use rusqlite::Connection;
use serde::Serialize;

/// Attendance figures of one student over all stored entries.
#[derive(Debug, Clone, Serialize)]
pub struct StudentStats {
    pub student: Student,
    pub total: usize,
    pub present: usize,
    /// Percentage of `Present` entries; 0.0 when there are none.
    pub rate: f64,
    pub excused: usize,
    pub unexcused: usize,
    pub sick: usize,
    pub late: usize,
}

pub struct StatsLogic;

impl StatsLogic {
    pub fn compute(student: Student, entries: &[Entry]) -> StudentStats {
        let count = |kind: StatusKind| entries.iter().filter(|e| e.status == kind).count();

        let total = entries.len();
        let present = count(StatusKind::Present);
        let rate = if total > 0 {
            present as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        StudentStats {
            student,
            total,
            present,
            rate,
            excused: count(StatusKind::Excused),
            unexcused: count(StatusKind::Unexcused),
            sick: count(StatusKind::Sick),
            late: entries.iter().filter(|e| e.is_late()).count(),
        }
    }

    pub fn for_student(conn: &Connection, student_id: i64) -> AppResult<StudentStats> {
        let student = find_student(conn, student_id)?;
        let entries = load_entries_by_student(conn, student_id)?;
        Ok(Self::compute(student, &entries))
    }

    /// One line per student of the group, in sheet order.
    pub fn for_group(conn: &Connection, group_id: i64) -> AppResult<Vec<StudentStats>> {
        find_group(conn, group_id)?;
        load_students_by_group(conn, group_id)?
            .into_iter()
            .map(|s| {
                let entries = load_entries_by_student(conn, s.id)?;
                Ok(Self::compute(s, &entries))
            })
            .collect()
    }

    pub fn print(title: &str, stats: &[StudentStats], sep: &str) {
        header(title);

        let mut table = Table::new(vec![
            "ID", "Student", "Days", "Rate", "Excused", "Unexcused", "Sick", "Late",
        ]);
        for s in stats {
            table.add_row(vec![
                s.student.id.to_string(),
                s.student.display_name(),
                s.total.to_string(),
                format!("{:.1}%", s.rate),
                s.excused.to_string(),
                s.unexcused.to_string(),
                s.sick.to_string(),
                s.late.to_string(),
            ]);
        }
        print!("{}", table.render(sep));

        let low: Vec<String> = stats
            .iter()
            .filter(|s| s.total > 0 && s.rate < 75.0)
            .map(|s| {
                format!(
                    "{}{}{} ({:.1}%)",
                    color_for_rate(s.rate),
                    s.student.display_name(),
                    RESET,
                    s.rate
                )
            })
            .collect();
        if !low.is_empty() {
            println!("\nBelow 75% attendance: {}", low.join(", "));
        }
    }
}
