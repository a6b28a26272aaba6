use crate::db::queries::{find_group, load_entries_by_group_between, load_students_by_group};
use crate::errors::AppResult;
use crate::models::group::Group;
use crate::models::status::StatusKind;
use crate::models::student::Student;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, color_for_status};
use crate::utils::date::{all_days_of_month, month_bounds};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use std::collections::HashMap;

/// Marker of a day without an entry.
pub const NO_ENTRY: char = '·';

/// Attendance of a group over one month.
pub struct MonthGrid {
    pub group: Group,
    pub month_start: NaiveDate,
    pub days: Vec<NaiveDate>,
    /// One line per student, one cell per day.
    pub lines: Vec<(Student, Vec<Option<StatusKind>>)>,
}

impl MonthGrid {
    pub fn month_label(&self) -> String {
        self.month_start.format("%Y-%m").to_string()
    }

    /// Cell text of one line: status initials, `NO_ENTRY` for missing days.
    pub fn plain_cells(cells: &[Option<StatusKind>]) -> String {
        cells
            .iter()
            .map(|c| c.map(|k| k.initial()).unwrap_or(NO_ENTRY))
            .collect()
    }
}

pub struct ListLogic;

impl ListLogic {
    pub fn month_grid(conn: &Connection, group_id: i64, month_start: NaiveDate) -> AppResult<MonthGrid> {
        let group = find_group(conn, group_id)?;
        let students = load_students_by_group(conn, group_id)?;
        let (first, last) = month_bounds(month_start)?;
        let days = all_days_of_month(first.year(), first.month());

        let entries = load_entries_by_group_between(conn, group_id, &first, &last)?;
        let mut by_key: HashMap<(i64, NaiveDate), StatusKind> = HashMap::new();
        for e in entries {
            by_key.insert((e.student_id, e.date), e.status);
        }

        let lines = students
            .into_iter()
            .map(|s| {
                let cells = days
                    .iter()
                    .map(|d| by_key.get(&(s.id, *d)).copied())
                    .collect();
                (s, cells)
            })
            .collect();

        Ok(MonthGrid {
            group,
            month_start: first,
            days,
            lines,
        })
    }

    pub fn print(grid: &MonthGrid) {
        header(format!("{} · {}", grid.group.name, grid.month_label()));

        if grid.lines.is_empty() {
            println!("No students in this group.");
            return;
        }

        let name_w = grid
            .lines
            .iter()
            .map(|(s, _)| s.display_name().chars().count())
            .max()
            .unwrap_or(0);

        // Day numbers, tens over units
        let tens: String = grid.days.iter().map(|d| tens_digit(d.day())).collect();
        let units: String = grid
            .days
            .iter()
            .map(|d| char::from_digit(d.day() % 10, 10).unwrap_or(' '))
            .collect();
        println!("{:name_w$}  {}", "", tens, name_w = name_w);
        println!("{:name_w$}  {}", "", units, name_w = name_w);

        for (student, cells) in &grid.lines {
            let colored: String = cells
                .iter()
                .map(|c| match c {
                    Some(k) => format!("{}{}{}", color_for_status(k.label()), k.initial(), RESET),
                    None => format!("{GREY}{NO_ENTRY}{RESET}"),
                })
                .collect();
            println!(
                "{:<name_w$}  {}",
                student.display_name(),
                colored,
                name_w = name_w
            );
        }

        println!("\nP = Present, E = Excused, U = Unexcused, S = Sick");
    }
}

fn tens_digit(day: u32) -> char {
    if day < 10 {
        ' '
    } else {
        char::from_digit(day / 10, 10).unwrap_or(' ')
    }
}
