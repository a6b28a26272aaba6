//! Attendance sheet model.
//!
//! A sheet is a list of rows: header rows (skipped when collecting) and one
//! row per student. Each student row owns its presence and absence flags,
//! its optional reason selector and the two time fields. The toggle handlers
//! operate on a single row and keep the two flags mutually exclusive.

use crate::errors::{AppError, AppResult};
use crate::models::student::Student;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Column titles of the header row of a freshly built sheet.
pub const HEADER: [&str; 6] = ["Name", "Present", "Absent", "Reason", "Arrival", "Departure"];

/// Number of cells of a student row in an imported sheet.
const CELLS_PER_ROW: usize = 6;

// ---------------------------
// Row model
// ---------------------------

/// Drop-down with the absence reason of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonSelector {
    pub value: String,
    pub visible: bool,
}

impl ReasonSelector {
    pub fn hidden(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            visible: false,
        }
    }
}

/// State of a row as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Unset,
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub student_id: Option<i64>,
    pub name: String,
    pub present: bool,
    pub absent: bool,
    pub reason: Option<ReasonSelector>,
    pub arrival: String,
    pub departure: String,
}

impl StudentRow {
    /// Unset row without a reason selector.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            student_id: None,
            name: name.into(),
            present: false,
            absent: false,
            reason: None,
            arrival: String::new(),
            departure: String::new(),
        }
    }

    /// Unset row for a stored student, with an empty hidden reason selector.
    pub fn for_student(student: &Student) -> Self {
        Self {
            student_id: Some(student.id),
            reason: Some(ReasonSelector::hidden("")),
            ..Self::new(student.display_name())
        }
    }

    /// Presence checkbox changed.
    ///
    /// Checking it clears the absence flag and hides the reason selector.
    /// Unchecking it touches nothing else, so the row falls back to `Unset`.
    pub fn toggle_present(&mut self, checked: bool) {
        self.present = checked;
        if checked {
            self.absent = false;
            self.set_reason_visible(false);
        }
    }

    /// Absence checkbox changed.
    ///
    /// This is the only place where the reason selector becomes visible.
    pub fn toggle_absent(&mut self, checked: bool) {
        self.absent = checked;
        if checked {
            self.present = false;
        }
        self.set_reason_visible(checked);
    }

    fn set_reason_visible(&mut self, visible: bool) {
        if let Some(sel) = self.reason.as_mut() {
            sel.visible = visible;
        }
    }

    /// Pick a reason, creating the selector if the row has none.
    pub fn set_reason(&mut self, value: impl Into<String>) {
        let visible = self.absent;
        match self.reason.as_mut() {
            Some(sel) => sel.value = value.into(),
            None => {
                self.reason = Some(ReasonSelector {
                    value: value.into(),
                    visible,
                })
            }
        }
    }

    pub fn reason_visible(&self) -> bool {
        self.reason.as_ref().is_some_and(|s| s.visible)
    }

    pub fn state(&self) -> RowState {
        match (self.present, self.absent) {
            (_, true) => RowState::Absent,
            (true, false) => RowState::Present,
            (false, false) => RowState::Unset,
        }
    }

    /// Snapshot of the row; a missing selector reads as an empty reason.
    pub fn record(&self) -> AttendanceRecord {
        AttendanceRecord {
            name: self.name.clone(),
            present: self.present,
            absent: self.absent,
            reason: self
                .reason
                .as_ref()
                .map(|s| s.value.clone())
                .unwrap_or_default(),
            arrival: self.arrival.clone(),
            departure: self.departure.clone(),
        }
    }

    /// Build a row from the six raw cells of an imported sheet:
    /// name, present, absent, reason, arrival, departure.
    ///
    /// `row` is the 1-based data-row number used in error messages.
    pub fn from_cells(row: usize, cells: &[String]) -> AppResult<Self> {
        if cells.len() != CELLS_PER_ROW {
            return Err(AppError::MalformedRow {
                row,
                reason: format!("expected {} cells, found {}", CELLS_PER_ROW, cells.len()),
            });
        }

        let name = cells[0].trim();
        if name.is_empty() {
            return Err(AppError::MalformedRow {
                row,
                reason: "empty name cell".into(),
            });
        }

        let present = parse_checkbox(&cells[1]).ok_or_else(|| AppError::MalformedRow {
            row,
            reason: format!("present cell is not a checkbox value: '{}'", cells[1]),
        })?;
        let absent = parse_checkbox(&cells[2]).ok_or_else(|| AppError::MalformedRow {
            row,
            reason: format!("absent cell is not a checkbox value: '{}'", cells[2]),
        })?;
        if present && absent {
            return Err(AppError::MalformedRow {
                row,
                reason: "present and absent are both checked".into(),
            });
        }

        let reason = match cells[3].trim() {
            "" => None,
            value => Some(ReasonSelector {
                value: value.to_string(),
                visible: absent,
            }),
        };

        Ok(Self {
            student_id: None,
            name: name.to_string(),
            present,
            absent,
            reason,
            arrival: cells[4].trim().to_string(),
            departure: cells[5].trim().to_string(),
        })
    }
}

fn parse_checkbox(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "x" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

// ---------------------------
// Collected data
// ---------------------------

/// Snapshot of one student row at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub name: String,
    #[serde(rename = "anwesend")]
    pub present: bool,
    #[serde(rename = "abwesend")]
    pub absent: bool,
    #[serde(rename = "grund")]
    pub reason: String,
    #[serde(rename = "ankunft")]
    pub arrival: String,
    #[serde(rename = "verlassen")]
    pub departure: String,
}

/// One record per student row, in row order.
pub type AttendanceBatch = Vec<AttendanceRecord>;

// ---------------------------
// Sheet
// ---------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRow {
    Header(Vec<String>),
    Student(StudentRow),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSheet {
    pub rows: Vec<SheetRow>,
}

impl AttendanceSheet {
    /// Empty sheet with the default header row.
    pub fn new() -> Self {
        Self {
            rows: vec![SheetRow::Header(
                HEADER.iter().map(|h| h.to_string()).collect(),
            )],
        }
    }

    /// Sheet with one unset row per student, in the given order.
    pub fn for_students(students: &[Student]) -> Self {
        let mut sheet = Self::new();
        for s in students {
            sheet.push(StudentRow::for_student(s));
        }
        sheet
    }

    pub fn push(&mut self, row: StudentRow) {
        self.rows.push(SheetRow::Student(row));
    }

    pub fn students(&self) -> impl Iterator<Item = &StudentRow> {
        self.rows.iter().filter_map(|r| match r {
            SheetRow::Student(s) => Some(s),
            SheetRow::Header(_) => None,
        })
    }

    fn students_mut(&mut self) -> impl Iterator<Item = &mut StudentRow> {
        self.rows.iter_mut().filter_map(|r| match r {
            SheetRow::Student(s) => Some(s),
            SheetRow::Header(_) => None,
        })
    }

    /// Stored student id of every student row, in row order.
    pub fn student_ids(&self) -> Vec<Option<i64>> {
        self.students().map(|r| r.student_id).collect()
    }

    pub fn student_count(&self) -> usize {
        self.students().count()
    }

    /// Resolve a mark key: a student id first, otherwise the 1-based
    /// position of a row that is not linked to a stored student.
    pub fn row_mut(&mut self, key: i64) -> Option<&mut StudentRow> {
        let by_id = self.students().position(|r| r.student_id == Some(key));
        let idx = match by_id {
            Some(i) => i,
            None => {
                let pos = usize::try_from(key).ok()?.checked_sub(1)?;
                let row = self.students().nth(pos)?;
                if row.student_id.is_some() {
                    return None;
                }
                pos
            }
        };
        self.students_mut().nth(idx)
    }

    /// Apply one toggle event.
    pub fn apply(&mut self, mark: &Mark) -> AppResult<()> {
        let row = self
            .row_mut(mark.row)
            .ok_or_else(|| AppError::InvalidMark(format!("no row {} in sheet", mark.row)))?;

        match &mark.action {
            MarkAction::Present(checked) => row.toggle_present(*checked),
            MarkAction::Absent(checked) => row.toggle_absent(*checked),
            MarkAction::Reason(value) => row.set_reason(value.clone()),
            MarkAction::Arrival(value) => row.arrival = value.clone(),
            MarkAction::Departure(value) => row.departure = value.clone(),
        }
        Ok(())
    }

    /// Apply a script of toggle events in order, stopping at the first error.
    pub fn apply_all(&mut self, marks: &[Mark]) -> AppResult<()> {
        marks.iter().try_for_each(|m| self.apply(m))
    }

    /// Snapshot every student row, skipping header rows.
    pub fn collect(&self) -> AttendanceBatch {
        self.students().map(StudentRow::record).collect()
    }

    /// Read a sheet from CSV: the first line is the header row, every
    /// following line must be a well-formed six-cell student row.
    pub fn from_csv_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = rdr.records();

        let header = match records.next() {
            Some(r) => r.map_err(csv_error)?,
            None => {
                return Err(AppError::MalformedRow {
                    row: 0,
                    reason: "sheet is empty, header row missing".into(),
                });
            }
        };

        let mut sheet = Self {
            rows: vec![SheetRow::Header(
                header.iter().map(str::to_string).collect(),
            )],
        };

        for (i, rec) in records.enumerate() {
            let rec = rec.map_err(csv_error)?;
            let cells: Vec<String> = rec.iter().map(str::to_string).collect();
            sheet.push(StudentRow::from_cells(i + 1, &cells)?);
        }

        Ok(sheet)
    }

    pub fn from_csv_path(path: &Path) -> AppResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }
}

fn csv_error(e: csv::Error) -> AppError {
    let row = e
        .position()
        .map(|p| p.line().saturating_sub(1) as usize)
        .unwrap_or(0);
    AppError::MalformedRow {
        row,
        reason: e.to_string(),
    }
}

// ---------------------------
// Mark scripts
// ---------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkAction {
    Present(bool),
    Absent(bool),
    Reason(String),
    Arrival(String),
    Departure(String),
}

/// One toggle event, written `<row>:<action>` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
    pub row: i64,
    pub action: MarkAction,
}

impl Mark {
    pub fn parse(s: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidMark(s.to_string());

        let (row_raw, action_raw) = s.split_once(':').ok_or_else(invalid)?;
        let row: i64 = row_raw.trim().parse().map_err(|_| invalid())?;
        let action_raw = action_raw.trim();

        let action = match action_raw {
            "present" => MarkAction::Present(true),
            "-present" => MarkAction::Present(false),
            "absent" => MarkAction::Absent(true),
            "-absent" => MarkAction::Absent(false),
            other => match other.split_once('=') {
                Some(("reason", v)) => MarkAction::Reason(v.trim().to_string()),
                Some(("in", v)) => MarkAction::Arrival(v.trim().to_string()),
                Some(("out", v)) => MarkAction::Departure(v.trim().to_string()),
                _ => return Err(invalid()),
            },
        };

        Ok(Self { row, action })
    }
}
