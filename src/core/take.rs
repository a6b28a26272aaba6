use crate::config::Config;
use crate::core::record::RecordLogic;
use crate::core::sheet::{AttendanceBatch, AttendanceSheet, Mark};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{find_group, load_students_by_group};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;

/// What `take` should do, as parsed from the command line.
pub struct TakeRequest<'a> {
    pub group_id: i64,
    pub date: NaiveDate,
    pub marks: &'a [String],
    pub sheet: Option<&'a str>,
    pub dry_run: bool,
}

/// High-level logic of the `take` command: build the sheet, replay the
/// toggle events, collect, persist and acknowledge.
pub struct TakeLogic;

impl TakeLogic {
    pub fn apply(pool: &mut DbPool, cfg: &Config, req: &TakeRequest) -> AppResult<AttendanceBatch> {
        let group = find_group(&pool.conn, req.group_id)?;
        let expected = cfg.expected_arrival_time()?;

        // ------------------------------------------------
        // 1️⃣ Build the sheet
        // ------------------------------------------------
        let mut sheet = match req.sheet {
            Some(path) => AttendanceSheet::from_csv_path(Path::new(path))?,
            None => {
                let students = load_students_by_group(&pool.conn, group.id)?;
                AttendanceSheet::for_students(&students)
            }
        };

        let empty = sheet.student_count() == 0;
        if empty {
            match req.sheet {
                Some(path) => warning(format!("Sheet '{}' has no student rows.", path)),
                None => warning(format!("Group '{}' has no students.", group.name)),
            }
        }

        // ------------------------------------------------
        // 2️⃣ Replay toggle events
        // ------------------------------------------------
        let marks = req
            .marks
            .iter()
            .map(|m| Mark::parse(m))
            .collect::<AppResult<Vec<_>>>()?;
        sheet.apply_all(&marks)?;

        // ------------------------------------------------
        // 3️⃣ Collect
        // ------------------------------------------------
        let batch = sheet.collect();
        print_batch(&batch, &cfg.separator_char);

        // ------------------------------------------------
        // 4️⃣ Persist (unless dry run) and report
        // ------------------------------------------------
        let saved = !req.dry_run && !empty;
        if req.dry_run {
            info("Dry run: nothing written to the attendance entries.");
        } else if saved {
            let summary = RecordLogic::persist(
                pool,
                group.id,
                req.date,
                &sheet.student_ids(),
                &batch,
                expected,
            )?;

            info(format!(
                "{} on {}: {} new, {} updated.",
                group.name, req.date, summary.inserted, summary.updated
            ));
            if !summary.skipped.is_empty() {
                warning(format!(
                    "Not recorded (neither present nor absent): {}",
                    summary.skipped.join(", ")
                ));
            }
        }

        report(
            &pool.conn,
            &format!("{} {}", group.name, req.date),
            &batch,
            saved,
        )?;
        Ok(batch)
    }
}

/// Write the batch to the audit log and acknowledge it to the user.
///
/// `saved` is false when no entry was written (dry run or empty sheet).
pub fn report(
    conn: &Connection,
    target: &str,
    batch: &AttendanceBatch,
    saved: bool,
) -> AppResult<()> {
    let json = serde_json::to_string(batch)
        .map_err(|e| AppError::Other(format!("cannot serialize batch: {e}")))?;

    if saved {
        audit(conn, "save", target, &json)?;
        success("Attendance saved!");
    } else {
        audit(conn, "save", &format!("{target} (not stored)"), &json)?;
        success(format!("Attendance collected: {} records, nothing saved.", batch.len()));
    }
    Ok(())
}

fn print_batch(batch: &AttendanceBatch, sep: &str) {
    let mut table = Table::new(vec!["#", "Name", "Present", "Absent", "Reason", "In", "Out"]);
    let tick = |b: bool| if b { "x".to_string() } else { String::new() };

    for (i, rec) in batch.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            rec.name.clone(),
            tick(rec.present),
            tick(rec.absent),
            rec.reason.clone(),
            rec.arrival.clone(),
            rec.departure.clone(),
        ]);
    }

    print!("{}", table.render(sep));

    let no_arrival = batch
        .iter()
        .filter(|r| r.present && r.arrival.trim().is_empty())
        .count();
    if no_arrival > 0 {
        println!("{no_arrival} present without arrival time (counted as on time)");
    }
}
