use crate::errors::{AppError, AppResult};
use crate::models::status::StatusKind;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, params};

/// Ensure that the `log` table exists; migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

/// Ordered schema history. Never edit an applied entry, append a new one.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_initial_schema",
        description: "Created groups, students, statuses and entries tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS student_groups (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS students (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name   TEXT NOT NULL,
            first_name  TEXT NOT NULL,
            group_id    INTEGER NOT NULL REFERENCES student_groups(id)
        );

        CREATE TABLE IF NOT EXISTS statuses (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            label  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id  INTEGER NOT NULL REFERENCES students(id),
            date        TEXT NOT NULL,
            status_id   INTEGER NOT NULL REFERENCES statuses(id),
            arrival     TEXT NOT NULL DEFAULT '',
            departure   TEXT NOT NULL DEFAULT '',
            comment     TEXT NOT NULL DEFAULT '',
            updated_at  TEXT NOT NULL,
            UNIQUE(student_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_students_group ON students(group_id);
        CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);
        "#,
    },
    Migration {
        version: "20250315_0002_add_late_minutes",
        description: "Added late_minutes to entries",
        sql: "ALTER TABLE entries ADD COLUMN late_minutes INTEGER NOT NULL DEFAULT 0;",
    },
];

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![m.version, m.description],
    )?;

    tx.commit()?;
    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Statuses are reference data: insert the missing ones on every run.
fn seed_statuses(conn: &Connection) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare_cached("INSERT OR IGNORE INTO statuses (label) VALUES (?1)")?;
    for kind in StatusKind::ALL {
        stmt.execute([kind.label()])?;
    }
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::init_db() and by `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    seed_statuses(conn)?;
    Ok(())
}
