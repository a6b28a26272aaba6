use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, init_db_with_class, rat, setup_test_db, take_first_day, temp_out};

#[test]
fn test_init_creates_schema_and_logs() {
    let db_path = setup_test_db("init_creates_schema");
    init_db(&db_path);

    rat()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("init")));

    rat()
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Excused").and(contains("Sick")));
}

#[test]
fn test_group_and_student_roster() {
    let db_path = setup_test_db("group_and_student_roster");
    init_db_with_class(&db_path);

    rat()
        .args(["--db", &db_path, "group", "--list"])
        .assert()
        .success()
        .stdout(contains("5A"));

    rat()
        .args(["--db", &db_path, "student", "--list", "--group", "1"])
        .assert()
        .success()
        .stdout(contains("Doe").and(contains("Roe")));

    rat()
        .args(["--db", &db_path, "group", "--add", "5A"])
        .assert()
        .failure()
        .stderr(contains("5A"));

    rat()
        .args([
            "--db", &db_path, "student", "--add", "King", "--first", "Carol", "--group", "9",
        ])
        .assert()
        .failure();
}

#[test]
fn test_take_saves_and_acknowledges() {
    let db_path = setup_test_db("take_saves");
    init_db_with_class(&db_path);

    rat()
        .args([
            "--db",
            &db_path,
            "take",
            "1",
            "--date",
            "2025-09-01",
            "--mark",
            "1:present",
            "--mark",
            "2:absent",
            "--mark",
            "2:reason=Sick",
        ])
        .assert()
        .success()
        .stdout(contains("2 new, 0 updated").and(contains("Attendance saved!")));

    // retake the same day
    rat()
        .args([
            "--db",
            &db_path,
            "take",
            "1",
            "--date",
            "2025-09-01",
            "--mark",
            "1:present",
            "--mark",
            "2:present",
        ])
        .assert()
        .success()
        .stdout(contains("0 new, 2 updated"));

    rat()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("take").and(contains("save")));
}

#[test]
fn test_take_warns_about_unset_rows() {
    let db_path = setup_test_db("take_unset_rows");
    init_db_with_class(&db_path);

    rat()
        .args([
            "--db", &db_path, "take", "1", "--date", "2025-09-02", "--mark", "2:present",
        ])
        .assert()
        .success()
        .stdout(contains("Not recorded").and(contains("Alice Doe")));
}

#[test]
fn test_take_dry_run_writes_nothing() {
    let db_path = setup_test_db("take_dry_run");
    init_db_with_class(&db_path);

    rat()
        .args([
            "--db",
            &db_path,
            "take",
            "1",
            "--date",
            "2025-09-01",
            "--mark",
            "1:present",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(
            contains("Dry run")
                .and(contains("nothing saved"))
                .and(contains("Attendance saved!").not()),
        );

    rat()
        .args(["--db", &db_path, "stats", "--student", "1"])
        .assert()
        .success()
        .stdout(contains("0.0%"));
}

#[test]
fn test_take_rejects_bad_input() {
    let db_path = setup_test_db("take_bad_input");
    init_db_with_class(&db_path);

    rat()
        .args(["--db", &db_path, "take", "1", "--mark", "1-present"])
        .assert()
        .failure()
        .stderr(contains("Invalid mark"));

    rat()
        .args(["--db", &db_path, "take", "1", "--mark", "1:absent", "--mark", "1:reason=Holiday"])
        .assert()
        .failure()
        .stderr(contains("Holiday"));

    rat()
        .args(["--db", &db_path, "take", "7"])
        .assert()
        .failure()
        .stderr(contains("Unknown group"));
}

#[test]
fn test_take_from_sheet_file() {
    let db_path = setup_test_db("take_from_sheet");
    init_db_with_class(&db_path);

    let sheet = temp_out("take_from_sheet", "csv");
    fs::write(
        &sheet,
        "Name,Present,Absent,Reason,Arrival,Departure\n\
         Alice Doe,,,,08:00,15:00\n\
         Bob Roe,x,,,08:05,\n",
    )
    .unwrap();

    rat()
        .args([
            "--db", &db_path, "take", "1", "--date", "2025-09-03", "--sheet", &sheet, "--mark",
            "2:absent",
        ])
        .assert()
        .success()
        .stdout(contains("1 new"));

    // one malformed row and nothing is taken
    fs::write(
        &sheet,
        "Name,Present,Absent,Reason,Arrival,Departure\n\
         Alice Doe,x,x,,08:00,15:00\n",
    )
    .unwrap();

    rat()
        .args(["--db", &db_path, "take", "1", "--sheet", &sheet])
        .assert()
        .failure()
        .stderr(contains("Malformed sheet row 1"));
}

#[test]
fn test_list_and_stats() {
    let db_path = setup_test_db("list_and_stats");
    init_db_with_class(&db_path);
    take_first_day(&db_path);

    rat()
        .args(["--db", &db_path, "list", "1", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(contains("5A · 2025-09").and(contains("Alice Doe")));

    rat()
        .args(["--db", &db_path, "stats", "--group", "1"])
        .assert()
        .success()
        .stdout(contains("100.0%").and(contains("Below 75% attendance")));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("export_csv_json");
    init_db_with_class(&db_path);
    take_first_day(&db_path);

    let out = temp_out("export_csv_json", "csv");
    rat()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2025-09",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("date,group,student_id"));
    assert!(content.contains("2025-09-01,5A,1,Doe,Alice,Present,08:10,,10,Late: 10 minutes"));
    assert!(content.contains("Sick"));

    let out = temp_out("export_csv_json", "json");
    rat()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--group", "1",
        ])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read exported json")).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
    assert_eq!(json[1]["status"], "Sick");
}

#[test]
fn test_export_xlsx_and_empty_range() {
    let db_path = setup_test_db("export_xlsx");
    init_db_with_class(&db_path);
    take_first_day(&db_path);

    let out = temp_out("export_xlsx", "xlsx");
    rat()
        .args(["--db", &db_path, "export", "--format", "xlsx", "--file", &out])
        .assert()
        .success();
    assert!(fs::metadata(&out).map(|m| m.len() > 0).unwrap_or(false));

    let empty = temp_out("export_empty", "csv");
    rat()
        .args([
            "--db", &db_path, "export", "--file", &empty, "--range", "2024",
        ])
        .assert()
        .success()
        .stdout(contains("No attendance entries"));

    rat()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("backup_compressed");
    init_db_with_class(&db_path);

    let dest = temp_out("backup_compressed", "sqlite");
    let zip = temp_out("backup_compressed", "zip");

    rat()
        .args(["--db", &db_path, "backup", "--file", &dest, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(fs::metadata(&zip).is_ok());
    assert!(fs::metadata(&dest).is_err());
}

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("db_check_info");
    init_db_with_class(&db_path);

    rat()
        .args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed").and(contains("Students:")));
}

#[test]
fn test_take_header_only_sheet_still_reports() {
    let db_path = setup_test_db("take_header_only_sheet");
    init_db_with_class(&db_path);

    let sheet = temp_out("take_header_only_sheet", "csv");
    fs::write(&sheet, "Name,Present,Absent,Reason,Arrival,Departure\n").unwrap();

    rat()
        .args([
            "--db", &db_path, "take", "1", "--date", "2025-09-04", "--sheet", &sheet,
        ])
        .assert()
        .success()
        .stdout(
            contains("has no student rows")
                .and(contains("has no students").not())
                .and(contains("Attendance collected: 0 records")),
        );

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let saves: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'save' AND message = '[]'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(saves, 1);
}
