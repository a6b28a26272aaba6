use chrono::{NaiveDate, NaiveTime};
use rattendance::core::list::{ListLogic, MonthGrid, NO_ENTRY};
use rattendance::core::record::RecordLogic;
use rattendance::core::sheet::{AttendanceRecord, AttendanceSheet, Mark};
use rattendance::core::stats::StatsLogic;
use rattendance::db::pool::DbPool;
use rattendance::db::queries::{
    find_entry, insert_group, insert_student, load_entries_by_student, load_students_by_group,
};
use rattendance::errors::AppError;
use rattendance::models::status::StatusKind;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
}

fn eight() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap()
}

/// In-memory DB with group "5A": Alice Doe and Bob Roe
fn class_pool() -> (DbPool, i64, i64, i64) {
    let pool = DbPool::in_memory().expect("in-memory db");
    let gid = insert_group(&pool.conn, "5A").unwrap();
    let alice = insert_student(&pool.conn, "Doe", "Alice", gid).unwrap();
    let bob = insert_student(&pool.conn, "Roe", "Bob", gid).unwrap();
    (pool, gid, alice, bob)
}

fn record(name: &str, present: bool, absent: bool, reason: &str) -> AttendanceRecord {
    AttendanceRecord {
        name: name.into(),
        present,
        absent,
        reason: reason.into(),
        arrival: String::new(),
        departure: String::new(),
    }
}

#[test]
fn test_status_for_record() {
    let status = |p, a, r| RecordLogic::status_for(&record("X", p, a, r)).unwrap();

    assert_eq!(status(true, false, ""), Some(StatusKind::Present));
    assert_eq!(status(false, true, ""), Some(StatusKind::Unexcused));
    assert_eq!(status(false, true, "sick"), Some(StatusKind::Sick));
    assert_eq!(status(false, false, "Sick"), None);

    let err = RecordLogic::status_for(&record("X", false, true, "Holiday")).unwrap_err();
    assert!(matches!(err, AppError::UnknownStatus(_)));
}

#[test]
fn test_persist_inserts_then_updates() {
    let (mut pool, gid, alice, bob) = class_pool();
    let students = load_students_by_group(&pool.conn, gid).unwrap();

    let mut sheet = AttendanceSheet::for_students(&students);
    sheet
        .apply_all(&[
            Mark::parse(&format!("{alice}:present")).unwrap(),
            Mark::parse(&format!("{alice}:in=08:25")).unwrap(),
            Mark::parse(&format!("{bob}:absent")).unwrap(),
            Mark::parse(&format!("{bob}:reason=Excused")).unwrap(),
        ])
        .unwrap();

    let summary = RecordLogic::persist(
        &mut pool,
        gid,
        day(),
        &sheet.student_ids(),
        &sheet.collect(),
        eight(),
    )
    .unwrap();
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.updated, 0);

    let a = find_entry(&pool.conn, alice, &day()).unwrap().unwrap();
    assert_eq!(a.status, StatusKind::Present);
    assert_eq!(a.late_minutes, 25);
    assert_eq!(a.comment, "Late: 25 minutes");

    let b = find_entry(&pool.conn, bob, &day()).unwrap().unwrap();
    assert_eq!(b.status, StatusKind::Excused);
    assert_eq!(b.late_minutes, 0);

    // retaking the same day updates in place
    sheet.apply(&Mark::parse(&format!("{bob}:present")).unwrap()).unwrap();
    let summary = RecordLogic::persist(
        &mut pool,
        gid,
        day(),
        &sheet.student_ids(),
        &sheet.collect(),
        eight(),
    )
    .unwrap();
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.updated, 2);
    assert_eq!(load_entries_by_student(&pool.conn, bob).unwrap().len(), 1);
    assert_eq!(
        find_entry(&pool.conn, bob, &day()).unwrap().unwrap().status,
        StatusKind::Present
    );
}

#[test]
fn test_persist_skips_unset_rows() {
    let (mut pool, gid, alice, _bob) = class_pool();
    let students = load_students_by_group(&pool.conn, gid).unwrap();

    let mut sheet = AttendanceSheet::for_students(&students);
    sheet.apply(&Mark::parse(&format!("{alice}:present")).unwrap()).unwrap();

    let summary = RecordLogic::persist(
        &mut pool,
        gid,
        day(),
        &sheet.student_ids(),
        &sheet.collect(),
        eight(),
    )
    .unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, vec!["Bob Roe".to_string()]);
}

#[test]
fn test_persist_is_all_or_nothing() {
    let (mut pool, gid, alice, _bob) = class_pool();

    // second row names nobody in the group
    let batch = vec![
        record("Alice Doe", true, false, ""),
        record("Carol King", false, true, ""),
    ];
    let err = RecordLogic::persist(&mut pool, gid, day(), &[None, None], &batch, eight())
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownStudent(_)));
    assert!(find_entry(&pool.conn, alice, &day()).unwrap().is_none());

    let bad_time = vec![AttendanceRecord {
        arrival: "8 o'clock".into(),
        ..record("Alice Doe", true, false, "")
    }];
    let err = RecordLogic::persist(&mut pool, gid, day(), &[None], &bad_time, eight())
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));
}

#[test]
fn test_stats_after_two_days() {
    let (mut pool, gid, alice, bob) = class_pool();
    let second = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();

    let ids = [Some(alice), Some(bob)];
    let day_one = vec![
        AttendanceRecord {
            arrival: "08:10".into(),
            ..record("Alice Doe", true, false, "")
        },
        record("Bob Roe", false, true, "Sick"),
    ];
    let day_two = vec![
        record("Alice Doe", true, false, ""),
        record("Bob Roe", true, false, ""),
    ];
    RecordLogic::persist(&mut pool, gid, day(), &ids, &day_one, eight()).unwrap();
    RecordLogic::persist(&mut pool, gid, second, &ids, &day_two, eight()).unwrap();

    let stats = StatsLogic::for_group(&pool.conn, gid).unwrap();
    assert_eq!(stats.len(), 2);

    let a = &stats[0];
    assert_eq!(a.student.id, alice);
    assert_eq!((a.total, a.present, a.late), (2, 2, 1));
    assert!((a.rate - 100.0).abs() < f64::EPSILON);

    let b = &stats[1];
    assert_eq!((b.total, b.present, b.sick), (2, 1, 1));
    assert!((b.rate - 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_month_grid_cells() {
    let (mut pool, gid, alice, bob) = class_pool();
    let batch = vec![
        record("Alice Doe", true, false, ""),
        record("Bob Roe", false, true, "Sick"),
    ];
    RecordLogic::persist(&mut pool, gid, day(), &[Some(alice), Some(bob)], &batch, eight())
        .unwrap();

    let grid = ListLogic::month_grid(&pool.conn, gid, day()).unwrap();
    assert_eq!(grid.month_label(), "2025-09");
    assert_eq!(grid.days.len(), 30);

    let rest: String = std::iter::repeat_n(NO_ENTRY, 29).collect();
    assert_eq!(MonthGrid::plain_cells(&grid.lines[0].1), format!("P{rest}"));
    assert_eq!(MonthGrid::plain_cells(&grid.lines[1].1), format!("S{rest}"));
}
