use rattendance::core::sheet::{
    AttendanceRecord, AttendanceSheet, Mark, MarkAction, ReasonSelector, RowState, SheetRow,
    StudentRow,
};
use rattendance::errors::AppError;
use rattendance::models::student::Student;

fn student(id: i64, last: &str, first: &str) -> Student {
    Student {
        id,
        last_name: last.into(),
        first_name: first.into(),
        group_id: 1,
    }
}

fn cells(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

/// Header + Alice (unset, no selector) + Bob (present, hidden selector)
fn alice_and_bob() -> AttendanceSheet {
    let mut sheet = AttendanceSheet::new();

    let mut alice = StudentRow::new("Alice");
    alice.arrival = "08:00".into();
    alice.departure = "15:00".into();
    sheet.push(alice);

    let mut bob = StudentRow::new("Bob");
    bob.present = true;
    bob.reason = Some(ReasonSelector::hidden("Sick"));
    bob.arrival = "08:05".into();
    sheet.push(bob);

    sheet
}

#[test]
fn test_checking_present_clears_absent_and_hides_reason() {
    let mut row = StudentRow::for_student(&student(1, "Doe", "Alice"));
    row.toggle_absent(true);
    assert!(row.reason_visible());

    row.toggle_present(true);

    assert!(row.present);
    assert!(!row.absent);
    assert!(!row.reason_visible());
    assert_eq!(row.state(), RowState::Present);
}

#[test]
fn test_checking_absent_clears_present_and_shows_reason() {
    let mut row = StudentRow::for_student(&student(1, "Doe", "Alice"));
    row.toggle_present(true);

    row.toggle_absent(true);

    assert!(!row.present);
    assert!(row.absent);
    assert!(row.reason_visible());
    assert_eq!(row.state(), RowState::Absent);
}

#[test]
fn test_reason_visibility_follows_absent_flag() {
    let mut row = StudentRow::for_student(&student(1, "Doe", "Alice"));

    let script = [
        (true, true),
        (false, false),
        (true, true),
        (false, true),
        (true, false),
        (false, false),
    ];
    for (is_absent_toggle, checked) in script {
        if is_absent_toggle {
            row.toggle_absent(checked);
        } else {
            row.toggle_present(checked);
        }
        assert!(!(row.present && row.absent));
        assert_eq!(row.reason_visible(), row.absent);
    }
}

#[test]
fn test_unchecking_present_leaves_row_unset() {
    let mut row = StudentRow::new("Alice");
    row.toggle_present(true);
    row.toggle_present(false);

    assert_eq!(row.state(), RowState::Unset);
    assert!(!row.present && !row.absent);
}

#[test]
fn test_collect_returns_one_record_per_student_row_in_order() {
    let students = vec![
        student(3, "Abel", "Zoe"),
        student(1, "Doe", "Alice"),
        student(2, "Roe", "Bob"),
    ];
    let mut sheet = AttendanceSheet::for_students(&students);
    assert!(matches!(sheet.rows[0], SheetRow::Header(_)));

    let batch = sheet.collect();
    assert_eq!(batch.len(), 3);
    let names: Vec<&str> = batch.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Zoe Abel", "Alice Doe", "Bob Roe"]);

    // a second header in the middle is skipped too
    sheet.rows.insert(2, SheetRow::Header(vec!["Late arrivals".into()]));
    assert_eq!(sheet.collect().len(), 3);
}

#[test]
fn test_row_without_selector_collects_empty_reason() {
    let mut sheet = AttendanceSheet::new();
    let mut row = StudentRow::new("Alice");
    row.toggle_absent(true);
    sheet.push(row);

    let batch = sheet.collect();
    assert_eq!(batch[0].reason, "");
    assert!(batch[0].absent);
}

#[test]
fn test_alice_and_bob_scenario() {
    let mut sheet = alice_and_bob();

    // Bob is the second row and has no stored id
    sheet.apply(&Mark::parse("2:absent").unwrap()).unwrap();

    let bob = sheet.students().nth(1).unwrap();
    assert!(!bob.present);
    assert!(bob.reason_visible());

    let batch = sheet.collect();
    assert_eq!(
        batch,
        vec![
            AttendanceRecord {
                name: "Alice".into(),
                present: false,
                absent: false,
                reason: "".into(),
                arrival: "08:00".into(),
                departure: "15:00".into(),
            },
            AttendanceRecord {
                name: "Bob".into(),
                present: false,
                absent: true,
                reason: "Sick".into(),
                arrival: "08:05".into(),
                departure: "".into(),
            },
        ]
    );

    let json = serde_json::to_value(&batch).unwrap();
    assert_eq!(json[1]["abwesend"], true);
    assert_eq!(json[1]["grund"], "Sick");
    assert_eq!(json[0]["ankunft"], "08:00");
    assert_eq!(json[0]["verlassen"], "15:00");
}

#[test]
fn test_collect_is_idempotent() {
    let sheet = alice_and_bob();
    assert_eq!(sheet.collect(), sheet.collect());
}

#[test]
fn test_marks_resolve_student_ids_before_positions() {
    let students = vec![student(7, "Doe", "Alice"), student(9, "Roe", "Bob")];
    let mut sheet = AttendanceSheet::for_students(&students);

    sheet.apply(&Mark::parse("9:absent").unwrap()).unwrap();
    sheet.apply(&Mark::parse("9:reason=Excused").unwrap()).unwrap();

    let batch = sheet.collect();
    assert!(batch[1].absent);
    assert_eq!(batch[1].reason, "Excused");

    // position 1 belongs to a stored student, so it is not a valid key
    let err = sheet.apply(&Mark::parse("1:present").unwrap()).unwrap_err();
    assert!(matches!(err, AppError::InvalidMark(_)));
}

#[test]
fn test_mark_parse() {
    assert_eq!(
        Mark::parse("3:-present").unwrap(),
        Mark {
            row: 3,
            action: MarkAction::Present(false)
        }
    );
    assert_eq!(
        Mark::parse("2:in=08:15").unwrap().action,
        MarkAction::Arrival("08:15".into())
    );
    assert_eq!(
        Mark::parse("2:out=14:00").unwrap().action,
        MarkAction::Departure("14:00".into())
    );
    assert!(Mark::parse("present").is_err());
    assert!(Mark::parse("x:present").is_err());
    assert!(Mark::parse("1:maybe").is_err());
}

#[test]
fn test_from_cells_rejects_malformed_rows() {
    let too_short = StudentRow::from_cells(4, &cells(&["Alice", "x", ""]));
    assert!(matches!(too_short, Err(AppError::MalformedRow { row: 4, .. })));

    let no_name = StudentRow::from_cells(1, &cells(&["", "x", "", "", "", ""]));
    assert!(matches!(no_name, Err(AppError::MalformedRow { row: 1, .. })));

    let bad_box = StudentRow::from_cells(2, &cells(&["Bob", "maybe", "", "", "", ""]));
    assert!(matches!(bad_box, Err(AppError::MalformedRow { row: 2, .. })));

    let both = StudentRow::from_cells(3, &cells(&["Bob", "x", "x", "", "", ""]));
    assert!(matches!(both, Err(AppError::MalformedRow { row: 3, .. })));
}

#[test]
fn test_from_cells_builds_row() {
    let row = StudentRow::from_cells(1, &cells(&["Bob", "", "yes", "Sick", "", ""])).unwrap();
    assert_eq!(row.state(), RowState::Absent);
    assert!(row.reason_visible());
    assert_eq!(row.record().reason, "Sick");

    let no_selector = StudentRow::from_cells(1, &cells(&["Alice", "1", "0", "", "08:00", ""])).unwrap();
    assert!(no_selector.reason.is_none());
    assert_eq!(no_selector.arrival, "08:00");
}

#[test]
fn test_sheet_from_csv() {
    let data = "Name,Present,Absent,Reason,Arrival,Departure\n\
                Alice,,,,08:00,15:00\n\
                Bob,x,,,08:05,\n";
    let mut sheet = AttendanceSheet::from_csv_reader(data.as_bytes()).unwrap();
    assert_eq!(sheet.student_count(), 2);
    assert_eq!(sheet.student_ids(), vec![None, None]);

    sheet.apply(&Mark::parse("2:absent").unwrap()).unwrap();
    sheet.apply(&Mark::parse("2:reason=Sick").unwrap()).unwrap();

    let batch = sheet.collect();
    assert_eq!(batch[1].name, "Bob");
    assert!(batch[1].absent && !batch[1].present);
    assert_eq!(batch[1].reason, "Sick");
}

#[test]
fn test_sheet_from_csv_fails_on_any_bad_row() {
    let data = "Name,Present,Absent,Reason,Arrival,Departure\n\
                Alice,,,,08:00,15:00\n\
                Bob,x\n";
    let err = AttendanceSheet::from_csv_reader(data.as_bytes()).unwrap_err();
    assert!(matches!(err, AppError::MalformedRow { row: 2, .. }));

    let empty = AttendanceSheet::from_csv_reader("".as_bytes()).unwrap_err();
    assert!(matches!(empty, AppError::MalformedRow { row: 0, .. }));
}
