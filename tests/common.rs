#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rat() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    rat()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB with group 1 "5A" holding Alice Doe (id 1) and Bob Roe (id 2)
pub fn init_db_with_class(db_path: &str) {
    init_db(db_path);

    rat()
        .args(["--db", db_path, "group", "--add", "5A"])
        .assert()
        .success();

    for (last, first) in [("Doe", "Alice"), ("Roe", "Bob")] {
        rat()
            .args([
                "--db", db_path, "student", "--add", last, "--first", first, "--group", "1",
            ])
            .assert()
            .success();
    }
}

/// Take the register of 2025-09-01: Alice present 10 minutes late, Bob sick
pub fn take_first_day(db_path: &str) {
    rat()
        .args([
            "--db",
            db_path,
            "take",
            "1",
            "--date",
            "2025-09-01",
            "--mark",
            "1:present",
            "--mark",
            "1:in=08:10",
            "--mark",
            "2:absent",
            "--mark",
            "2:reason=Sick",
        ])
        .assert()
        .success();
}
