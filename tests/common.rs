#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Shared admin code used by most tests.
pub const ADMIN_CODE: &str = "letmein99";

pub fn pc() -> Command {
    cargo_bin_cmd!("punchclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a unique session file path inside the system temp dir
pub fn setup_session_file(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchclock_session.json", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize schema and seed the shared admin code
pub fn init_db(db_path: &str) {
    pc()
        .args(["--db", db_path, "--test", "init", "--admin-code", ADMIN_CODE])
        .assert()
        .success();
}

/// Bootstrap the admin identity: the first employee on an empty roster
/// needs no session but must be an admin.
pub fn add_admin(db_path: &str, session_file: &str) {
    pc()
        .args([
            "--db",
            db_path,
            "--session-file",
            session_file,
            "employee",
            "add",
            "--name",
            "Alice Admin",
            "--position",
            "Manager",
            "--pin",
            "1111",
            "--role",
            "admin",
            "--rate",
            "20",
        ])
        .assert()
        .success();
}

/// Open an admin session with the shared code
pub fn login(db_path: &str, session_file: &str) {
    pc()
        .args([
            "--db",
            db_path,
            "--session-file",
            session_file,
            "login",
            ADMIN_CODE,
        ])
        .assert()
        .success();
}

/// Add a regular employee (requires a live session)
pub fn add_employee(db_path: &str, session_file: &str, name: &str, pin: &str) {
    pc()
        .args([
            "--db",
            db_path,
            "--session-file",
            session_file,
            "employee",
            "add",
            "--name",
            name,
            "--pin",
            pin,
        ])
        .assert()
        .success();
}

/// Full setup used by most tests: schema + admin code + admin employee
/// (pin 1111) + open session.
pub fn init_with_admin(db_path: &str, session_file: &str) {
    init_db(db_path);
    add_admin(db_path, session_file);
    login(db_path, session_file);
}

/// Insert a completed shift directly through the library, with an exact
/// duration in seconds ending now. Useful for payroll assertions.
pub fn insert_completed_shift(db_path: &str, employee_id: i64, secs: i64) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let end = chrono::Utc::now();
    let start = end - chrono::Duration::seconds(secs);

    let id = punchclock::db::entries::insert_open_entry(&conn, employee_id, start, None)
        .expect("insert entry");
    let changed = punchclock::db::entries::close_entry(&conn, id, end, secs, None)
        .expect("close entry");
    assert_eq!(changed, 1);
    id
}
