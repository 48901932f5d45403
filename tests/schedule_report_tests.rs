use predicates::str::contains;

mod common;
use common::{
    add_employee, init_with_admin, insert_completed_shift, pc, setup_session_file, setup_test_db,
};

#[test]
fn test_schedule_add_list_delete() {
    let db = setup_test_db("sched_cycle");
    let session = setup_session_file("sched_cycle");
    init_with_admin(&db, &session);

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "schedule",
            "add",
            "--employee",
            "1",
            "--day",
            "1",
            "--start",
            "09:00",
            "--end",
            "17:00",
        ])
        .assert()
        .success()
        .stdout(contains("Mon"));

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "schedule",
            "list",
        ])
        .assert()
        .success()
        .stdout(contains("Alice Admin"))
        .stdout(contains("09:00"))
        .stdout(contains("17:00"));

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "schedule",
            "update",
            "1",
            "--day",
            "3",
            "--end",
            "18:00",
        ])
        .assert()
        .success()
        .stdout(contains("Wed"))
        .stdout(contains("18:00"));

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "schedule",
            "del",
            "1",
        ])
        .assert()
        .success()
        .stdout(contains("deleted"));

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "schedule",
            "list",
        ])
        .assert()
        .success()
        .stdout(contains("No schedules found"));
}

#[test]
fn test_schedule_rejects_invalid_slots() {
    let db = setup_test_db("sched_invalid");
    let session = setup_session_file("sched_invalid");
    init_with_admin(&db, &session);

    // Day out of range
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "schedule",
            "add",
            "--employee",
            "1",
            "--day",
            "7",
            "--start",
            "09:00",
            "--end",
            "17:00",
        ])
        .assert()
        .failure();

    // End not after start
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "schedule",
            "add",
            "--employee",
            "1",
            "--day",
            "2",
            "--start",
            "17:00",
            "--end",
            "09:00",
        ])
        .assert()
        .failure()
        .stderr(contains("after start"));

    // Unknown employee
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "schedule",
            "add",
            "--employee",
            "42",
            "--day",
            "2",
            "--start",
            "09:00",
            "--end",
            "17:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_payroll_report_prices_completed_time() {
    let db = setup_test_db("payroll_report");
    let session = setup_session_file("payroll_report");
    init_with_admin(&db, &session);

    // Two hours at the admin's $20/h rate
    insert_completed_shift(&db, 1, 2 * 3600);

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "report",
            "payroll",
            "--employee",
            "1",
        ])
        .assert()
        .success()
        .stdout(contains("2.00"))
        .stdout(contains("$40.00"));
}

#[test]
fn test_payroll_falls_back_to_default_rate() {
    let db = setup_test_db("payroll_default_rate");
    let session = setup_session_file("payroll_default_rate");
    init_with_admin(&db, &session);

    // No --rate: the configured default ($15/h) applies
    add_employee(&db, &session, "Bob Baker", "2222");
    insert_completed_shift(&db, 2, 3600);

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "report",
            "payroll",
            "--employee",
            "2",
        ])
        .assert()
        .success()
        .stdout(contains("$15.00"));
}

#[test]
fn test_staff_report_counts_open_shift() {
    let db = setup_test_db("staff_report");
    let session = setup_session_file("staff_report");
    init_with_admin(&db, &session);

    insert_completed_shift(&db, 1, 3600);

    pc()
        .args(["--db", &db, "clock", "in", "1111"])
        .assert()
        .success();

    pc()
        .args(["--db", &db, "--session-file", &session, "report", "staff"])
        .assert()
        .success()
        .stdout(contains("Alice Admin"))
        .stdout(contains("01h 00m"))
        .stdout(contains("yes"));
}

#[test]
fn test_daily_and_weekly_reports_run() {
    let db = setup_test_db("daily_weekly");
    let session = setup_session_file("daily_weekly");
    init_with_admin(&db, &session);

    insert_completed_shift(&db, 1, 1800);

    pc()
        .args(["--db", &db, "--session-file", &session, "report", "daily"])
        .assert()
        .success()
        .stdout(contains("On shift now"));

    pc()
        .args(["--db", &db, "--session-file", &session, "report", "weekly"])
        .assert()
        .success()
        .stdout(contains("This week"));
}
