use predicates::str::contains;

mod common;
use common::{
    ADMIN_CODE, add_admin, init_db, init_with_admin, pc, setup_session_file, setup_test_db,
    temp_out,
};

#[test]
fn test_audit_trail_records_admin_actions() {
    let db = setup_test_db("audit_trail");
    let session = setup_session_file("audit_trail");
    init_with_admin(&db, &session);

    pc()
        .args(["--db", &db, "--session-file", &session, "audit"])
        .assert()
        .success()
        .stdout(contains("login"))
        .stdout(contains("create_employee"));
}

#[test]
fn test_audit_attempts_view_shows_counters() {
    let db = setup_test_db("audit_attempts");
    let session = setup_session_file("audit_attempts");
    init_db(&db);
    add_admin(&db, &session);

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "login",
            "wrong",
            "--ip",
            "kiosk-9",
        ])
        .assert()
        .success();

    pc()
        .args(["--db", &db, "--session-file", &session, "login", ADMIN_CODE])
        .assert()
        .success();

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "audit",
            "--attempts",
        ])
        .assert()
        .success()
        .stdout(contains("kiosk-9"));
}

#[test]
fn test_admin_code_add_and_count() {
    let db = setup_test_db("code_mgmt");
    let session = setup_session_file("code_mgmt");
    init_with_admin(&db, &session);

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "code",
            "add",
            "backup-code-7",
        ])
        .assert()
        .success()
        .stdout(contains("registered"));

    pc()
        .args(["--db", &db, "--session-file", &session, "code", "count"])
        .assert()
        .success()
        .stdout(contains("2 admin code(s)"));

    // Duplicate codes are refused
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "code",
            "add",
            "backup-code-7",
        ])
        .assert()
        .failure()
        .stderr(contains("already registered"));
}

#[test]
fn test_second_login_works_with_new_code() {
    let db = setup_test_db("second_code");
    let session = setup_session_file("second_code");
    init_with_admin(&db, &session);

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "code",
            "add",
            "backup-code-7",
        ])
        .assert()
        .success();

    pc()
        .args(["--db", &db, "--session-file", &session, "logout"])
        .assert()
        .success();

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "login",
            "backup-code-7",
        ])
        .assert()
        .success()
        .stdout(contains("Authentication successful"));
}

#[test]
fn test_db_maintenance_commands() {
    let db = setup_test_db("db_maint");
    let session = setup_session_file("db_maint");
    init_with_admin(&db, &session);

    pc()
        .args(["--db", &db, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));

    pc()
        .args(["--db", &db, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("time_entries"));

    pc()
        .args(["--db", &db, "db", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Vacuum completed"));

    // Re-running migrations is a no-op, never an error
    pc()
        .args(["--db", &db, "db", "--migrate"])
        .assert()
        .success();
}

#[test]
fn test_backup_copies_database() {
    let db = setup_test_db("backup_copy");
    let session = setup_session_file("backup_copy");
    init_with_admin(&db, &session);

    let out = temp_out("backup_copy", "sqlite");

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "backup",
            "--file",
            &out,
        ])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(std::path::Path::new(&out).exists());
}

#[test]
fn test_backup_compress_produces_zip() {
    let db = setup_test_db("backup_zip");
    let session = setup_session_file("backup_zip");
    init_with_admin(&db, &session);

    let out = temp_out("backup_zip", "sqlite");
    let zipped = std::path::Path::new(&out).with_extension("zip");
    std::fs::remove_file(&zipped).ok();

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "backup",
            "--file",
            &out,
            "--compress",
        ])
        .assert()
        .success();

    assert!(zipped.exists());
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_watch_reports_new_punches() {
    let db = setup_test_db("watch_feed");
    let session = setup_session_file("watch_feed");
    init_with_admin(&db, &session);

    // Punch first, then attach: nothing new is reported
    pc()
        .args(["--db", &db, "clock", "in", "1111"])
        .assert()
        .success();

    pc()
        .args([
            "--db", &db, "watch", "--interval", "0", "--polls", "1",
        ])
        .assert()
        .success()
        .stdout(contains("Watching"));
}
