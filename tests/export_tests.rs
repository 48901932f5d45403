use predicates::str::contains;

mod common;
use common::{
    init_with_admin, insert_completed_shift, pc, setup_session_file, setup_test_db, temp_out,
};

#[test]
fn test_export_entries_csv() {
    let db = setup_test_db("export_csv");
    let session = setup_session_file("export_csv");
    init_with_admin(&db, &session);
    insert_completed_shift(&db, 1, 3600);

    let out = temp_out("export_csv", "csv");

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "export",
            "--format",
            "csv",
            "--file",
            &out,
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = std::fs::read_to_string(&out).expect("read export");
    assert!(content.contains("Alice Admin"));
}

#[test]
fn test_export_entries_json() {
    let db = setup_test_db("export_json");
    let session = setup_session_file("export_json");
    init_with_admin(&db, &session);
    insert_completed_shift(&db, 1, 1800);

    let out = temp_out("export_json", "json");

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "export",
            "--format",
            "json",
            "--file",
            &out,
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = std::fs::read_to_string(&out).expect("read export");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert!(parsed.as_array().map(|a| !a.is_empty()).unwrap_or(false));
}

#[test]
fn test_export_payroll_csv() {
    let db = setup_test_db("export_payroll");
    let session = setup_session_file("export_payroll");
    init_with_admin(&db, &session);
    insert_completed_shift(&db, 1, 2 * 3600);

    let out = temp_out("export_payroll", "csv");

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "export",
            "--kind",
            "payroll",
            "--format",
            "csv",
            "--file",
            &out,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("read export");
    assert!(content.contains("Alice Admin"));
}

#[test]
fn test_export_xlsx_writes_file() {
    let db = setup_test_db("export_xlsx");
    let session = setup_session_file("export_xlsx");
    init_with_admin(&db, &session);
    insert_completed_shift(&db, 1, 3600);

    let out = temp_out("export_xlsx", "xlsx");

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "export",
            "--format",
            "xlsx",
            "--file",
            &out,
        ])
        .assert()
        .success();

    assert!(std::path::Path::new(&out).exists());
}

#[test]
fn test_export_requires_absolute_path() {
    let db = setup_test_db("export_relpath");
    let session = setup_session_file("export_relpath");
    init_with_admin(&db, &session);

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "export",
            "--file",
            "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("absolute"));
}

#[test]
fn test_export_requires_session() {
    let db = setup_test_db("export_no_session");
    let session = setup_session_file("export_no_session");
    init_with_admin(&db, &session);

    pc()
        .args(["--db", &db, "--session-file", &session, "logout"])
        .assert()
        .success();

    let out = temp_out("export_no_session", "csv");
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "export",
            "--file",
            &out,
        ])
        .assert()
        .failure()
        .stderr(contains("No active admin session"));
}

#[test]
fn test_export_range_filters_entries() {
    let db = setup_test_db("export_range");
    let session = setup_session_file("export_range");
    init_with_admin(&db, &session);
    insert_completed_shift(&db, 1, 3600);

    let out = temp_out("export_range", "csv");

    // A range far in the past matches nothing
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "export",
            "--file",
            &out,
            "--range",
            "2001",
        ])
        .assert()
        .success()
        .stdout(contains("No time entries matched"));
}
