use predicates::str::contains;

mod common;
use common::{add_employee, init_db, init_with_admin, pc, setup_session_file, setup_test_db};

#[test]
fn test_first_employee_must_be_admin() {
    let db = setup_test_db("first_emp_admin");
    let session = setup_session_file("first_emp_admin");
    init_db(&db);

    // Empty roster: a non-admin first employee is refused
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "employee",
            "add",
            "--name",
            "Bob",
            "--pin",
            "2222",
        ])
        .assert()
        .failure()
        .stderr(contains("first employee must have role admin"));
}

#[test]
fn test_add_and_list_employees() {
    let db = setup_test_db("emp_add_list");
    let session = setup_session_file("emp_add_list");
    init_with_admin(&db, &session);

    add_employee(&db, &session, "Bob Baker", "2222");
    add_employee(&db, &session, "Carla Cook", "3333");

    pc()
        .args(["--db", &db, "--session-file", &session, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Alice Admin"))
        .stdout(contains("Bob Baker"))
        .stdout(contains("Carla Cook"));
}

#[test]
fn test_duplicate_pin_is_rejected() {
    let db = setup_test_db("emp_dup_pin");
    let session = setup_session_file("emp_dup_pin");
    init_with_admin(&db, &session);

    // 1111 already belongs to the admin
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "employee",
            "add",
            "--name",
            "Bob",
            "--pin",
            "1111",
        ])
        .assert()
        .failure()
        .stderr(contains("already assigned"));
}

#[test]
fn test_pin_format_is_validated() {
    let db = setup_test_db("emp_bad_pin");
    let session = setup_session_file("emp_bad_pin");
    init_with_admin(&db, &session);

    for bad in ["12", "123456789", "12ab"] {
        pc()
            .args([
                "--db",
                &db,
                "--session-file",
                &session,
                "employee",
                "add",
                "--name",
                "Bob",
                "--pin",
                bad,
            ])
            .assert()
            .failure();
    }
}

#[test]
fn test_update_employee_fields() {
    let db = setup_test_db("emp_update");
    let session = setup_session_file("emp_update");
    init_with_admin(&db, &session);

    add_employee(&db, &session, "Bob Baker", "2222");

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "employee",
            "update",
            "2",
            "--position",
            "Barista",
            "--rate",
            "18.5",
        ])
        .assert()
        .success()
        .stdout(contains("updated"));

    pc()
        .args(["--db", &db, "--session-file", &session, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Barista"))
        .stdout(contains("$18.50"));
}

#[test]
fn test_update_unknown_employee() {
    let db = setup_test_db("emp_update_missing");
    let session = setup_session_file("emp_update_missing");
    init_with_admin(&db, &session);

    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "employee",
            "update",
            "42",
            "--name",
            "Ghost",
        ])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}
