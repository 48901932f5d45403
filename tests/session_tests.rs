use chrono::Utc;
use predicates::str::contains;
use std::path::PathBuf;

use punchclock::config::Config;
use punchclock::core::session::SessionGuard;
use punchclock::db::attempts;
use punchclock::db::pool::DbPool;
use punchclock::store::FileSessionStore;

mod common;
use common::{ADMIN_CODE, add_admin, init_db, login, pc, setup_session_file, setup_test_db};

/// Library-side fixture: config pointed at a test db and session file.
fn test_config(db: &str, session: &str) -> Config {
    Config {
        database: db.to_string(),
        session_file: session.to_string(),
        ..Config::default()
    }
}

#[test]
fn test_login_logout_cycle() {
    let db = setup_test_db("login_cycle");
    let session = setup_session_file("login_cycle");
    init_db(&db);
    add_admin(&db, &session);

    pc()
        .args(["--db", &db, "--session-file", &session, "login", ADMIN_CODE])
        .assert()
        .success()
        .stdout(contains("Authentication successful"));

    pc()
        .args(["--db", &db, "--session-file", &session, "session"])
        .assert()
        .success()
        .stdout(contains("Alice Admin"));

    pc()
        .args(["--db", &db, "--session-file", &session, "logout"])
        .assert()
        .success()
        .stdout(contains("Logged out"));

    pc()
        .args(["--db", &db, "--session-file", &session, "session"])
        .assert()
        .success()
        .stdout(contains("No active session"));
}

#[test]
fn test_login_wrong_code() {
    let db = setup_test_db("login_wrong");
    let session = setup_session_file("login_wrong");
    init_db(&db);
    add_admin(&db, &session);

    pc()
        .args(["--db", &db, "--session-file", &session, "login", "nope"])
        .assert()
        .success()
        .stderr(contains("Invalid admin code"));

    // No session was minted
    pc()
        .args(["--db", &db, "--session-file", &session, "session"])
        .assert()
        .success()
        .stdout(contains("No active session"));
}

#[test]
fn test_login_without_admin_employee() {
    let db = setup_test_db("login_no_admin");
    let session = setup_session_file("login_no_admin");
    init_db(&db);

    // The code is right but nobody holds the admin role yet
    pc()
        .args(["--db", &db, "--session-file", &session, "login", ADMIN_CODE])
        .assert()
        .success()
        .stderr(contains("No admin user found"));
}

#[test]
fn test_lockout_after_repeated_failures() {
    let db = setup_test_db("lockout");
    let session = setup_session_file("lockout");
    init_db(&db);
    add_admin(&db, &session);

    // Five misses: each one, the threshold included, reports a bad code
    for _ in 0..5 {
        pc()
            .args([
                "--db",
                &db,
                "--session-file",
                &session,
                "login",
                "wrong",
                "--ip",
                "kiosk-1",
            ])
            .assert()
            .success()
            .stderr(contains("Invalid admin code"));
    }

    // The sixth attempt hits the lock, even with the right code
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "login",
            ADMIN_CODE,
            "--ip",
            "kiosk-1",
        ])
        .assert()
        .success()
        .stderr(contains("Too many failed attempts"));
}

#[test]
fn test_session_lifetime_matches_configured_hours() {
    let db = setup_test_db("session_lifetime");
    let session = setup_session_file("session_lifetime");
    init_db(&db);
    add_admin(&db, &session);

    let cfg = test_config(&db, &session);
    let store = FileSessionStore::new(PathBuf::from(&session));
    let guard = SessionGuard::new(&store, &cfg);
    let mut pool = DbPool::new(&db).expect("open db");

    let before = Utc::now().timestamp();
    let outcome = guard
        .verify_code(&mut pool, ADMIN_CODE, "kiosk-1")
        .expect("verify code");
    assert!(outcome.success);
    let after = Utc::now().timestamp();

    let minted = guard
        .current_session()
        .expect("read session")
        .expect("a session was minted");
    assert_eq!(
        minted.expires_at - minted.created_at,
        cfg.session_hours * 3600
    );
    // Issued at login time, not at some earlier clock read
    assert!(minted.created_at >= before && minted.created_at <= after);
}

#[test]
fn test_lock_window_starts_at_threshold_failure() {
    let db = setup_test_db("lock_window");
    let session = setup_session_file("lock_window");
    init_db(&db);
    add_admin(&db, &session);

    let cfg = test_config(&db, &session);
    let store = FileSessionStore::new(PathBuf::from(&session));
    let guard = SessionGuard::new(&store, &cfg);
    let mut pool = DbPool::new(&db).expect("open db");

    for _ in 0..cfg.max_failed_attempts {
        let outcome = guard
            .verify_code(&mut pool, "wrong", "kiosk-9")
            .expect("verify code");
        assert!(!outcome.success);
        assert!(outcome.message.contains("Invalid admin code"));
    }

    let attempt = attempts::attempt_for_ip(&pool.conn, "kiosk-9")
        .expect("query attempts")
        .expect("counter row exists");
    assert_eq!(attempt.attempt_count, cfg.max_failed_attempts);
    assert!(attempt.is_locked);

    // The window opens at the threshold failure and runs for the
    // configured lockout, no longer
    let locked_until = attempt.locked_until.expect("lock window set");
    assert_eq!(
        (locked_until - attempt.last_attempt).num_seconds(),
        cfg.lockout_minutes * 60
    );
    assert!((locked_until - Utc::now()).num_seconds() <= cfg.lockout_minutes * 60);
}

#[test]
fn test_lockout_is_per_origin() {
    let db = setup_test_db("lockout_origin");
    let session = setup_session_file("lockout_origin");
    init_db(&db);
    add_admin(&db, &session);

    for _ in 0..5 {
        pc()
            .args([
                "--db",
                &db,
                "--session-file",
                &session,
                "login",
                "wrong",
                "--ip",
                "kiosk-1",
            ])
            .assert()
            .success();
    }

    // Another terminal is unaffected by kiosk-1's lock
    pc()
        .args([
            "--db",
            &db,
            "--session-file",
            &session,
            "login",
            ADMIN_CODE,
            "--ip",
            "kiosk-2",
        ])
        .assert()
        .success()
        .stdout(contains("Authentication successful"));
}

#[test]
fn test_successful_login_resets_failure_count() {
    let db = setup_test_db("reset_failures");
    let session = setup_session_file("reset_failures");
    init_db(&db);
    add_admin(&db, &session);

    // Four misses, then a hit: the counter starts over
    for _ in 0..4 {
        pc()
            .args(["--db", &db, "--session-file", &session, "login", "wrong"])
            .assert()
            .success()
            .stderr(contains("Invalid admin code"));
    }
    login(&db, &session);

    // Four more misses still do not lock
    for _ in 0..4 {
        pc()
            .args(["--db", &db, "--session-file", &session, "login", "wrong"])
            .assert()
            .success()
            .stderr(contains("Invalid admin code"));
    }
}

#[test]
fn test_protected_command_requires_session() {
    let db = setup_test_db("needs_session");
    let session = setup_session_file("needs_session");
    init_db(&db);
    add_admin(&db, &session);

    // No login yet: admin surfaces are closed
    pc()
        .args(["--db", &db, "--session-file", &session, "employee", "list"])
        .assert()
        .failure()
        .stderr(contains("No active admin session"));

    pc()
        .args(["--db", &db, "--session-file", &session, "audit"])
        .assert()
        .failure()
        .stderr(contains("No active admin session"));
}

#[test]
fn test_expired_session_is_cleared_on_read() {
    let db = setup_test_db("expired_session");
    let session = setup_session_file("expired_session");
    init_db(&db);
    add_admin(&db, &session);

    // Plant an already-expired session token
    let stale = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "user_id": 1,
        "user_name": "Alice Admin",
        "role": "admin",
        "created_at": 1_600_000_000,
        "expires_at": 1_600_000_001,
    });
    std::fs::write(&session, stale.to_string()).expect("write session file");

    pc()
        .args(["--db", &db, "--session-file", &session, "session"])
        .assert()
        .success()
        .stdout(contains("No active session"));

    // Lazy expiry removed the file on that read
    assert!(!std::path::Path::new(&session).exists());

    pc()
        .args(["--db", &db, "--session-file", &session, "employee", "list"])
        .assert()
        .failure()
        .stderr(contains("No active admin session"));
}

#[test]
fn test_garbled_session_file_is_ignored() {
    let db = setup_test_db("garbled_session");
    let session = setup_session_file("garbled_session");
    init_db(&db);
    add_admin(&db, &session);

    std::fs::write(&session, "not json at all").expect("write session file");

    pc()
        .args(["--db", &db, "--session-file", &session, "session"])
        .assert()
        .success()
        .stdout(contains("No active session"));
}
