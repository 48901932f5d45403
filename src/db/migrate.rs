use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `admin_audit_log` table exists. It doubles as the
/// migration journal, so it must be created before anything else.
fn ensure_audit_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS admin_audit_log (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            action     TEXT NOT NULL,
            user_id    INTEGER,
            details    TEXT NOT NULL DEFAULT '',
            ip_address TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check whether a migration step was already recorded in the journal.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM admin_audit_log
         WHERE action = 'migration_applied' AND details = ?1
         LIMIT 1",
    )?;
    Ok(stmt.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Record a migration step in the journal.
fn mark_applied(conn: &Connection, version: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO admin_audit_log (action, details, created_at)
         VALUES ('migration_applied', ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Base schema: every table the application touches.
///
/// Two schema-level invariants live here rather than in application code:
/// - employees.pin is UNIQUE, so a PIN resolves to at most one employee;
/// - the partial unique index on time_entries allows at most ONE open entry
///   (clock_out IS NULL) per employee, which makes a concurrent double
///   clock-in from two terminals fail at the insert instead of creating a
///   second open shift.
fn create_base_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            position    TEXT NOT NULL DEFAULT '',
            pin         TEXT NOT NULL UNIQUE,
            role        TEXT NOT NULL DEFAULT 'employee' CHECK(role IN ('admin','employee')),
            hourly_rate REAL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT
        );

        CREATE TABLE IF NOT EXISTS time_entries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  INTEGER NOT NULL REFERENCES employees(id),
            clock_in     TEXT NOT NULL,
            clock_out    TEXT,
            duration     INTEGER,
            location_in  TEXT,
            location_out TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_entries_one_open
            ON time_entries(employee_id) WHERE clock_out IS NULL;
        CREATE INDEX IF NOT EXISTS idx_entries_employee_clock_in
            ON time_entries(employee_id, clock_in);
        CREATE INDEX IF NOT EXISTS idx_entries_clock_in
            ON time_entries(clock_in);

        CREATE TABLE IF NOT EXISTS schedules (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            day_of_week INTEGER NOT NULL CHECK(day_of_week BETWEEN 0 AND 6),
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_schedules_employee
            ON schedules(employee_id, day_of_week);

        CREATE TABLE IF NOT EXISTS admin_codes (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            code       TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS login_attempts (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            ip_address    TEXT NOT NULL UNIQUE,
            attempt_count INTEGER NOT NULL DEFAULT 0,
            is_locked     INTEGER NOT NULL DEFAULT 0,
            locked_until  TEXT,
            last_attempt  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Early builds stored time_entries without the partial unique index and
/// tolerated duplicate open rows. Close every open entry except the newest
/// one per employee before the index can be created.
fn migrate_close_duplicate_open_entries(conn: &Connection) -> Result<()> {
    let version = "20250406_0001_close_duplicate_open_entries";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if table_exists(conn, "time_entries")? {
        conn.execute_batch(
            r#"
            UPDATE time_entries
               SET clock_out = clock_in,
                   duration  = 0
             WHERE clock_out IS NULL
               AND id NOT IN (
                   SELECT MAX(id) FROM time_entries
                    WHERE clock_out IS NULL
                    GROUP BY employee_id
               );
            "#,
        )?;
    }

    mark_applied(conn, version)?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Journal first: everything else records into it
    ensure_audit_table(conn)?;

    let fresh = !table_exists(conn, "time_entries")?;

    // 2) Repair data the unique index would reject
    migrate_close_duplicate_open_entries(conn)?;

    // 3) Base schema (idempotent)
    create_base_schema(conn)?;

    if fresh {
        success("Created punchclock schema.");
    }

    Ok(())
}
