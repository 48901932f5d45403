use crate::errors::{AppError, AppResult};
use crate::models::geo::GeoPoint;
use crate::models::time_entry::TimeEntry;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<TimeEntry> {
    let clock_in_str: String = row.get("clock_in")?;
    let clock_in = parse_ts(&clock_in_str)?;

    let clock_out = match row.get::<_, Option<String>>("clock_out")? {
        Some(s) => Some(parse_ts(&s)?),
        None => None,
    };

    let location_in: Option<String> = row.get("location_in")?;
    let location_out: Option<String> = row.get("location_out")?;

    Ok(TimeEntry {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        clock_in,
        clock_out,
        duration: row.get("duration")?,
        location_in: location_in.as_deref().and_then(GeoPoint::from_json),
        location_out: location_out.as_deref().and_then(GeoPoint::from_json),
        created_at: row.get("created_at")?,
    })
}

fn parse_ts(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s.to_string())),
            )
        })
}

/// The at-most-one open entry for an employee, if any.
pub fn active_entry(conn: &Connection, employee_id: i64) -> AppResult<Option<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE employee_id = ?1 AND clock_out IS NULL",
    )?;
    Ok(stmt.query_row([employee_id], map_row).optional()?)
}

/// Insert a new open entry. Fails with a constraint violation when an open
/// entry already exists for the employee (partial unique index).
pub fn insert_open_entry(
    conn: &Connection,
    employee_id: i64,
    clock_in: DateTime<Utc>,
    location_in: Option<GeoPoint>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO time_entries (employee_id, clock_in, location_in, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            employee_id,
            clock_in.to_rfc3339(),
            location_in.map(|l| l.to_json()),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Close an entry. The WHERE clause re-checks clock_out IS NULL so a closed
/// entry can never be overwritten, even by a racing second clock-out.
pub fn close_entry(
    conn: &Connection,
    entry_id: i64,
    clock_out: DateTime<Utc>,
    duration_secs: i64,
    location_out: Option<GeoPoint>,
) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE time_entries
            SET clock_out = ?1, duration = ?2, location_out = ?3
          WHERE id = ?4 AND clock_out IS NULL",
        params![
            clock_out.to_rfc3339(),
            duration_secs,
            location_out.map(|l| l.to_json()),
            entry_id,
        ],
    )?)
}

pub fn load_entry(conn: &Connection, entry_id: i64) -> AppResult<TimeEntry> {
    let mut stmt = conn.prepare("SELECT * FROM time_entries WHERE id = ?1")?;
    stmt.query_row([entry_id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("time entry id {}", entry_id)))
}

/// All entries for one employee, newest first.
pub fn entries_for_employee(conn: &Connection, employee_id: i64) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE employee_id = ?1
         ORDER BY clock_in DESC",
    )?;
    let rows = stmt.query_map([employee_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries for one employee whose clock_in falls in [from, to].
pub fn entries_in_range(
    conn: &Connection,
    employee_id: i64,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE employee_id = ?1 AND clock_in >= ?2 AND clock_in <= ?3
         ORDER BY clock_in ASC",
    )?;
    let rows = stmt.query_map(
        params![employee_id, from.to_rfc3339(), to.to_rfc3339()],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every employee's entries clocked in at or after the given instant.
pub fn entries_since(conn: &Connection, since: DateTime<Utc>) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE clock_in >= ?1
         ORDER BY clock_in ASC",
    )?;
    let rows = stmt.query_map([since.to_rfc3339()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
