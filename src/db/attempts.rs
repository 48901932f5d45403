use crate::errors::{AppError, AppResult};
use crate::models::login_attempt::LoginAttempt;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<LoginAttempt> {
    let locked_until = match row.get::<_, Option<String>>("locked_until")? {
        Some(s) => Some(parse_ts(&s)?),
        None => None,
    };
    let last_str: String = row.get("last_attempt")?;

    Ok(LoginAttempt {
        id: row.get("id")?,
        ip_address: row.get("ip_address")?,
        attempt_count: row.get("attempt_count")?,
        is_locked: row.get::<_, i64>("is_locked")? == 1,
        locked_until,
        last_attempt: parse_ts(&last_str)?,
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

pub fn attempt_for_ip(conn: &Connection, ip: &str) -> AppResult<Option<LoginAttempt>> {
    let mut stmt = conn.prepare("SELECT * FROM login_attempts WHERE ip_address = ?1")?;
    Ok(stmt.query_row([ip], map_row).optional()?)
}

/// Record one failed attempt for an IP: upsert the counter row and lock it
/// once the threshold is reached. Returns the row after the increment.
pub fn record_failure(
    conn: &Connection,
    ip: &str,
    now: DateTime<Utc>,
    max_attempts: i64,
    lockout_secs: i64,
) -> AppResult<LoginAttempt> {
    conn.execute(
        "INSERT INTO login_attempts (ip_address, attempt_count, is_locked, last_attempt)
         VALUES (?1, 1, 0, ?2)
         ON CONFLICT(ip_address) DO UPDATE SET
             attempt_count = attempt_count + 1,
             last_attempt  = excluded.last_attempt",
        params![ip, now.to_rfc3339()],
    )?;

    conn.execute(
        "UPDATE login_attempts
            SET is_locked = 1,
                locked_until = ?1
          WHERE ip_address = ?2 AND attempt_count >= ?3 AND is_locked = 0",
        params![
            (now + chrono::Duration::seconds(lockout_secs)).to_rfc3339(),
            ip,
            max_attempts,
        ],
    )?;

    attempt_for_ip(conn, ip)?
        .ok_or_else(|| AppError::Other(format!("login attempt row vanished for {}", ip)))
}

/// A successful login clears the counter row entirely.
pub fn reset_attempts(conn: &Connection, ip: &str) -> AppResult<()> {
    conn.execute("DELETE FROM login_attempts WHERE ip_address = ?1", [ip])?;
    Ok(())
}

/// An elapsed lock is cleared lazily on the next attempt; the counter
/// restarts from zero.
pub fn clear_expired_lock(conn: &Connection, ip: &str, now: DateTime<Utc>) -> AppResult<()> {
    conn.execute(
        "UPDATE login_attempts
            SET is_locked = 0, locked_until = NULL, attempt_count = 0
          WHERE ip_address = ?1 AND is_locked = 1 AND locked_until <= ?2",
        params![ip, now.to_rfc3339()],
    )?;
    Ok(())
}

/// Recent attempt counters, most recent first (security review listing).
pub fn recent_attempts(conn: &Connection, limit: i64) -> AppResult<Vec<LoginAttempt>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM login_attempts
         ORDER BY last_attempt DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
