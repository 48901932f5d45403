//! Change-notification feed for the `watch` command.
//!
//! Tails the rowid sequence of the watched tables and reports rows that
//! appeared (or, for time_entries, were closed) since the previous poll.
//! This is a display convenience only: nothing in the clock or session
//! logic depends on it.

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::params;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEvent {
    Insert,
    Update,
}

#[derive(Debug, Clone)]
pub struct FeedItem {
    pub table: &'static str,
    pub event: FeedEvent,
    pub row_id: i64,
    pub summary: String,
}

/// Poll-based tail over the activity tables.
pub struct Feed {
    last_entry_id: i64,
    last_audit_id: i64,
    /// Entry ids seen open on the previous poll; a clock_out on one of
    /// them is reported as an update.
    open_entries: Vec<i64>,
}

impl Feed {
    /// Start the feed at the current end of each table so only new
    /// activity is reported.
    pub fn attach(pool: &mut DbPool) -> AppResult<Self> {
        let last_entry_id = max_id(pool, "time_entries")?;
        let last_audit_id = max_id(pool, "admin_audit_log")?;
        let open_entries = open_entry_ids(pool)?;
        Ok(Self {
            last_entry_id,
            last_audit_id,
            open_entries,
        })
    }

    /// One poll step: everything that happened since the last call.
    pub fn poll(&mut self, pool: &mut DbPool) -> AppResult<Vec<FeedItem>> {
        let mut items = Vec::new();

        // New time entries (clock-ins)
        {
            let mut stmt = pool.conn.prepare_cached(
                "SELECT id, employee_id, clock_in FROM time_entries
                 WHERE id > ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([self.last_entry_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;
            for r in rows {
                let (id, employee_id, clock_in) = r?;
                self.last_entry_id = id;
                items.push(FeedItem {
                    table: "time_entries",
                    event: FeedEvent::Insert,
                    row_id: id,
                    summary: format!("employee {} clocked in at {}", employee_id, clock_in),
                });
            }
        }

        // Entries that were open last time and are closed now
        for id in std::mem::take(&mut self.open_entries) {
            let mut stmt = pool.conn.prepare_cached(
                "SELECT employee_id, clock_out, duration FROM time_entries WHERE id = ?1",
            )?;
            let row = stmt.query_row(params![id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                ))
            });
            match row {
                Ok((employee_id, Some(out), duration)) => items.push(FeedItem {
                    table: "time_entries",
                    event: FeedEvent::Update,
                    row_id: id,
                    summary: format!(
                        "employee {} clocked out at {} ({} s)",
                        employee_id,
                        out,
                        duration.unwrap_or(0)
                    ),
                }),
                Ok((_, None, _)) => {}
                Err(_) => {} // row gone; nothing to report
            }
        }
        // Fresh open set for the next poll (includes entries inserted above)
        self.open_entries = open_entry_ids(pool)?;

        // New audit records (logins, schedule changes, ...)
        {
            let mut stmt = pool.conn.prepare_cached(
                "SELECT id, action, details FROM admin_audit_log
                 WHERE id > ?1 AND action != 'migration_applied'
                 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([self.last_audit_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;
            for r in rows {
                let (id, action, details) = r?;
                self.last_audit_id = self.last_audit_id.max(id);
                items.push(FeedItem {
                    table: "admin_audit_log",
                    event: FeedEvent::Insert,
                    row_id: id,
                    summary: format!("{}: {}", action, details),
                });
            }
        }

        Ok(items)
    }
}

fn max_id(pool: &mut DbPool, table: &str) -> AppResult<i64> {
    Ok(pool.conn.query_row(
        &format!("SELECT IFNULL(MAX(id), 0) FROM {}", table),
        [],
        |row| row.get(0),
    )?)
}

fn open_entry_ids(pool: &mut DbPool) -> AppResult<Vec<i64>> {
    let mut stmt = pool
        .conn
        .prepare_cached("SELECT id FROM time_entries WHERE clock_out IS NULL")?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
