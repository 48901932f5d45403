use crate::errors::AppResult;
use chrono::Utc;
use rusqlite::{Connection, Row, params};
use serde::Serialize;

/// One immutable audit record. The table is append-only, which also makes
/// it safe under concurrent writers.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub id: i64,
    pub action: String,
    pub user_id: Option<i64>,
    pub details: String,
    pub ip_address: Option<String>,
    pub created_at: String,
}

fn map_row(row: &Row) -> rusqlite::Result<AuditRecord> {
    Ok(AuditRecord {
        id: row.get("id")?,
        action: row.get("action")?,
        user_id: row.get("user_id")?,
        details: row.get("details")?,
        ip_address: row.get("ip_address")?,
        created_at: row.get("created_at")?,
    })
}

/// Append a record to admin_audit_log.
pub fn append(
    conn: &Connection,
    action: &str,
    details: &str,
    user_id: Option<i64>,
    ip_address: Option<&str>,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO admin_audit_log (action, user_id, details, ip_address, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![
        action,
        user_id,
        details,
        ip_address,
        Utc::now().to_rfc3339(),
    ])?;
    Ok(())
}

/// Most recent audit records, newest first.
pub fn recent(conn: &Connection, limit: i64) -> AppResult<Vec<AuditRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM admin_audit_log
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
