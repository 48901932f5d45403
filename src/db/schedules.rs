use crate::errors::{AppError, AppResult};
use crate::models::schedule::Schedule;
use chrono::{NaiveTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Schedule> {
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    Ok(Schedule {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        day_of_week: row.get::<_, i64>("day_of_week")? as u8,
        start_time: parse_hhmm(&start_str)?,
        end_time: parse_hhmm(&end_str)?,
        created_at: row.get("created_at")?,
    })
}

fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(s.to_string())),
        )
    })
}

fn validate_slot(day_of_week: u8, start_time: NaiveTime, end_time: NaiveTime) -> AppResult<()> {
    if day_of_week > 6 {
        return Err(AppError::Validation(format!(
            "day of week must be 0 (Sun) to 6 (Sat), got {}",
            day_of_week
        )));
    }
    if end_time <= start_time {
        return Err(AppError::Validation(format!(
            "schedule end {} must be after start {}",
            end_time.format("%H:%M"),
            start_time.format("%H:%M"),
        )));
    }
    Ok(())
}

pub fn insert_schedule(
    conn: &Connection,
    employee_id: i64,
    day_of_week: u8,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> AppResult<Schedule> {
    validate_slot(day_of_week, start_time, end_time)?;

    conn.execute(
        "INSERT INTO schedules (employee_id, day_of_week, start_time, end_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            employee_id,
            day_of_week,
            start_time.format("%H:%M").to_string(),
            end_time.format("%H:%M").to_string(),
            Utc::now().to_rfc3339(),
        ],
    )?;

    load_schedule(conn, conn.last_insert_rowid())
}

pub fn update_schedule(conn: &Connection, slot: &Schedule) -> AppResult<()> {
    validate_slot(slot.day_of_week, slot.start_time, slot.end_time)?;

    let changed = conn.execute(
        "UPDATE schedules
            SET day_of_week = ?1, start_time = ?2, end_time = ?3
          WHERE id = ?4",
        params![
            slot.day_of_week,
            slot.start_time.format("%H:%M").to_string(),
            slot.end_time.format("%H:%M").to_string(),
            slot.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("schedule id {}", slot.id)));
    }
    Ok(())
}

pub fn load_schedule(conn: &Connection, id: i64) -> AppResult<Schedule> {
    let mut stmt = conn.prepare("SELECT * FROM schedules WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("schedule id {}", id)))
}

pub fn delete_schedule(conn: &Connection, id: i64) -> AppResult<Schedule> {
    // Fetch first so the audit trail can describe what went away.
    let schedule = load_schedule(conn, id)?;
    conn.execute("DELETE FROM schedules WHERE id = ?1", [id])?;
    Ok(schedule)
}

/// Weekly slots, optionally restricted to one employee.
pub fn load_schedules(conn: &Connection, employee_id: Option<i64>) -> AppResult<Vec<Schedule>> {
    let mut out = Vec::new();
    match employee_id {
        Some(emp) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM schedules
                 WHERE employee_id = ?1
                 ORDER BY day_of_week ASC, start_time ASC",
            )?;
            let rows = stmt.query_map([emp], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT * FROM schedules
                 ORDER BY employee_id ASC, day_of_week ASC, start_time ASC",
            )?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }
    Ok(out)
}
