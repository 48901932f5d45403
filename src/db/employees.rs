use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, Role};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Employee> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid role: {}", role_str))),
        )
    })?;

    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        position: row.get("position")?,
        pin: row.get("pin")?,
        role,
        hourly_rate: row.get("hourly_rate")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_employee(
    conn: &Connection,
    name: &str,
    position: &str,
    pin: &str,
    role: Role,
    hourly_rate: Option<f64>,
) -> AppResult<Employee> {
    Employee::validate_pin(pin).map_err(AppError::Validation)?;
    if name.trim().is_empty() {
        return Err(AppError::Validation("employee name must not be empty".into()));
    }

    let res = conn.execute(
        "INSERT INTO employees (name, position, pin, role, hourly_rate, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            name,
            position,
            pin,
            role.to_db_str(),
            hourly_rate,
            Utc::now().to_rfc3339(),
        ],
    );

    match res {
        Ok(_) => {
            let id = conn.last_insert_rowid();
            load_employee(conn, id)
        }
        Err(e) if is_unique_violation(&e) => Err(AppError::Validation(format!(
            "PIN '{}' is already assigned to another employee",
            pin
        ))),
        Err(e) => Err(e.into()),
    }
}

pub fn update_employee(conn: &Connection, emp: &Employee) -> AppResult<()> {
    Employee::validate_pin(&emp.pin).map_err(AppError::Validation)?;

    let changed = conn.execute(
        "UPDATE employees
            SET name = ?1, position = ?2, pin = ?3, role = ?4,
                hourly_rate = ?5, updated_at = ?6
          WHERE id = ?7",
        params![
            emp.name,
            emp.position,
            emp.pin,
            emp.role.to_db_str(),
            emp.hourly_rate,
            Utc::now().to_rfc3339(),
            emp.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("employee id {}", emp.id)));
    }
    Ok(())
}

pub fn load_employee(conn: &Connection, id: i64) -> AppResult<Employee> {
    let mut stmt = conn.prepare("SELECT * FROM employees WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("employee id {}", id)))
}

/// Resolve a kiosk PIN to its employee. PINs are unique by schema, so a
/// single-row lookup is safe.
pub fn employee_by_pin(conn: &Connection, pin: &str) -> AppResult<Option<Employee>> {
    if pin.is_empty() {
        return Err(AppError::Validation("PIN must not be empty".into()));
    }
    let mut stmt = conn.prepare("SELECT * FROM employees WHERE pin = ?1")?;
    Ok(stmt.query_row([pin], map_row).optional()?)
}

pub fn load_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The designated admin identity: the lowest-id employee with role admin.
pub fn designated_admin(conn: &Connection) -> AppResult<Option<Employee>> {
    let mut stmt =
        conn.prepare("SELECT * FROM employees WHERE role = 'admin' ORDER BY id ASC LIMIT 1")?;
    Ok(stmt.query_row([], map_row).optional()?)
}

pub fn count_employees(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?)
}

pub(crate) fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
