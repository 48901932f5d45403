use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS PER TABLE
    //
    for table in [
        "employees",
        "time_entries",
        "schedules",
        "admin_codes",
        "login_attempts",
        "admin_audit_log",
    ] {
        let count: i64 = pool
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        println!(
            "{}• {}:{} {}{}{}",
            CYAN, table, RESET, GREEN, count, RESET
        );
    }

    //
    // 3) OPEN SHIFTS
    //
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM time_entries WHERE clock_out IS NULL",
        [],
        |row| row.get(0),
    )?;
    let open_color = if open > 0 { GREEN } else { GREY };
    println!(
        "{}• Open shifts:{} {}{}{}",
        CYAN, RESET, open_color, open, RESET
    );

    println!();
    Ok(())
}

/// Run PRAGMA integrity_check and fail unless SQLite answers "ok".
pub fn check_integrity(pool: &mut DbPool) -> AppResult<()> {
    let answer: String = pool
        .conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if answer == "ok" {
        Ok(())
    } else {
        Err(AppError::Other(format!(
            "integrity check failed: {}",
            answer
        )))
    }
}

pub fn vacuum(pool: &mut DbPool) -> AppResult<()> {
    pool.conn.execute_batch("VACUUM")?;
    Ok(())
}
