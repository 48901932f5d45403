use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionGuard;
use crate::db::pool::DbPool;
use crate::db::{attempts, audit};
use crate::errors::AppResult;
use crate::store::FileSessionStore;
use crate::utils::colors::{RESET, color_for_locked};
use crate::utils::table::{Column, Table};
use chrono::Utc;
use std::path::PathBuf;

/// Handle the `audit` command: browse the admin audit trail, or the
/// per-IP login attempt counters with `--attempts`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Audit { limit, attempts } = cmd {
        let store = FileSessionStore::new(PathBuf::from(&cfg.session_file));
        let guard = SessionGuard::new(&store, cfg);
        guard.require_session()?;

        let mut pool = DbPool::new(&cfg.database)?;

        if *attempts {
            print_attempts(&mut pool, *limit)?;
        } else {
            print_audit(&mut pool, *limit)?;
        }
    }

    Ok(())
}

fn print_audit(pool: &mut DbPool, limit: i64) -> AppResult<()> {
    let records = audit::recent(&pool.conn, limit)?;
    if records.is_empty() {
        println!("Audit trail is empty.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("When", 20),
        Column::new("Action", 16),
        Column::new("User", 5),
        Column::new("Origin", 8),
        Column::new("Details", 30),
    ]);

    for rec in &records {
        table.add_row(vec![
            rec.id.to_string(),
            rec.created_at.clone(),
            rec.action.clone(),
            rec.user_id.map(|id| id.to_string()).unwrap_or_default(),
            rec.ip_address.clone().unwrap_or_default(),
            rec.details.clone(),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}

fn print_attempts(pool: &mut DbPool, limit: i64) -> AppResult<()> {
    let rows = attempts::recent_attempts(&pool.conn, limit)?;
    if rows.is_empty() {
        println!("No login attempts recorded.");
        return Ok(());
    }

    let now = Utc::now();
    let mut table = Table::new(vec![
        Column::new("Origin", 12),
        Column::new("Failures", 8),
        Column::new("State", 10),
        Column::new("Last attempt", 20),
    ]);

    for row in &rows {
        let locked = row.is_locked_now(now);
        table.add_row(vec![
            row.ip_address.clone(),
            row.attempt_count.to_string(),
            format!(
                "{}{}{}",
                color_for_locked(locked),
                if locked { "LOCKED" } else { "ok" },
                RESET
            ),
            row.last_attempt.to_rfc3339(),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
