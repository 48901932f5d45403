use crate::cli::parser::{Commands, ReportAction};
use crate::config::Config;
use crate::core::payroll::PayrollLogic;
use crate::core::session::SessionGuard;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::store::FileSessionStore;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_active};
use crate::utils::date::{last_day_of_month, range_bounds, today};
use crate::utils::table::{Column, Table};
use crate::utils::{money, secs2readable};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::path::PathBuf;

/// Handle the `report` command. All reports are admin-facing.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { action } = cmd {
        let store = FileSessionStore::new(PathBuf::from(&cfg.session_file));
        let guard = SessionGuard::new(&store, cfg);
        let session = guard.require_session()?;

        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            ReportAction::Payroll { employee, range } => {
                payroll(&mut pool, cfg, *employee, range)?;
                guard.audit(
                    &pool.conn,
                    "payroll_report",
                    &format!("Generated payroll report for employee {}", employee),
                    Some(session.user_id),
                    None,
                );
            }
            ReportAction::Staff => staff(&mut pool)?,
            ReportAction::Daily => daily(&mut pool)?,
            ReportAction::Weekly => weekly(&mut pool)?,
        }
    }

    Ok(())
}

fn payroll(
    pool: &mut DbPool,
    cfg: &Config,
    employee_id: i64,
    range: &Option<String>,
) -> AppResult<()> {
    let (from, to) = match range {
        Some(expr) => range_bounds(expr)?,
        None => current_month(),
    };
    let (start, end) = utc_bounds(from, to);

    let report = PayrollLogic::calculate(pool, cfg, employee_id, start, end)?;

    header(format!(
        "Payroll — {} ({} to {})",
        report.employee.name, from, to
    ));

    println!("Completed shifts : {:>10}", report.entries.len());
    println!(
        "Total time       : {:>10}",
        secs2readable(report.total_seconds)
    );
    println!("Total hours      : {:>10.2}", report.total_hours);
    println!("Hourly rate      : {:>10}", money(report.hourly_rate));
    println!("Total pay        : {:>10}", money(report.total_pay));

    Ok(())
}

fn staff(pool: &mut DbPool) -> AppResult<()> {
    let stats = PayrollLogic::employee_stats(pool)?;
    if stats.is_empty() {
        println!("No employees yet.");
        return Ok(());
    }

    header("Staff totals");

    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("Name", 16),
        Column::new("Shifts", 6),
        Column::new("Total time", 10),
        Column::new("On shift", 8),
    ]);

    for s in &stats {
        table.add_row(vec![
            s.employee.id.to_string(),
            s.employee.name.clone(),
            s.completed_count.to_string(),
            secs2readable(s.total_seconds),
            format!(
                "{}{}{}",
                color_for_active(s.is_active),
                if s.is_active { "yes" } else { "no" },
                RESET
            ),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}

fn daily(pool: &mut DbPool) -> AppResult<()> {
    let stats = PayrollLogic::daily_stats(pool)?;

    header(format!("Today — {}", today()));
    println!(
        "On shift now     : {} of {}",
        stats.active_employees, stats.total_employees
    );
    println!(
        "Completed today  : {}",
        secs2readable(stats.total_seconds)
    );
    Ok(())
}

fn weekly(pool: &mut DbPool) -> AppResult<()> {
    let stats = PayrollLogic::weekly_stats(pool)?;

    header("This week");
    println!("Completed shifts : {}", stats.completed_count);
    println!("Total time       : {}", secs2readable(stats.total_seconds));
    println!();

    let mut table = Table::new(vec![
        Column::new("Day", 10),
        Column::new("Shifts", 6),
        Column::new("Time", 10),
    ]);
    for day in &stats.days {
        table.add_row(vec![
            day.date.format("%a %m-%d").to_string(),
            day.entry_count.to_string(),
            secs2readable(day.total_seconds),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

fn current_month() -> (NaiveDate, NaiveDate) {
    let t = today();
    let first = NaiveDate::from_ymd_opt(t.year(), t.month(), 1).unwrap_or(t);
    (first, last_day_of_month(t.year(), t.month()))
}

fn utc_bounds(from: NaiveDate, to: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start =
        DateTime::from_naive_utc_and_offset(from.and_hms_opt(0, 0, 0).unwrap_or_default(), Utc);
    let end =
        DateTime::from_naive_utc_and_offset(to.and_hms_opt(23, 59, 59).unwrap_or_default(), Utc);
    (start, end)
}
