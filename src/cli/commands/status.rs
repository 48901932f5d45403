use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::shift::{ShiftDuration, ShiftTracker};
use crate::db::{employees, entries};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::secs2readable;
use chrono::Utc;

/// Handle the `status` command: a kiosk-side view of one employee's
/// current shift and lifetime totals. PIN-identified, no session needed.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { pin } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let employee = employees::employee_by_pin(&pool.conn, pin)?
            .ok_or_else(|| AppError::NotFound("no employee with that PIN".to_string()))?;

        header(format!("Status — {}", employee.name));

        match ShiftTracker::active_entry(&mut pool, employee.id)? {
            Some(open) => {
                let elapsed =
                    match ShiftTracker::compute_duration(open.clock_in, Some(Utc::now())) {
                        ShiftDuration::Completed(s) => s,
                        ShiftDuration::InProgress => 0,
                    };
                println!(
                    "{}● On shift{} since {} ({} so far)",
                    GREEN,
                    RESET,
                    open.clock_in_str(),
                    secs2readable(elapsed)
                );
            }
            None => println!("{}○ Off shift{}", GREY, RESET),
        }

        let all = entries::entries_for_employee(&pool.conn, employee.id)?;
        let summary = ShiftTracker::aggregate(&all);

        println!();
        println!(
            "Completed shifts : {:>6}",
            summary.completed_count
        );
        println!(
            "Total time       : {:>6}",
            secs2readable(summary.total_seconds)
        );

        if let Some(last) = all.iter().find(|e| !e.is_open()) {
            println!(
                "Last shift       : {} → {}",
                last.clock_in_str(),
                last.clock_out_str()
            );
        }
    }

    Ok(())
}
