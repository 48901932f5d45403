use crate::cli::parser::{ClockAction, Commands};
use crate::config::Config;
use crate::core::shift::{ShiftDuration, ShiftTracker};
use crate::db::employees;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::geo::GeoPoint;
use crate::ui::messages::{info, success};
use crate::utils::time::format_seconds;

/// Handle the `clock` command: the kiosk entry point. Identity comes from
/// the PIN on every punch; no session is involved.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            ClockAction::In { pin, lat, lon } => {
                let employee = lookup(&mut pool, pin)?;
                let location = geo_from_args(*lat, *lon);

                let already_open =
                    ShiftTracker::active_entry(&mut pool, employee.id)?.is_some();
                let entry = ShiftTracker::clock_in(&mut pool, employee.id, location)?;

                if already_open {
                    info(format!(
                        "{} is already clocked in since {} (entry {}).",
                        employee.name,
                        entry.clock_in_str(),
                        entry.id
                    ));
                } else {
                    success(format!(
                        "{} clocked in at {} (entry {}).",
                        employee.name,
                        entry.clock_in_str(),
                        entry.id
                    ));
                }
            }

            ClockAction::Out { pin, lat, lon } => {
                let employee = lookup(&mut pool, pin)?;
                let location = geo_from_args(*lat, *lon);

                let Some(open) = ShiftTracker::active_entry(&mut pool, employee.id)? else {
                    return Err(AppError::Validation(format!(
                        "{} is not clocked in",
                        employee.name
                    )));
                };

                let entry = ShiftTracker::clock_out(&mut pool, open.id, location)?;
                let worked = match ShiftTracker::compute_duration(entry.clock_in, entry.clock_out)
                {
                    ShiftDuration::Completed(s) => format_seconds(s),
                    ShiftDuration::InProgress => "in progress".to_string(),
                };

                success(format!(
                    "{} clocked out at {} — worked {}.",
                    employee.name,
                    entry.clock_out_str(),
                    worked
                ));
            }
        }
    }

    Ok(())
}

fn lookup(pool: &mut DbPool, pin: &str) -> AppResult<Employee> {
    employees::employee_by_pin(&pool.conn, pin)?
        .ok_or_else(|| AppError::NotFound("no employee with that PIN".to_string()))
}

fn geo_from_args(lat: Option<f64>, lon: Option<f64>) -> Option<GeoPoint> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
        _ => None,
    }
}
