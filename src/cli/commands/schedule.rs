use crate::cli::parser::{Commands, ScheduleAction};
use crate::config::Config;
use crate::core::session::SessionGuard;
use crate::db::pool::DbPool;
use crate::db::{employees, schedules};
use crate::errors::AppResult;
use crate::store::FileSessionStore;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_required_time;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule { action } = cmd {
        let store = FileSessionStore::new(PathBuf::from(&cfg.session_file));
        let guard = SessionGuard::new(&store, cfg);
        let session = guard.require_session()?;

        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            ScheduleAction::Add {
                employee,
                day,
                start,
                end,
            } => {
                // Validate the foreign key up front for a friendlier error
                let emp = employees::load_employee(&pool.conn, *employee)?;
                let start = parse_required_time(start)?;
                let end = parse_required_time(end)?;

                let slot = schedules::insert_schedule(&pool.conn, emp.id, *day, start, end)?;

                guard.audit(
                    &pool.conn,
                    "create_schedule",
                    &format!(
                        "Added schedule for employee {}: {} {}-{}",
                        emp.id,
                        slot.day_name(),
                        slot.start_str(),
                        slot.end_str()
                    ),
                    Some(session.user_id),
                    None,
                );
                success(format!(
                    "Schedule {} added: {} works {} {}-{}.",
                    slot.id,
                    emp.name,
                    slot.day_name(),
                    slot.start_str(),
                    slot.end_str()
                ));
            }

            ScheduleAction::Update { id, day, start, end } => {
                let mut slot = schedules::load_schedule(&pool.conn, *id)?;

                if let Some(day) = day {
                    slot.day_of_week = *day;
                }
                if let Some(start) = start {
                    slot.start_time = parse_required_time(start)?;
                }
                if let Some(end) = end {
                    slot.end_time = parse_required_time(end)?;
                }

                schedules::update_schedule(&pool.conn, &slot)?;

                guard.audit(
                    &pool.conn,
                    "update_schedule",
                    &format!(
                        "Updated schedule {} (employee {}): {} {}-{}",
                        slot.id,
                        slot.employee_id,
                        slot.day_name(),
                        slot.start_str(),
                        slot.end_str()
                    ),
                    Some(session.user_id),
                    None,
                );
                success(format!(
                    "Schedule {} updated: {} {}-{}.",
                    slot.id,
                    slot.day_name(),
                    slot.start_str(),
                    slot.end_str()
                ));
            }

            ScheduleAction::Del { id } => {
                let slot = schedules::delete_schedule(&pool.conn, *id)?;

                guard.audit(
                    &pool.conn,
                    "delete_schedule",
                    &format!(
                        "Deleted schedule {} (employee {}, {} {}-{})",
                        slot.id,
                        slot.employee_id,
                        slot.day_name(),
                        slot.start_str(),
                        slot.end_str()
                    ),
                    Some(session.user_id),
                    None,
                );
                success(format!("Schedule {} deleted.", slot.id));
            }

            ScheduleAction::List { employee } => {
                let slots = schedules::load_schedules(&pool.conn, *employee)?;
                if slots.is_empty() {
                    println!("No schedules found.");
                    return Ok(());
                }

                let names: std::collections::HashMap<i64, String> =
                    employees::load_employees(&pool.conn)?
                        .into_iter()
                        .map(|e| (e.id, e.name))
                        .collect();

                let mut table = Table::new(vec![
                    Column::new("ID", 4),
                    Column::new("Employee", 16),
                    Column::new("Day", 4),
                    Column::new("Start", 5),
                    Column::new("End", 5),
                ]);

                for slot in &slots {
                    table.add_row(vec![
                        slot.id.to_string(),
                        names
                            .get(&slot.employee_id)
                            .cloned()
                            .unwrap_or_else(|| format!("#{}", slot.employee_id)),
                        slot.day_name().to_string(),
                        slot.start_str(),
                        slot.end_str(),
                    ]);
                }

                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
