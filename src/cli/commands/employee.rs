use crate::cli::parser::{Commands, EmployeeAction};
use crate::config::Config;
use crate::core::session::SessionGuard;
use crate::db::employees;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Role;
use crate::store::FileSessionStore;
use crate::ui::messages::success;
use crate::utils::colors::{GREY, RESET, color_for_active};
use crate::utils::money;
use crate::utils::table::{Column, Table};
use std::path::PathBuf;

/// Handle the `employee` command. Admin operations behind a session, with
/// one bootstrap exception: while the roster is empty, the first employee
/// can be created without a session (and must be an admin), since no one
/// could log in before an admin identity exists.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee { action } = cmd {
        let store = FileSessionStore::new(PathBuf::from(&cfg.session_file));
        let guard = SessionGuard::new(&store, cfg);

        let mut pool = DbPool::new(&cfg.database)?;

        let bootstrap = matches!(action, EmployeeAction::Add { .. })
            && employees::count_employees(&pool.conn)? == 0;
        let session = if bootstrap {
            None
        } else {
            Some(guard.require_session()?)
        };
        let acting_user = session.as_ref().map(|s| s.user_id);

        match action {
            EmployeeAction::Add {
                name,
                position,
                pin,
                role,
                rate,
            } => {
                let role = Role::from_code(role).ok_or_else(|| {
                    AppError::Validation(format!(
                        "unknown role '{}': expected admin or employee",
                        role
                    ))
                })?;

                if bootstrap && !role.is_admin() {
                    return Err(AppError::Validation(
                        "the first employee must have role admin".into(),
                    ));
                }

                let emp =
                    employees::insert_employee(&pool.conn, name, position, pin, role, *rate)?;

                guard.audit(
                    &pool.conn,
                    "create_employee",
                    &format!("Created employee: {} (id {})", emp.name, emp.id),
                    acting_user,
                    None,
                );
                success(format!("Employee '{}' added with id {}.", emp.name, emp.id));
            }

            EmployeeAction::Update {
                id,
                name,
                position,
                pin,
                role,
                rate,
            } => {
                let mut emp = employees::load_employee(&pool.conn, *id)?;

                if let Some(name) = name {
                    emp.name = name.clone();
                }
                if let Some(position) = position {
                    emp.position = position.clone();
                }
                if let Some(pin) = pin {
                    emp.pin = pin.clone();
                }
                if let Some(role) = role {
                    emp.role = Role::from_code(role).ok_or_else(|| {
                        AppError::Validation(format!(
                            "unknown role '{}': expected admin or employee",
                            role
                        ))
                    })?;
                }
                if let Some(rate) = rate {
                    emp.hourly_rate = Some(*rate);
                }

                employees::update_employee(&pool.conn, &emp)?;

                guard.audit(
                    &pool.conn,
                    "update_employee",
                    &format!("Updated employee: {} (id {})", emp.name, emp.id),
                    acting_user,
                    None,
                );
                success(format!("Employee {} updated.", emp.id));
            }

            EmployeeAction::List => {
                let staff = employees::load_employees(&pool.conn)?;
                if staff.is_empty() {
                    println!("No employees yet. Add one with `punchclock employee add`.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("ID", 4),
                    Column::new("Name", 16),
                    Column::new("Position", 12),
                    Column::new("Role", 8),
                    Column::new("Rate", 8),
                    Column::new("On shift", 8),
                ]);

                for emp in &staff {
                    let active =
                        crate::db::entries::active_entry(&pool.conn, emp.id)?.is_some();
                    table.add_row(vec![
                        emp.id.to_string(),
                        emp.name.clone(),
                        emp.position.clone(),
                        emp.role.to_db_str().to_string(),
                        emp.hourly_rate
                            .map(money)
                            .unwrap_or_else(|| format!("{}(default){}", GREY, RESET)),
                        format!(
                            "{}{}{}",
                            color_for_active(active),
                            if active { "yes" } else { "no" },
                            RESET
                        ),
                    ]);
                }

                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
