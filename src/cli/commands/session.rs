use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionGuard;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::store::FileSessionStore;
use crate::ui::messages::{error, info, success};
use crate::utils::secs2readable;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Handle `login`, `logout` and `session`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let store = FileSessionStore::new(PathBuf::from(&cfg.session_file));
    let guard = SessionGuard::new(&store, cfg);

    match cmd {
        Commands::Login { code, ip } => {
            let mut pool = DbPool::new(&cfg.database)?;
            let outcome = guard.verify_code(&mut pool, code, ip)?;

            if outcome.success {
                success(outcome.message);
                if let Some(session) = guard.current_session()? {
                    info(format!(
                        "Logged in as {} for {}.",
                        session.user_name,
                        secs2readable(session.remaining_secs())
                    ));
                }
            } else {
                // Exit code stays 0: a wrong code is an answer, not a fault
                error(outcome.message);
            }
        }

        Commands::Logout => {
            let had_session = guard.current_session()?.is_some();
            let mut pool = DbPool::new(&cfg.database)?;
            guard.end_session(&mut pool)?;

            if had_session {
                success("Logged out.");
            } else {
                info("No active session.");
            }
        }

        Commands::Session => match guard.current_session()? {
            Some(session) => {
                let opened = DateTime::<Utc>::from_timestamp(session.created_at, 0)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| session.created_at.to_string());

                println!("Session   : {}", session.id);
                println!("Admin     : {} (id {})", session.user_name, session.user_id);
                println!("Opened at : {}", opened);
                println!("Expires in: {}", secs2readable(session.remaining_secs()));
            }
            None => info("No active session."),
        },

        _ => {}
    }

    Ok(())
}
