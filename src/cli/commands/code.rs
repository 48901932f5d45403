use crate::cli::parser::{CodeAction, Commands};
use crate::config::Config;
use crate::core::session::{self, SessionGuard};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::store::FileSessionStore;
use crate::ui::messages::success;
use std::path::PathBuf;

/// Handle the `code` command: admin-code management behind a session.
/// The very first code is seeded by `init --admin-code` instead.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Code { action } = cmd {
        let store = FileSessionStore::new(PathBuf::from(&cfg.session_file));
        let guard = SessionGuard::new(&store, cfg);
        let admin = guard.require_session()?;

        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            CodeAction::Add { code } => {
                session::add_admin_code(&mut pool, code)?;
                guard.audit(
                    &pool.conn,
                    "create_admin_code",
                    "Registered a new admin code",
                    Some(admin.user_id),
                    None,
                );
                success("Admin code registered.");
            }

            CodeAction::Count => {
                let n = session::count_admin_codes(&mut pool)?;
                println!("{} admin code(s) registered.", n);
            }
        }
    }

    Ok(())
}
