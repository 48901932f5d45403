use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::core::session::SessionGuard;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::store::FileSessionStore;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let store = FileSessionStore::new(PathBuf::from(&cfg.session_file));
        let guard = SessionGuard::new(&store, cfg);
        guard.require_session()?;

        let mut pool = DbPool::new(&cfg.database)?;
        BackupLogic::backup(&mut pool, cfg, file, *compress)?;
    }

    Ok(())
}
