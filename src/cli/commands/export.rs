use crate::cli::parser::{Commands, ExportKindArg};
use crate::config::Config;
use crate::core::session::SessionGuard;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::logic::{ExportKind, ExportLogic};
use crate::store::FileSessionStore;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        kind,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let store = FileSessionStore::new(PathBuf::from(&cfg.session_file));
        let guard = SessionGuard::new(&store, cfg);
        let session = guard.require_session()?;

        let mut pool = DbPool::new(&cfg.database)?;

        let kind = match kind {
            ExportKindArg::Entries => ExportKind::Entries,
            ExportKindArg::Payroll => ExportKind::Payroll,
        };

        ExportLogic::export(&mut pool, cfg, kind, format.clone(), file, range, *force)?;

        guard.audit(
            &pool.conn,
            "export",
            &format!("Exported {} data to {}", format.as_str(), file),
            Some(session.user_id),
            None,
        );
    }

    Ok(())
}
