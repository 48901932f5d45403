use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::session;
use crate::db::audit;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (prod or test mode)
///  - all pending DB migrations
///  - optionally, the first admin code
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let path = Config::config_file();
    let cfg = Config::load();
    let db_path = cli.db.clone().unwrap_or(cfg.database);

    println!("⚙️  Initializing punchclock…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", &db_path);

    let mut pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    println!("✅ Database initialized at {}", &db_path);

    // Seed the first admin code, if requested. Later codes go through
    // `punchclock code add` behind an admin session.
    if let Commands::Init {
        admin_code: Some(code),
    } = &cli.command
    {
        session::add_admin_code(&mut pool, code)?;
        println!("🔑 Admin code registered.");
    }

    // Best-effort init marker in the audit trail
    if let Err(e) = audit::append(
        &pool.conn,
        "init",
        &format!("Database initialized at {}", &db_path),
        None,
        None,
    ) {
        warning(format!("Failed to write audit record: {}", e));
    }

    println!("🎉 punchclock initialization completed!");
    Ok(())
}
