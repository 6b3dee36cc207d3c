use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::errors::AppResult;

use super::open_backend;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with `--test`)
///  - the SQLite database and every pending migration
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ CONFIGURATION
    //
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;

    let mut cfg = Config::load()?;
    cfg.database = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing PodGuard…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    //
    // 2️⃣ DATABASE (tables + migrations)
    //
    let local = open_backend(&cfg)?;

    println!("✅ Database initialized at {}", &cfg.database);

    //
    // 3️⃣ AUDIT (non-blocking)
    //
    audit_quiet(
        &local.pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    );

    println!("🎉 PodGuard initialization completed!");
    Ok(())
}
