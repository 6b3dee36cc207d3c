use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::print_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;
        print_log(&pool.conn)?;
    }

    Ok(())
}
