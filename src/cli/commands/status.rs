use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Status) {
        let mut pool = DbPool::new(&cfg.database)?;
        RosterLogic::print_statuses(&mut pool, &cfg.separator_char)?;
    }
    Ok(())
}
