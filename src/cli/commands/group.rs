use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Group { add, list } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        if let Some(name) = add {
            RosterLogic::add_group(&mut pool, name)?;
        }

        // no flags → list
        if *list || add.is_none() {
            RosterLogic::print_groups(&mut pool, &cfg.separator_char)?;
        }
    }
    Ok(())
}
