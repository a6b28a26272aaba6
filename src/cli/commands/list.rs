use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::{parse_month, today};
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { group, month } = cmd {
        let month_start = match month {
            Some(m) => parse_month(m)?,
            None => today().with_day(1).unwrap_or_else(today),
        };

        let pool = DbPool::new(&cfg.database)?;
        let grid = ListLogic::month_grid(&pool.conn, *group, month_start)?;
        ListLogic::print(&grid);
    }
    Ok(())
}
