use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::take::{TakeLogic, TakeRequest};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::date_or_today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Take {
        group,
        date,
        marks,
        sheet,
        dry_run,
    } = cmd
    {
        let date = date_or_today(date.as_deref())?;
        let mut pool = DbPool::new(&cfg.database)?;

        let req = TakeRequest {
            group_id: *group,
            date,
            marks,
            sheet: sheet.as_deref(),
            dry_run: *dry_run,
        };
        TakeLogic::apply(&mut pool, cfg, &req)?;
    }
    Ok(())
}
