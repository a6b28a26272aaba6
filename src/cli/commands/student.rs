use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Student {
        add,
        first,
        group,
        list,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if let Some(last) = add {
            let (Some(first), Some(group_id)) = (first, group) else {
                return Err(AppError::Other(
                    "--add requires --first and --group".into(),
                ));
            };
            RosterLogic::add_student(&mut pool, last, first, *group_id)?;
        }

        if *list {
            let group_id = group.ok_or_else(|| AppError::Other("--list requires --group".into()))?;
            RosterLogic::print_students(&mut pool, group_id, &cfg.separator_char)?;
        }
    }
    Ok(())
}
