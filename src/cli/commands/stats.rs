use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::StatsLogic;
use crate::db::pool::DbPool;
use crate::db::queries::{find_group, load_groups};
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { student, group } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let sep = &cfg.separator_char;

        match (student, group) {
            (Some(id), _) => {
                let s = StatsLogic::for_student(&pool.conn, *id)?;
                let title = format!("Attendance of {}", s.student.display_name());
                StatsLogic::print(&title, &[s], sep);
            }
            (None, Some(gid)) => {
                let g = find_group(&pool.conn, *gid)?;
                let stats = StatsLogic::for_group(&pool.conn, *gid)?;
                StatsLogic::print(&format!("Attendance of {}", g.name), &stats, sep);
            }
            (None, None) => {
                for g in load_groups(&pool.conn)? {
                    let stats = StatsLogic::for_group(&pool.conn, g.id)?;
                    StatsLogic::print(&format!("Attendance of {}", g.name), &stats, sep);
                }
            }
        }
    }
    Ok(())
}
