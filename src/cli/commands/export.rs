use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::TimecardService;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::export::{ExportFormat, export_timecards};
use crate::ui::messages::success;

use super::list::build_filter;
use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        user,
        project,
        period,
        force,
    } = cmd
    {
        let format = ExportFormat::parse(format)?;
        let filter = build_filter(user, project, &None, period)?;

        let pool = open_pool(cfg)?;
        let (store, audit) = pool.collaborators();
        let svc = TimecardService::new(store, audit, cfg.grace_default());

        let timecards = svc.list(&filter)?;
        let count = export_timecards(&timecards, format, file, *force)?;

        ttlog(
            &pool.conn,
            "export",
            file,
            &format!("{} timecard(s) exported", count),
        )?;
        success(format!("{} timecard(s) exported to {}", count, file));
    }
    Ok(())
}
