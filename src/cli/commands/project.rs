use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::TimecardService;
use crate::core::ports::RecordStore;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::project::Project;
use crate::ui::messages::success;
use crate::utils::date;

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Project { id, name, start } = cmd {
        let start_date = match start {
            Some(s) => Some(date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?),
            None => None,
        };

        let pool = open_pool(cfg)?;
        let (store, audit) = pool.collaborators();
        let existing = store.get_project(id)?;

        // keep stored values for fields not given
        let project = Project {
            id: id.clone(),
            name: name
                .clone()
                .or_else(|| existing.as_ref().map(|p| p.name.clone()))
                .unwrap_or_default(),
            start_date: start_date.or_else(|| existing.and_then(|p| p.start_date)),
        };

        let mut svc = TimecardService::new(store, audit, cfg.grace_default());
        svc.save_project(&project)?;

        let show_day = project
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "not set".into());
        ttlog(
            &pool.conn,
            "project",
            id,
            &format!("name='{}' show_day={}", project.name, show_day),
        )?;
        success(format!("Project '{}' saved (show day: {}).", id, show_day));
    }
    Ok(())
}
