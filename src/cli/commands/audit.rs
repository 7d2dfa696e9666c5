use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::TimecardService;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Audit { id } = cmd {
        let pool = open_pool(cfg)?;
        let (store, audit) = pool.collaborators();
        let svc = TimecardService::new(store, audit, cfg.grace_default());

        let entries = svc.history(*id)?;
        if entries.is_empty() {
            info(format!("No changes recorded for timecard #{}.", id));
            return Ok(());
        }

        header(format!("Audit trail for timecard #{}", id));

        let mut table = Table::new(vec![
            Column::new("WHEN", 25),
            Column::new("ACTION", 13),
            Column::new("ACTOR", 12),
            Column::new("FIELD", 15),
            Column::new("OLD", 18),
            Column::new("NEW", 18),
        ]);
        for e in entries {
            table.add_row(vec![
                e.changed_at,
                e.action.to_db_str().to_string(),
                e.actor,
                e.field,
                e.old_value,
                e.new_value,
            ]);
        }
        print!("{}", table.render(&cfg.separator_char));
    }
    Ok(())
}
