use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::TimecardService;
use crate::db::log::ttlog;
use crate::errors::AppResult;

use super::{open_pool, print_calculation};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Calc { id, actor, json } = cmd {
        let pool = open_pool(cfg)?;
        let (store, audit) = pool.collaborators();
        let mut svc = TimecardService::new(store, audit, cfg.grace_default());

        let result = svc.recalculate(*id, actor)?;

        ttlog(
            &pool.conn,
            "calc",
            &format!("#{}", id),
            &format!("valid={} hours={:.2}", result.is_valid, result.total_hours),
        )?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_calculation(*id, &result, &cfg.currency);
        }
    }
    Ok(())
}
