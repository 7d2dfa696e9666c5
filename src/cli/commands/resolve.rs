use std::collections::HashMap;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::TimecardService;
use crate::core::ports::RecordStore;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::resolution::BreakResolution;
use crate::ui::messages::{bullet, success, warning};
use crate::utils::time::{format_hours, parse_break_window, place_break_window};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Resolve {
        ids,
        break_interval,
        no_break,
        actor,
        json,
    } = cmd
    {
        let window = match (break_interval, no_break) {
            (Some(s), false) => {
                Some(parse_break_window(s).ok_or_else(|| AppError::InvalidBreak(s.clone()))?)
            }
            _ => None,
        };

        let pool = open_pool(cfg)?;
        let (store, audit) = pool.collaborators();

        // the window is a time of day; anchor it on each record's shift
        let mut resolutions = HashMap::new();
        for id in ids {
            let tc = store.get_timecard(*id)?.ok_or(AppError::NotFound(*id))?;
            let resolution = match window {
                Some((start, end)) => {
                    let (start, end) = place_break_window(tc.date, tc.check_in_time, start, end);
                    BreakResolution::Interval { start, end }
                }
                None => BreakResolution::NoBreak,
            };
            resolutions.insert(*id, resolution);
        }

        let mut svc = TimecardService::new(store, audit, cfg.grace_default());
        let updates = svc.resolve_breaks(&resolutions, actor)?;

        let applied = updates.iter().filter(|u| u.is_valid).count();
        ttlog(
            &pool.conn,
            "resolve",
            &ids
                .iter()
                .map(|i| format!("#{}", i))
                .collect::<Vec<_>>()
                .join(","),
            &format!("{} of {} break resolutions applied", applied, updates.len()),
        )?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&updates)?);
            return Ok(());
        }

        for u in &updates {
            if u.is_valid {
                success(format!(
                    "Timecard #{}: break {} min, {} h, pay {:.2}",
                    u.id,
                    u.break_duration,
                    format_hours(u.total_hours),
                    u.total_pay
                ));
            } else {
                warning(format!("Timecard #{} not updated:", u.id));
                for e in &u.validation_errors {
                    bullet(e);
                }
            }
        }
    }
    Ok(())
}
