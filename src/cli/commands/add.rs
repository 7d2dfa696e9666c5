use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::TimecardService;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::timecard::TimecardDay;
use crate::utils::date;
use crate::utils::time::parse_optional_timestamp;

use super::{open_pool, print_calculation};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date: date_str,
        user,
        project,
        check_in,
        check_out,
        break_start,
        break_end,
        rate,
    } = cmd
    {
        let d = date::parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.into()))?;
        if !rate.is_finite() || *rate < 0.0 {
            return Err(AppError::InvalidAmount(rate.to_string()));
        }

        let day = TimecardDay::new_draft(user.as_str(), project.as_str(), d, *rate)
            .with_shift(
                parse_optional_timestamp(d, check_in.as_ref())?,
                parse_optional_timestamp(d, check_out.as_ref())?,
            )
            .with_break(
                parse_optional_timestamp(d, break_start.as_ref())?,
                parse_optional_timestamp(d, break_end.as_ref())?,
            );

        let pool = open_pool(cfg)?;
        let (store, audit) = pool.collaborators();
        let mut svc = TimecardService::new(store, audit, cfg.grace_default());

        let (saved, result) = svc.create(day)?;

        ttlog(
            &pool.conn,
            "add",
            &format!("#{}", saved.id),
            &format!(
                "user={} project={} date={} in={} out={} break={}",
                saved.user_id,
                saved.project_id,
                saved.date_str(),
                saved.check_in_str(),
                saved.check_out_str(),
                saved.break_str()
            ),
        )?;

        print_calculation(saved.id, &result, &cfg.currency);
    }
    Ok(())
}
