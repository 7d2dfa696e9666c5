use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::TimecardService;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{bullet, info, success, warning};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit {
        user,
        project,
        actor,
        json,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let (store, audit) = pool.collaborators();
        let mut svc = TimecardService::new(store, audit, cfg.grace_default());

        let actor = actor.as_deref().unwrap_or(user);
        let (outcome, submitted) = svc.submit(user, project, actor)?;

        ttlog(
            &pool.conn,
            "submit",
            &format!("{}@{}", user, project),
            &if outcome.can_submit {
                format!("{} timecard(s) submitted", submitted.len())
            } else {
                format!("blocked: {}", outcome.errors.join("; "))
            },
        )?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else if !outcome.can_submit {
            warning("Submission blocked:");
            for e in &outcome.errors {
                bullet(e);
            }
            if !outcome.missing_breaks.is_empty() {
                let ids: Vec<String> = outcome.missing_breaks.iter().map(i64::to_string).collect();
                info(format!(
                    "Resolve breaks with: rtimecard resolve {} --break HH:MM-HH:MM | --no-break",
                    ids.join(" ")
                ));
            }
        } else if submitted.is_empty() {
            info(format!("No draft timecards for {} on {}.", user, project));
        } else {
            success(format!(
                "{} timecard(s) submitted for {} on {}.",
                submitted.len(),
                user,
                project
            ));
        }

        if !outcome.can_submit {
            return Err(AppError::SubmissionBlocked(outcome.errors.join("; ")));
        }
    }
    Ok(())
}
