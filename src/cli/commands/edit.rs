use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{ManualEdit, TimecardService};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::ui::messages::{info, success};
use crate::utils::formatting::money;
use crate::utils::time::format_hours;

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        role,
        actor,
        hours,
        pay,
        notes,
    } = cmd
    {
        let role = Role::from_code(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;
        let edit = ManualEdit {
            total_hours: *hours,
            total_pay: *pay,
            admin_notes: notes.clone(),
        };

        if edit.is_empty() {
            info("Nothing to change: use --hours, --pay or --notes.");
            return Ok(());
        }

        let pool = open_pool(cfg)?;
        let (store, audit) = pool.collaborators();
        let mut svc = TimecardService::new(store, audit, cfg.grace_default());

        let day = svc.manual_edit(*id, &edit, actor, role)?;

        ttlog(
            &pool.conn,
            "edit",
            &format!("#{}", id),
            &format!(
                "by {} ({}): hours={:.2} pay={:.2}",
                actor, role, day.total_hours, day.total_pay
            ),
        )?;

        success(format!(
            "Timecard #{} updated: {} h, pay {}{}",
            id,
            format_hours(day.total_hours),
            money(day.total_pay, &cfg.currency),
            if day.manually_edited {
                " (manually edited)"
            } else {
                ""
            }
        ));
    }
    Ok(())
}
