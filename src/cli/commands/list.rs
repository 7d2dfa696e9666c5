use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::TimecardService;
use crate::core::ports::TimecardFilter;
use crate::errors::{AppError, AppResult};
use crate::models::timecard::{TimecardDay, TimecardStatus};
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_status, colorize_optional};
use crate::utils::date;
use crate::utils::formatting::{bold, mins2readable, money};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_hours;

use super::open_pool;

/// Build a filter from the common CLI options.
pub(crate) fn build_filter(
    user: &Option<String>,
    project: &Option<String>,
    status: &Option<String>,
    period: &Option<String>,
) -> AppResult<TimecardFilter> {
    let status = match status {
        Some(s) => Some(
            TimecardStatus::from_db_str(&s.to_lowercase())
                .ok_or_else(|| AppError::InvalidStatus(s.clone()))?,
        ),
        None => None,
    };

    let (from, to) = match period {
        Some(p) => {
            let (f, t) = date::period_bounds(p).map_err(AppError::InvalidDate)?;
            (Some(f), Some(t))
        }
        None => (None, None),
    };

    Ok(TimecardFilter {
        user_id: user.clone(),
        project_id: project.clone(),
        status,
        from,
        to,
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        user,
        project,
        status,
        period,
    } = cmd
    {
        let filter = build_filter(user, project, status, period)?;

        let pool = open_pool(cfg)?;
        let (store, audit) = pool.collaborators();
        let svc = TimecardService::new(store, audit, cfg.grace_default());

        let timecards = svc.list(&filter)?;
        if timecards.is_empty() {
            info("No timecards found.");
            return Ok(());
        }

        print_timecards(&timecards, cfg);
    }
    Ok(())
}

fn print_timecards(timecards: &[TimecardDay], cfg: &Config) {
    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("DATE", 10),
        Column::new("USER", 12),
        Column::new("PROJECT", 10),
        Column::new("IN", 5),
        Column::new("OUT", 5),
        Column::new("BREAK", 11),
        Column::new("HOURS", 6),
        Column::new("PAY", 12),
        Column::new("STATUS", 10),
    ]);

    let mut total_minutes = 0i64;
    let mut total_pay = 0.0;

    for tc in timecards {
        total_minutes += (tc.total_hours * 60.0).round() as i64;
        total_pay += tc.total_pay;

        let hours = if tc.manually_edited {
            format!("{}*", format_hours(tc.total_hours))
        } else {
            format_hours(tc.total_hours)
        };

        table.add_row(vec![
            tc.id.to_string(),
            tc.date_str(),
            tc.user_id.clone(),
            tc.project_id.clone(),
            colorize_optional(&tc.check_in_str()),
            colorize_optional(&tc.check_out_str()),
            colorize_optional(&tc.break_str()),
            hours,
            format!("{:.2}", tc.total_pay),
            format!("{}{}{}", color_for_status(tc.status), tc.status, RESET),
        ]);
    }

    print!("{}", table.render(&cfg.separator_char));
    println!();
    println!(
        "{} {} worked, {} total pay ({} timecard(s); * = manually edited)",
        bold("Total:"),
        mins2readable(total_minutes, false, false),
        money(total_pay, &cfg.currency),
        timecards.len()
    );
}
