use chrono::NaiveDate;

use crate::models::outcome::ValidationOutcome;
use crate::models::timecard::TimecardDay;
use crate::utils::date::today;

/// Days longer than this many hours must record a break, or be confirmed
/// as worked through.
// TODO: confirm with product whether this should become a per-project setting.
pub const MISSING_BREAK_HOURS_THRESHOLD: f64 = 6.0;

pub const SHOW_DAY_NOT_STARTED: &str =
    "Timecard submission is not available until show day begins";

/// Decide whether a batch of drafts can move to `submitted`, using the
/// local calendar date as "now".
pub fn validate_submission(
    timecards: &[TimecardDay],
    project_start_date: Option<NaiveDate>,
) -> ValidationOutcome {
    validate_submission_on(timecards, project_start_date, today())
}

/// Same as [`validate_submission`] with an explicit current date.
pub fn validate_submission_on(
    timecards: &[TimecardDay],
    project_start_date: Option<NaiveDate>,
    today: NaiveDate,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    if project_start_date.is_some_and(|start| start > today) {
        outcome.reject(SHOW_DAY_NOT_STARTED);
    }

    outcome.missing_breaks = timecards
        .iter()
        .filter(|tc| tc.status.is_draft())
        .filter(|tc| is_missing_break(tc))
        .map(|tc| tc.id)
        .collect();

    if !outcome.missing_breaks.is_empty() {
        outcome.reject(format!(
            "{} timecard(s) missing break information",
            outcome.missing_breaks.len()
        ));
    }

    outcome
}

fn is_missing_break(tc: &TimecardDay) -> bool {
    tc.total_hours > MISSING_BREAK_HOURS_THRESHOLD
        && tc.break_duration == 0
        && !tc.has_break_timestamps()
        && !tc.break_waived
}
