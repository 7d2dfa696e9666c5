use crate::utils::time::{IntervalError, duration_minutes};
use chrono::NaiveDateTime;

/// Breaks within this many minutes of the standard length count as exactly
/// the standard length.
// TODO: confirm with product whether this should become a per-project setting.
pub const BREAK_GRACE_TOLERANCE_MINUTES: i64 = 5;

/// Effective break length after absorbing clock-rounding noise around the
/// standard break (e.g. 28 or 32 minutes against a 30 minute default).
pub fn apply_break_grace_period(
    break_start: NaiveDateTime,
    break_end: NaiveDateTime,
    default_minutes: i64,
) -> Result<i64, IntervalError> {
    let observed = duration_minutes(break_start, break_end)?;

    if (observed - default_minutes).abs() <= BREAK_GRACE_TOLERANCE_MINUTES {
        Ok(default_minutes)
    } else {
        Ok(observed)
    }
}
