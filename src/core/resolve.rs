use std::collections::HashMap;

use crate::core::calculator::calculate_timecard;
use crate::models::calculation::TimecardInput;
use crate::models::resolution::{BreakResolution, BreakUpdate};
use crate::models::timecard::TimecardDay;
use tracing::debug;

/// Apply the caller's break decisions and recompute the affected drafts.
///
/// Only records present in `resolutions` are emitted, in the order they
/// appear in `timecards`. Records past draft are left alone. The same
/// inputs always produce the same updates, so a partially persisted batch
/// can simply be resolved again.
pub fn resolve_breaks(
    timecards: &[TimecardDay],
    resolutions: &HashMap<i64, BreakResolution>,
    default_break_minutes: Option<i64>,
) -> Vec<BreakUpdate> {
    timecards
        .iter()
        .filter(|tc| tc.status.is_draft())
        .filter_map(|tc| {
            let resolution = resolutions.get(&tc.id)?;
            let (break_start_time, break_end_time) = resolution.bounds();

            let input = TimecardInput {
                break_start_time,
                break_end_time,
                ..TimecardInput::from_day(tc, default_break_minutes)
            };
            let result = calculate_timecard(&input);

            debug!(id = tc.id, valid = result.is_valid, "break resolved");

            Some(BreakUpdate {
                id: tc.id,
                break_duration: result.break_duration,
                total_hours: result.total_hours,
                total_pay: result.total_pay,
                break_start_time,
                break_end_time,
                break_waived: resolution.waives_break(),
                is_valid: result.is_valid,
                validation_errors: result.validation_errors,
            })
        })
        .collect()
}
