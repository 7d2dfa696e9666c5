use crate::core::calculator::grace::apply_break_grace_period;
use crate::errors::{AppError, AppResult};
use crate::models::calculation::{
    CalculationResult, TimecardInput, ValidationError, ValidationKind,
};
use crate::models::timecard::TimecardDay;
use crate::utils::time::{contains, duration_minutes, minutes_to_hours};
use tracing::debug;

/// Turn one day's raw timestamps into worked hours, break minutes and pay.
///
/// Never fails: problems in the input are reported through
/// `validation_errors` and `is_valid`. When the shift itself is unusable
/// (missing or inverted check-in/out) every total is zero. Break problems
/// only get flagged and the day is computed with no break.
pub fn calculate_timecard(data: &TimecardInput) -> CalculationResult {
    let (check_in, check_out) = match (data.check_in_time, data.check_out_time) {
        (Some(i), Some(o)) => (i, o),
        _ => {
            return CalculationResult::invalid(
                data.manually_edited,
                ValidationKind::MissingTime.into(),
            );
        }
    };

    // zero-length shifts are as unusable as inverted ones
    let gross = match duration_minutes(check_in, check_out) {
        Ok(m) if check_out > check_in => m,
        _ => {
            return CalculationResult::invalid(
                data.manually_edited,
                ValidationKind::InvalidShift.into(),
            );
        }
    };

    let mut errors: Vec<ValidationError> = Vec::new();

    let break_minutes = match (data.break_start_time, data.break_end_time) {
        (Some(bs), Some(be)) => {
            if be <= bs {
                errors.push(ValidationKind::InvalidBreak.into());
                0
            } else if !contains(check_in, check_out, bs, be) {
                errors.push(ValidationKind::BreakOutsideShift.into());
                0
            } else {
                let observed = match data.default_break_minutes {
                    Some(default) => apply_break_grace_period(bs, be, default),
                    None => duration_minutes(bs, be),
                };
                observed.unwrap_or_default()
            }
        }
        (None, None) => 0,
        _ => {
            errors.push(ValidationKind::IncompleteBreak.into());
            0
        }
    };

    let net = (gross - break_minutes).max(0);
    let total_hours = minutes_to_hours(net);
    let total_pay = total_hours * data.pay_rate;

    debug!(
        gross,
        break_minutes,
        net,
        errors = errors.len(),
        "timecard calculated"
    );

    CalculationResult {
        total_hours,
        break_duration: break_minutes,
        total_pay,
        manually_edited: data.manually_edited,
        is_valid: errors.is_empty(),
        validation_errors: errors,
    }
}

/// Recalculate a stored record. Only drafts may be recalculated.
pub fn recalculate(
    day: &TimecardDay,
    default_break_minutes: Option<i64>,
) -> AppResult<CalculationResult> {
    if !day.status.is_draft() {
        return Err(AppError::Immutable {
            id: day.id,
            status: day.status,
        });
    }
    Ok(calculate_timecard(&TimecardInput::from_day(
        day,
        default_break_minutes,
    )))
}
