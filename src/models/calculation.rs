use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use crate::models::timecard::TimecardDay;

/// Raw time data for one day, as handed to the calculation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TimecardInput {
    pub check_in_time: Option<NaiveDateTime>,
    pub check_out_time: Option<NaiveDateTime>,
    pub break_start_time: Option<NaiveDateTime>,
    pub break_end_time: Option<NaiveDateTime>,
    pub pay_rate: f64,
    pub manually_edited: bool,
    /// Standard break length. `Some` enables grace-period snapping.
    pub default_break_minutes: Option<i64>,
}

impl TimecardInput {
    pub fn from_day(day: &TimecardDay, default_break_minutes: Option<i64>) -> Self {
        Self {
            check_in_time: day.check_in_time,
            check_out_time: day.check_out_time,
            break_start_time: day.break_start_time,
            break_end_time: day.break_end_time,
            pay_rate: day.pay_rate,
            manually_edited: day.manually_edited,
            default_break_minutes,
        }
    }
}

/// Closed set of problems the engine can detect in a day's raw data.
///
/// `MissingTime` and `InvalidShift` both mean the check-in/check-out pair
/// cannot delimit a shift and both zero the totals; the second is used when
/// both times are present but out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    MissingTime,
    InvalidShift,
    IncompleteBreak,
    InvalidBreak,
    BreakOutsideShift,
}

impl ValidationKind {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationKind::MissingTime => "Missing check-in or check-out time",
            ValidationKind::InvalidShift => {
                "Invalid check-in or check-out time: check-out must be after check-in"
            }
            ValidationKind::IncompleteBreak => "Incomplete break information",
            ValidationKind::InvalidBreak => "Break end must be after break start",
            ValidationKind::BreakOutsideShift => "Break must fall within the shift",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub message: String,
}

impl From<ValidationKind> for ValidationError {
    fn from(kind: ValidationKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub total_hours: f64,
    pub break_duration: i64,
    pub total_pay: f64,
    pub manually_edited: bool,
    pub is_valid: bool,
    pub validation_errors: Vec<ValidationError>,
}

impl CalculationResult {
    pub fn invalid(manually_edited: bool, error: ValidationError) -> Self {
        Self {
            total_hours: 0.0,
            break_duration: 0,
            total_pay: 0.0,
            manually_edited,
            is_valid: false,
            validation_errors: vec![error],
        }
    }

    pub fn has_error(&self, kind: ValidationKind) -> bool {
        self.validation_errors.iter().any(|e| e.kind == kind)
    }

    pub fn error_summary(&self) -> String {
        self.validation_errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Write the derived totals back onto the record.
    pub fn apply_to(&self, day: &mut TimecardDay) {
        day.total_hours = self.total_hours;
        day.break_duration = self.break_duration;
        day.total_pay = self.total_pay;
    }
}
