use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::calculation::ValidationError;

/// Caller's decision for a timecard whose break is missing or ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakResolution {
    Interval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Worked through, no break taken.
    NoBreak,
}

impl BreakResolution {
    pub fn bounds(&self) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        match *self {
            BreakResolution::Interval { start, end } => (Some(start), Some(end)),
            BreakResolution::NoBreak => (None, None),
        }
    }

    /// The record is confirmed to have no break, as opposed to one not yet
    /// reported.
    pub fn waives_break(&self) -> bool {
        matches!(self, BreakResolution::NoBreak)
    }
}

/// Recomputed values for one resolved timecard, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakUpdate {
    pub id: i64,
    pub break_duration: i64,
    pub total_hours: f64,
    pub total_pay: f64,
    pub break_start_time: Option<NaiveDateTime>,
    pub break_end_time: Option<NaiveDateTime>,
    pub break_waived: bool,
    pub is_valid: bool,
    pub validation_errors: Vec<ValidationError>,
}
