use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::time::format_timestamp;

/// Lifecycle state of a timecard. Only `Draft` records are touched by the
/// calculation engine; the other states are owned by the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimecardStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl TimecardStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TimecardStatus::Draft => "draft",
            TimecardStatus::Submitted => "submitted",
            TimecardStatus::Approved => "approved",
            TimecardStatus::Rejected => "rejected",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(TimecardStatus::Draft),
            "submitted" => Some(TimecardStatus::Submitted),
            "approved" => Some(TimecardStatus::Approved),
            "rejected" => Some(TimecardStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, TimecardStatus::Draft)
    }
}

impl fmt::Display for TimecardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// One worker's time record for a single calendar day on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimecardDay {
    pub id: i64,                                  // ⇔ timecards.id (0 = not stored yet)
    pub user_id: String,                          // ⇔ timecards.user_id
    pub project_id: String,                       // ⇔ timecards.project_id
    pub date: NaiveDate,                          // ⇔ timecards.date (TEXT "YYYY-MM-DD")
    pub check_in_time: Option<NaiveDateTime>,     // ⇔ timecards.check_in_time
    pub check_out_time: Option<NaiveDateTime>,    // ⇔ timecards.check_out_time
    pub break_start_time: Option<NaiveDateTime>,  // ⇔ timecards.break_start_time
    pub break_end_time: Option<NaiveDateTime>,    // ⇔ timecards.break_end_time
    pub pay_rate: f64,                            // ⇔ timecards.pay_rate (per hour)
    pub status: TimecardStatus,                   // ⇔ timecards.status
    pub manually_edited: bool,                    // ⇔ timecards.manually_edited (0/1)
    pub break_waived: bool,                       // ⇔ timecards.break_waived (0/1)

    pub total_hours: f64,    // derived
    pub break_duration: i64, // derived, minutes
    pub total_pay: f64,      // derived

    pub admin_notes: String,
    pub created_at: String, // ISO8601
}

impl TimecardDay {
    /// New draft record as produced by a clock-in/out workflow.
    /// Derived totals start at zero until the engine computes them.
    pub fn new_draft(
        user_id: impl Into<String>,
        project_id: impl Into<String>,
        date: NaiveDate,
        pay_rate: f64,
    ) -> Self {
        Self {
            id: 0,
            user_id: user_id.into(),
            project_id: project_id.into(),
            date,
            check_in_time: None,
            check_out_time: None,
            break_start_time: None,
            break_end_time: None,
            pay_rate,
            status: TimecardStatus::Draft,
            manually_edited: false,
            break_waived: false,
            total_hours: 0.0,
            break_duration: 0,
            total_pay: 0.0,
            admin_notes: String::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn with_shift(
        mut self,
        check_in: Option<NaiveDateTime>,
        check_out: Option<NaiveDateTime>,
    ) -> Self {
        self.check_in_time = check_in;
        self.check_out_time = check_out;
        self
    }

    pub fn with_break(mut self, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        self.break_start_time = start;
        self.break_end_time = end;
        self
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn has_break_timestamps(&self) -> bool {
        self.break_start_time.is_some() || self.break_end_time.is_some()
    }

    pub fn check_in_str(&self) -> String {
        self.check_in_time
            .map(|t| format_timestamp(self.date, t))
            .unwrap_or_else(|| "--:--".into())
    }

    pub fn check_out_str(&self) -> String {
        self.check_out_time
            .map(|t| format_timestamp(self.date, t))
            .unwrap_or_else(|| "--:--".into())
    }

    pub fn break_str(&self) -> String {
        match (self.break_start_time, self.break_end_time) {
            (Some(s), Some(e)) => format!("{}-{}", s.format("%H:%M"), e.format("%H:%M")),
            (Some(s), None) => format!("{}-?", s.format("%H:%M")),
            (None, Some(e)) => format!("?-{}", e.format("%H:%M")),
            (None, None) if self.break_waived => "none".into(),
            (None, None) => "--".into(),
        }
    }
}
