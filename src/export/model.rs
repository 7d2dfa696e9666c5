use serde::Serialize;

use crate::models::timecard::TimecardDay;
use crate::utils::time::to_db_timestamp;

/// Flat, serializable view of a timecard for export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub id: i64,
    pub user_id: String,
    pub project_id: String,
    pub date: String,
    pub check_in: String,
    pub check_out: String,
    pub break_start: String,
    pub break_end: String,
    pub break_minutes: i64,
    pub break_waived: bool,
    pub total_hours: f64,
    pub pay_rate: f64,
    pub total_pay: f64,
    pub status: String,
    pub manually_edited: bool,
}

impl From<&TimecardDay> for ExportRow {
    fn from(tc: &TimecardDay) -> Self {
        let ts = |t: Option<chrono::NaiveDateTime>| t.map(to_db_timestamp).unwrap_or_default();

        Self {
            id: tc.id,
            user_id: tc.user_id.clone(),
            project_id: tc.project_id.clone(),
            date: tc.date_str(),
            check_in: ts(tc.check_in_time),
            check_out: ts(tc.check_out_time),
            break_start: ts(tc.break_start_time),
            break_end: ts(tc.break_end_time),
            break_minutes: tc.break_duration,
            break_waived: tc.break_waived,
            total_hours: tc.total_hours,
            pay_rate: tc.pay_rate,
            total_pay: tc.total_pay,
            status: tc.status.to_db_str().to_string(),
            manually_edited: tc.manually_edited,
        }
    }
}
