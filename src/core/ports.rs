//! Collaborator boundaries of the engine: where records come from and
//! where auditable changes go. Implementations are passed in explicitly.

use chrono::NaiveDate;

use crate::errors::AppResult;
use crate::models::audit::AuditEntry;
use crate::models::project::Project;
use crate::models::timecard::{TimecardDay, TimecardStatus};

/// Selection criteria for listing timecards. Empty filter = everything.
#[derive(Debug, Clone, Default)]
pub struct TimecardFilter {
    pub user_id: Option<String>,
    pub project_id: Option<String>,
    pub status: Option<TimecardStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TimecardFilter {
    pub fn drafts_for(user_id: &str, project_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            project_id: Some(project_id.to_string()),
            status: Some(TimecardStatus::Draft),
            ..Self::default()
        }
    }

    pub fn matches(&self, tc: &TimecardDay) -> bool {
        self.user_id.as_ref().is_none_or(|u| *u == tc.user_id)
            && self.project_id.as_ref().is_none_or(|p| *p == tc.project_id)
            && self.status.is_none_or(|s| s == tc.status)
            && self.from.is_none_or(|d| tc.date >= d)
            && self.to.is_none_or(|d| tc.date <= d)
    }
}

pub trait RecordStore {
    fn get_timecard(&self, id: i64) -> AppResult<Option<TimecardDay>>;

    /// Ordered by date, then id.
    fn list_timecards(&self, filter: &TimecardFilter) -> AppResult<Vec<TimecardDay>>;

    /// Returns the new record id.
    fn insert_timecard(&mut self, tc: &TimecardDay) -> AppResult<i64>;

    fn update_timecard(&mut self, tc: &TimecardDay) -> AppResult<()>;

    /// All-or-nothing update of several records.
    fn update_timecards(&mut self, tcs: &[TimecardDay]) -> AppResult<()>;

    fn get_project(&self, id: &str) -> AppResult<Option<Project>>;

    fn upsert_project(&mut self, project: &Project) -> AppResult<()>;
}

/// Append-only log of field-level changes.
pub trait AuditRecorder {
    fn record(&mut self, entry: &AuditEntry) -> AppResult<()>;

    fn entries_for(&self, timecard_id: i64) -> AppResult<Vec<AuditEntry>>;
}
