use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::core::calculator::{calculate_timecard, recalculate};
use crate::core::ports::{AuditRecorder, RecordStore, TimecardFilter};
use crate::core::resolve::resolve_breaks;
use crate::core::submission::validate_submission_on;
use crate::errors::{AppError, AppResult};
use crate::models::audit::{AuditAction, AuditEntry};
use crate::models::calculation::{CalculationResult, TimecardInput};
use crate::models::outcome::ValidationOutcome;
use crate::models::project::Project;
use crate::models::resolution::{BreakResolution, BreakUpdate};
use crate::models::role::Role;
use crate::models::timecard::{TimecardDay, TimecardStatus};
use crate::utils::date;

/// Values a human wants to force onto a timecard.
#[derive(Debug, Clone, Default)]
pub struct ManualEdit {
    pub total_hours: Option<f64>,
    pub total_pay: Option<f64>,
    pub admin_notes: Option<String>,
}

impl ManualEdit {
    pub fn is_empty(&self) -> bool {
        self.total_hours.is_none() && self.total_pay.is_none() && self.admin_notes.is_none()
    }

    fn touches_totals(&self) -> bool {
        self.total_hours.is_some() || self.total_pay.is_some()
    }
}

/// Caller-side orchestration: fetch records, run the engine, persist the
/// outcome and record what changed.
pub struct TimecardService<S: RecordStore, A: AuditRecorder> {
    store: S,
    audit: A,
    default_break_minutes: Option<i64>,
    today: Option<NaiveDate>,
}

impl<S: RecordStore, A: AuditRecorder> TimecardService<S, A> {
    pub fn new(store: S, audit: A, default_break_minutes: Option<i64>) -> Self {
        Self {
            store,
            audit,
            default_break_minutes,
            today: None,
        }
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(date::today)
    }

    fn load(&self, id: i64) -> AppResult<TimecardDay> {
        self.store.get_timecard(id)?.ok_or(AppError::NotFound(id))
    }

    /// Store a new draft with its computed totals. Totals stay at zero when
    /// the raw data does not validate; the errors are returned either way.
    pub fn create(&mut self, mut day: TimecardDay) -> AppResult<(TimecardDay, CalculationResult)> {
        day.status = TimecardStatus::Draft;

        let result = calculate_timecard(&TimecardInput::from_day(
            &day,
            self.default_break_minutes,
        ));
        if result.is_valid {
            result.apply_to(&mut day);
        }

        day.id = self.store.insert_timecard(&day)?;
        info!(id = day.id, user = %day.user_id, project = %day.project_id, "timecard created");

        Ok((day, result))
    }

    /// Recompute a draft and persist the totals if they validate.
    /// Manually edited records keep their overridden totals.
    pub fn recalculate(&mut self, id: i64, actor: &str) -> AppResult<CalculationResult> {
        let mut day = self.load(id)?;
        let result = recalculate(&day, self.default_break_minutes)?;

        if !result.is_valid {
            debug!(id, errors = %result.error_summary(), "recalculation not persisted");
            return Ok(result);
        }
        if day.manually_edited {
            warn!(id, "manually edited timecard, computed totals not applied");
            return Ok(result);
        }

        let before = day.clone();
        result.apply_to(&mut day);
        let entries = diff_totals(&before, &day, actor, AuditAction::Recalculation);

        if !entries.is_empty() {
            self.store.update_timecard(&day)?;
            self.record_all(&entries)?;
        }

        Ok(result)
    }

    /// Apply break decisions to several drafts. Valid updates are persisted
    /// together; invalid ones are only reported.
    pub fn resolve_breaks(
        &mut self,
        resolutions: &HashMap<i64, BreakResolution>,
        actor: &str,
    ) -> AppResult<Vec<BreakUpdate>> {
        let mut ids: Vec<i64> = resolutions.keys().copied().collect();
        ids.sort_unstable();

        let mut timecards = Vec::with_capacity(ids.len());
        for id in ids {
            let tc = self.load(id)?;
            if !tc.status.is_draft() {
                return Err(AppError::Immutable {
                    id: tc.id,
                    status: tc.status,
                });
            }
            timecards.push(tc);
        }

        let updates = resolve_breaks(&timecards, resolutions, self.default_break_minutes);

        let mut changed = Vec::new();
        let mut entries = Vec::new();
        for (tc, upd) in timecards.iter().zip(&updates) {
            if !upd.is_valid {
                continue;
            }
            let mut after = tc.clone();
            after.break_start_time = upd.break_start_time;
            after.break_end_time = upd.break_end_time;
            after.break_waived = upd.break_waived;
            after.break_duration = upd.break_duration;
            after.total_hours = upd.total_hours;
            after.total_pay = upd.total_pay;

            entries.push(AuditEntry::new(
                tc.id,
                "break",
                tc.break_str(),
                after.break_str(),
                actor,
                AuditAction::UserEdit,
            ));
            entries.extend(diff_totals(tc, &after, actor, AuditAction::Recalculation));
            changed.push(after);
        }

        if !changed.is_empty() {
            self.store.update_timecards(&changed)?;
            self.record_all(&entries)?;
        }

        Ok(updates)
    }

    /// Validate the user's drafts on a project and, when allowed, move them
    /// all to `submitted`.
    pub fn submit(
        &mut self,
        user_id: &str,
        project_id: &str,
        actor: &str,
    ) -> AppResult<(ValidationOutcome, Vec<TimecardDay>)> {
        let drafts = self
            .store
            .list_timecards(&TimecardFilter::drafts_for(user_id, project_id))?;
        let start_date = self
            .store
            .get_project(project_id)?
            .and_then(|p| p.start_date);

        let outcome = validate_submission_on(&drafts, start_date, self.today());
        if !outcome.can_submit || drafts.is_empty() {
            debug!(user_id, project_id, errors = ?outcome.errors, "submission not applied");
            return Ok((outcome, Vec::new()));
        }

        let submitted: Vec<TimecardDay> = drafts
            .into_iter()
            .map(|mut tc| {
                tc.status = TimecardStatus::Submitted;
                tc
            })
            .collect();

        self.store.update_timecards(&submitted)?;

        let entries: Vec<AuditEntry> = submitted
            .iter()
            .map(|tc| {
                AuditEntry::new(
                    tc.id,
                    "status",
                    TimecardStatus::Draft,
                    TimecardStatus::Submitted,
                    actor,
                    AuditAction::StatusChange,
                )
            })
            .collect();
        self.record_all(&entries)?;

        info!(user_id, project_id, count = submitted.len(), "timecards submitted");
        Ok((outcome, submitted))
    }

    /// Human override of computed totals and/or admin notes.
    ///
    /// Owners may override their own drafts; anything past draft, and admin
    /// notes on any record, need a privileged role.
    pub fn manual_edit(
        &mut self,
        id: i64,
        edit: &ManualEdit,
        actor: &str,
        role: Role,
    ) -> AppResult<TimecardDay> {
        let mut day = self.load(id)?;

        if !day.status.is_draft() && !role.is_privileged() {
            return Err(AppError::Forbidden(format!(
                "role '{}' cannot edit a {} timecard",
                role, day.status
            )));
        }
        if !role.is_privileged() && actor != day.user_id {
            return Err(AppError::Forbidden(format!(
                "'{}' cannot edit a timecard owned by '{}'",
                actor, day.user_id
            )));
        }
        if edit.admin_notes.is_some() && !role.is_privileged() {
            return Err(AppError::Forbidden(format!(
                "role '{}' cannot write admin notes",
                role
            )));
        }
        for v in [edit.total_hours, edit.total_pay].into_iter().flatten() {
            if !v.is_finite() || v < 0.0 {
                return Err(AppError::InvalidAmount(v.to_string()));
            }
        }

        let before = day.clone();
        let action = AuditAction::for_edit_by(role);

        if let Some(h) = edit.total_hours {
            day.total_hours = h;
            if edit.total_pay.is_none() {
                day.total_pay = h * day.pay_rate;
            }
        }
        if let Some(p) = edit.total_pay {
            day.total_pay = p;
        }
        if let Some(notes) = &edit.admin_notes {
            day.admin_notes = notes.clone();
        }
        if edit.touches_totals() {
            day.manually_edited = true;
        }

        let mut entries = diff_totals(&before, &day, actor, action);
        if before.manually_edited != day.manually_edited {
            entries.push(AuditEntry::new(
                id,
                "manually_edited",
                before.manually_edited,
                day.manually_edited,
                actor,
                action,
            ));
        }
        if before.admin_notes != day.admin_notes {
            entries.push(AuditEntry::new(
                id,
                "admin_notes",
                &before.admin_notes,
                &day.admin_notes,
                actor,
                action,
            ));
        }

        if !entries.is_empty() {
            self.store.update_timecard(&day)?;
            self.record_all(&entries)?;
        }

        Ok(day)
    }

    pub fn list(&self, filter: &TimecardFilter) -> AppResult<Vec<TimecardDay>> {
        self.store.list_timecards(filter)
    }

    pub fn history(&self, id: i64) -> AppResult<Vec<AuditEntry>> {
        self.load(id)?;
        self.audit.entries_for(id)
    }

    pub fn save_project(&mut self, project: &Project) -> AppResult<()> {
        self.store.upsert_project(project)
    }

    fn record_all(&mut self, entries: &[AuditEntry]) -> AppResult<()> {
        for e in entries {
            self.audit.record(e)?;
        }
        Ok(())
    }
}

/// Audit entries for the derived fields that differ between two versions.
fn diff_totals(
    before: &TimecardDay,
    after: &TimecardDay,
    actor: &str,
    action: AuditAction,
) -> Vec<AuditEntry> {
    let mut out = Vec::new();

    if before.total_hours != after.total_hours {
        out.push(AuditEntry::new(
            after.id,
            "total_hours",
            before.total_hours,
            after.total_hours,
            actor,
            action,
        ));
    }
    if before.break_duration != after.break_duration {
        out.push(AuditEntry::new(
            after.id,
            "break_duration",
            before.break_duration,
            after.break_duration,
            actor,
            action,
        ));
    }
    if before.total_pay != after.total_pay {
        out.push(AuditEntry::new(
            after.id,
            "total_pay",
            before.total_pay,
            after.total_pay,
            actor,
            action,
        ));
    }

    out
}
