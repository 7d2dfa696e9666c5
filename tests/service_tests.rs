mod common;
use common::{approx, at, day, draft};

use rtimecard::core::logic::{ManualEdit, TimecardService};
use rtimecard::core::ports::{AuditRecorder, RecordStore, TimecardFilter};
use rtimecard::db::initialize::init_db;
use rtimecard::db::pool::DbPool;
use rtimecard::errors::{AppError, AppResult};
use rtimecard::models::audit::{AuditAction, AuditEntry};
use rtimecard::models::project::Project;
use rtimecard::models::resolution::BreakResolution;
use rtimecard::models::role::Role;
use rtimecard::models::timecard::{TimecardDay, TimecardStatus};
use std::collections::HashMap;

fn pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("migrate");
    pool
}

#[test]
fn test_migrations_run_once() {
    let pool = DbPool::in_memory().unwrap();
    let first = init_db(&pool.conn).unwrap();
    let second = init_db(&pool.conn).unwrap();
    assert!(!first.is_empty());
    assert!(second.is_empty());
}

#[test]
fn test_create_stores_computed_totals() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30));

    let (saved, result) = svc
        .create(draft(0, "09:00", "17:00", Some(("12:00", "12:30")), 25.0))
        .unwrap();

    assert!(saved.id > 0);
    assert!(result.is_valid);

    let loaded = svc.store().get_timecard(saved.id).unwrap().unwrap();
    assert_eq!(loaded.status, TimecardStatus::Draft);
    assert!(approx(loaded.total_hours, 7.5));
    assert_eq!(loaded.break_duration, 30);
    assert!(approx(loaded.total_pay, 187.5));
    assert_eq!(loaded.break_start_time, Some(at("12:00")));
}

#[test]
fn test_create_invalid_keeps_zero_totals() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30));

    let tc = TimecardDay::new_draft("talent-1", "proj-1", day(2025, 9, 1), 25.0)
        .with_shift(Some(at("09:00")), None);
    let (saved, result) = svc.create(tc).unwrap();

    assert!(!result.is_valid);
    let loaded = svc.store().get_timecard(saved.id).unwrap().unwrap();
    assert_eq!(loaded.total_hours, 0.0);
    assert_eq!(loaded.check_out_time, None);
}

#[test]
fn test_recalculate_applies_and_audits_changes() {
    let pool = pool();
    let (mut store, audit) = pool.collaborators();

    // stored with stale totals
    let mut tc = draft(0, "09:00", "17:00", Some(("12:00", "12:30")), 20.0);
    tc.total_hours = 1.0;
    let id = store.insert_timecard(&tc).unwrap();

    let mut svc = TimecardService::new(store, audit, Some(30));
    let result = svc.recalculate(id, "payroll").unwrap();
    assert!(result.is_valid);

    let loaded = svc.store().get_timecard(id).unwrap().unwrap();
    assert!(approx(loaded.total_hours, 7.5));
    assert!(approx(loaded.total_pay, 150.0));

    let history = svc.history(id).unwrap();
    assert!(history.iter().all(|e| e.action == AuditAction::Recalculation));
    assert!(history.iter().any(|e| e.field == "total_hours" && e.new_value == "7.5"));

    // nothing changes the second time
    svc.recalculate(id, "payroll").unwrap();
    assert_eq!(svc.history(id).unwrap().len(), history.len());
}

#[test]
fn test_recalculate_unknown_and_submitted() {
    let pool = pool();
    let (mut store, audit) = pool.collaborators();
    let mut tc = draft(0, "09:00", "17:00", None, 20.0);
    tc.status = TimecardStatus::Submitted;
    let id = store.insert_timecard(&tc).unwrap();

    let mut svc = TimecardService::new(store, audit, Some(30));
    assert!(matches!(svc.recalculate(999, "x"), Err(AppError::NotFound(999))));
    assert!(matches!(
        svc.recalculate(id, "x"),
        Err(AppError::Immutable { .. })
    ));
}

#[test]
fn test_resolve_then_submit_flow() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30)).with_today(day(2025, 9, 5));

    svc.save_project(&Project {
        id: "proj-1".into(),
        name: "Pilot".into(),
        start_date: Some(day(2025, 9, 1)),
    })
    .unwrap();

    let (a, _) = svc.create(draft(0, "09:00", "17:00", None, 25.0)).unwrap();
    let (b, _) = svc
        .create(draft(0, "08:00", "16:00", Some(("12:00", "12:30")), 25.0))
        .unwrap();

    let (blocked, submitted) = svc.submit("talent-1", "proj-1", "talent-1").unwrap();
    assert!(!blocked.can_submit);
    assert!(submitted.is_empty());
    assert_eq!(blocked.missing_breaks.iter().copied().collect::<Vec<_>>(), vec![a.id]);

    let resolutions = HashMap::from([(
        a.id,
        BreakResolution::Interval {
            start: at("13:00"),
            end: at("13:29"),
        },
    )]);
    let updates = svc.resolve_breaks(&resolutions, "talent-1").unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].break_duration, 30);

    let (ok, submitted) = svc.submit("talent-1", "proj-1", "talent-1").unwrap();
    assert!(ok.can_submit);
    assert_eq!(submitted.len(), 2);

    for id in [a.id, b.id] {
        let tc = svc.store().get_timecard(id).unwrap().unwrap();
        assert_eq!(tc.status, TimecardStatus::Submitted);
        let history = svc.history(id).unwrap();
        assert!(history.iter().any(|e| e.action == AuditAction::StatusChange
            && e.old_value == "draft"
            && e.new_value == "submitted"));
    }

    let history_a = svc.history(a.id).unwrap();
    assert!(history_a.iter().any(|e| e.field == "break" && e.action == AuditAction::UserEdit));

    // nothing left to submit, resolving a submitted record is refused
    let (again, none) = svc.submit("talent-1", "proj-1", "talent-1").unwrap();
    assert!(again.can_submit);
    assert!(none.is_empty());
    assert!(matches!(
        svc.resolve_breaks(&HashMap::from([(a.id, BreakResolution::NoBreak)]), "x"),
        Err(AppError::Immutable { .. })
    ));
}

#[test]
fn test_worked_through_resolution_unblocks_submit() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30)).with_today(day(2025, 9, 5));

    let (tc, _) = svc.create(draft(0, "09:00", "17:00", None, 25.0)).unwrap();

    let (blocked, _) = svc.submit("talent-1", "proj-1", "talent-1").unwrap();
    assert!(blocked.missing_breaks.contains(&tc.id));

    let updates = svc
        .resolve_breaks(&HashMap::from([(tc.id, BreakResolution::NoBreak)]), "talent-1")
        .unwrap();
    assert!(updates[0].is_valid);
    assert!(updates[0].break_waived);

    let loaded = svc.store().get_timecard(tc.id).unwrap().unwrap();
    assert!(loaded.break_waived);
    assert_eq!(loaded.break_duration, 0);
    assert!(approx(loaded.total_hours, 8.0));

    let (outcome, submitted) = svc.submit("talent-1", "proj-1", "talent-1").unwrap();
    assert!(outcome.can_submit);
    assert!(outcome.missing_breaks.is_empty());
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].id, tc.id);
}

#[test]
fn test_interval_resolution_clears_waiver() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30));

    let (tc, _) = svc.create(draft(0, "09:00", "17:00", None, 10.0)).unwrap();
    svc.resolve_breaks(&HashMap::from([(tc.id, BreakResolution::NoBreak)]), "x")
        .unwrap();
    assert!(svc.store().get_timecard(tc.id).unwrap().unwrap().break_waived);

    svc.resolve_breaks(
        &HashMap::from([(
            tc.id,
            BreakResolution::Interval {
                start: at("12:00"),
                end: at("12:30"),
            },
        )]),
        "x",
    )
    .unwrap();

    let loaded = svc.store().get_timecard(tc.id).unwrap().unwrap();
    assert!(!loaded.break_waived);
    assert_eq!(loaded.break_duration, 30);
    assert_eq!(loaded.break_start_time, Some(at("12:00")));
}

#[test]
fn test_invalid_resolution_is_not_persisted() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30));

    let (tc, _) = svc.create(draft(0, "09:00", "17:00", None, 10.0)).unwrap();
    let updates = svc
        .resolve_breaks(
            &HashMap::from([(
                tc.id,
                BreakResolution::Interval {
                    start: at("17:30"),
                    end: at("18:00"),
                },
            )]),
            "x",
        )
        .unwrap();

    assert!(!updates[0].is_valid);
    let loaded = svc.store().get_timecard(tc.id).unwrap().unwrap();
    assert_eq!(loaded.break_start_time, None);
    assert!(approx(loaded.total_hours, 8.0));
    assert!(svc.history(tc.id).unwrap().is_empty());
}

#[test]
fn test_future_show_day_blocks_submission() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30)).with_today(day(2025, 8, 20));

    svc.save_project(&Project {
        id: "proj-1".into(),
        name: "Pilot".into(),
        start_date: Some(day(2025, 9, 1)),
    })
    .unwrap();
    let (tc, _) = svc
        .create(draft(0, "09:00", "17:00", Some(("12:00", "12:30")), 25.0))
        .unwrap();

    let (outcome, submitted) = svc.submit("talent-1", "proj-1", "talent-1").unwrap();
    assert!(!outcome.can_submit);
    assert!(submitted.is_empty());
    assert_eq!(
        outcome.errors,
        vec!["Timecard submission is not available until show day begins"]
    );
    let loaded = svc.store().get_timecard(tc.id).unwrap().unwrap();
    assert_eq!(loaded.status, TimecardStatus::Draft);
}

#[test]
fn test_manual_edit_permissions() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30)).with_today(day(2025, 9, 5));

    let (tc, _) = svc
        .create(draft(0, "09:00", "17:00", Some(("12:00", "12:30")), 20.0))
        .unwrap();

    // owner override on a draft
    let edited = svc
        .manual_edit(
            tc.id,
            &ManualEdit {
                total_hours: Some(8.0),
                ..Default::default()
            },
            "talent-1",
            Role::Talent,
        )
        .unwrap();
    assert!(edited.manually_edited);
    assert!(approx(edited.total_pay, 160.0));

    // notes need a privileged role
    let notes = ManualEdit {
        admin_notes: Some("checked with AD".into()),
        ..Default::default()
    };
    assert!(matches!(
        svc.manual_edit(tc.id, &notes, "talent-1", Role::Talent),
        Err(AppError::Forbidden(_))
    ));
    svc.manual_edit(tc.id, &notes, "coord", Role::InHouse).unwrap();

    // overridden totals survive a recalculation
    svc.recalculate(tc.id, "system").unwrap();
    let loaded = svc.store().get_timecard(tc.id).unwrap().unwrap();
    assert!(approx(loaded.total_hours, 8.0));
    assert_eq!(loaded.admin_notes, "checked with AD");

    let (_, submitted) = svc.submit("talent-1", "proj-1", "talent-1").unwrap();
    assert_eq!(submitted.len(), 1);

    let pay = ManualEdit {
        total_pay: Some(175.0),
        ..Default::default()
    };
    assert!(matches!(
        svc.manual_edit(tc.id, &pay, "talent-1", Role::Talent),
        Err(AppError::Forbidden(_))
    ));
    let after = svc.manual_edit(tc.id, &pay, "boss", Role::Admin).unwrap();
    assert!(approx(after.total_pay, 175.0));
    assert!(approx(after.total_hours, 8.0));

    let history = svc.history(tc.id).unwrap();
    assert!(history.iter().any(|e| e.action == AuditAction::UserEdit && e.field == "total_hours"));
    assert!(history.iter().any(|e| e.action == AuditAction::AdminEdit && e.field == "admin_notes"));
    assert!(history.iter().any(|e| e.action == AuditAction::AdminEdit
        && e.field == "total_pay"
        && e.actor == "boss"));
}

#[test]
fn test_talent_cannot_edit_someone_elses_draft() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30));
    let (tc, _) = svc.create(draft(0, "09:00", "17:00", None, 20.0)).unwrap();

    let edit = ManualEdit {
        total_hours: Some(10.0),
        ..Default::default()
    };
    assert!(matches!(
        svc.manual_edit(tc.id, &edit, "talent-2", Role::Talent),
        Err(AppError::Forbidden(_))
    ));
    let loaded = svc.store().get_timecard(tc.id).unwrap().unwrap();
    assert!(approx(loaded.total_hours, 8.0));
    assert!(!loaded.manually_edited);

    svc.manual_edit(tc.id, &edit, "coord", Role::InHouse).unwrap();
}

#[test]
fn test_manual_edit_rejects_negative_amounts() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30));
    let (tc, _) = svc.create(draft(0, "09:00", "17:00", None, 20.0)).unwrap();

    let edit = ManualEdit {
        total_hours: Some(-1.0),
        ..Default::default()
    };
    assert!(matches!(
        svc.manual_edit(tc.id, &edit, "x", Role::Admin),
        Err(AppError::InvalidAmount(_))
    ));
}

#[test]
fn test_list_filters() {
    let pool = pool();
    let (store, audit) = pool.collaborators();
    let mut svc = TimecardService::new(store, audit, Some(30));

    svc.create(draft(0, "09:00", "17:00", None, 20.0)).unwrap();
    let mut other = draft(0, "09:00", "17:00", None, 20.0);
    other.user_id = "talent-2".into();
    other.date = day(2025, 10, 2);
    other.check_in_time = Some(day(2025, 10, 2).and_hms_opt(9, 0, 0).unwrap());
    other.check_out_time = Some(day(2025, 10, 2).and_hms_opt(17, 0, 0).unwrap());
    svc.create(other).unwrap();

    assert_eq!(svc.list(&TimecardFilter::default()).unwrap().len(), 2);

    let by_user = TimecardFilter {
        user_id: Some("talent-2".into()),
        ..Default::default()
    };
    assert_eq!(svc.list(&by_user).unwrap().len(), 1);

    let september = TimecardFilter {
        from: Some(day(2025, 9, 1)),
        to: Some(day(2025, 9, 30)),
        ..Default::default()
    };
    let rows = svc.list(&september).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, "talent-1");
}

// ---------------------------------------------------------------
// In-memory collaborators: the service works with any store/audit
// ---------------------------------------------------------------

#[derive(Default)]
struct MemoryStore {
    rows: Vec<TimecardDay>,
    projects: Vec<Project>,
    fail_batch: bool,
}

impl RecordStore for MemoryStore {
    fn get_timecard(&self, id: i64) -> AppResult<Option<TimecardDay>> {
        Ok(self.rows.iter().find(|t| t.id == id).cloned())
    }

    fn list_timecards(&self, filter: &TimecardFilter) -> AppResult<Vec<TimecardDay>> {
        Ok(self.rows.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    fn insert_timecard(&mut self, tc: &TimecardDay) -> AppResult<i64> {
        let mut tc = tc.clone();
        tc.id = self.rows.len() as i64 + 1;
        self.rows.push(tc);
        Ok(self.rows.len() as i64)
    }

    fn update_timecard(&mut self, tc: &TimecardDay) -> AppResult<()> {
        let slot = self
            .rows
            .iter_mut()
            .find(|t| t.id == tc.id)
            .ok_or(AppError::NotFound(tc.id))?;
        *slot = tc.clone();
        Ok(())
    }

    fn update_timecards(&mut self, tcs: &[TimecardDay]) -> AppResult<()> {
        if self.fail_batch {
            return Err(AppError::Io(std::io::Error::other("store unavailable")));
        }
        for tc in tcs {
            self.update_timecard(tc)?;
        }
        Ok(())
    }

    fn get_project(&self, id: &str) -> AppResult<Option<Project>> {
        Ok(self.projects.iter().find(|p| p.id == id).cloned())
    }

    fn upsert_project(&mut self, project: &Project) -> AppResult<()> {
        self.projects.retain(|p| p.id != project.id);
        self.projects.push(project.clone());
        Ok(())
    }
}

#[derive(Default)]
struct MemoryAudit {
    entries: Vec<AuditEntry>,
}

impl AuditRecorder for MemoryAudit {
    fn record(&mut self, entry: &AuditEntry) -> AppResult<()> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn entries_for(&self, timecard_id: i64) -> AppResult<Vec<AuditEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.timecard_id == timecard_id)
            .cloned()
            .collect())
    }
}

#[test]
fn test_service_with_memory_collaborators() {
    let mut svc = TimecardService::new(MemoryStore::default(), MemoryAudit::default(), None)
        .with_today(day(2025, 9, 5));

    let (tc, result) = svc
        .create(draft(0, "09:00", "17:00", Some(("12:00", "12:32")), 25.0))
        .unwrap();
    // grace disabled: the observed 32 minutes count
    assert_eq!(result.break_duration, 32);

    let (outcome, submitted) = svc.submit("talent-1", "proj-1", "talent-1").unwrap();
    assert!(outcome.can_submit);
    assert_eq!(submitted.len(), 1);
    assert_eq!(svc.audit().entries.len(), 1);
    assert_eq!(
        svc.store().get_timecard(tc.id).unwrap().unwrap().status,
        TimecardStatus::Submitted
    );
}

#[test]
fn test_store_failure_surfaces_and_skips_audit() {
    let store = MemoryStore {
        fail_batch: true,
        ..Default::default()
    };
    let mut svc =
        TimecardService::new(store, MemoryAudit::default(), Some(30)).with_today(day(2025, 9, 5));

    svc.create(draft(0, "09:00", "17:00", Some(("12:00", "12:30")), 25.0))
        .unwrap();

    assert!(matches!(
        svc.submit("talent-1", "proj-1", "talent-1"),
        Err(AppError::Io(_))
    ));
    assert!(svc.audit().entries.is_empty());
    assert_eq!(
        svc.store().rows[0].status,
        TimecardStatus::Draft
    );
}
