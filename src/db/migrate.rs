use rusqlite::{Connection, OptionalExtension, Result};
use tracing::info;

/// Ordered schema steps. A step runs once and is recorded by version name
/// in `schema_migrations`.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "20250301_0001_create_log",
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    ),
    (
        "20250301_0002_create_projects",
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL DEFAULT '',
            start_date  TEXT
        );
        "#,
    ),
    (
        "20250301_0003_create_timecards",
        r#"
        CREATE TABLE IF NOT EXISTS timecards (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           TEXT NOT NULL,
            project_id        TEXT NOT NULL,
            date              TEXT NOT NULL,
            check_in_time     TEXT,
            check_out_time    TEXT,
            break_start_time  TEXT,
            break_end_time    TEXT,
            pay_rate          REAL NOT NULL DEFAULT 0 CHECK(pay_rate >= 0),
            status            TEXT NOT NULL DEFAULT 'draft'
                              CHECK(status IN ('draft','submitted','approved','rejected')),
            manually_edited   INTEGER NOT NULL DEFAULT 0,
            total_hours       REAL NOT NULL DEFAULT 0 CHECK(total_hours >= 0),
            break_duration    INTEGER NOT NULL DEFAULT 0 CHECK(break_duration >= 0),
            total_pay         REAL NOT NULL DEFAULT 0,
            created_at        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_timecards_user_project ON timecards(user_id, project_id);
        CREATE INDEX IF NOT EXISTS idx_timecards_date ON timecards(date);
        "#,
    ),
    (
        "20250301_0004_create_audit_log",
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            timecard_id  INTEGER NOT NULL,
            field        TEXT NOT NULL,
            old_value    TEXT NOT NULL DEFAULT '',
            new_value    TEXT NOT NULL DEFAULT '',
            actor        TEXT NOT NULL,
            action       TEXT NOT NULL
                         CHECK(action IN ('user_edit','admin_edit','status_change','recalculation')),
            changed_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_audit_log_timecard ON audit_log(timecard_id);
        "#,
    ),
    (
        "20250412_0005_add_admin_notes",
        r#"
        ALTER TABLE timecards ADD COLUMN admin_notes TEXT NOT NULL DEFAULT '';
        "#,
    ),
    (
        "20250520_0006_add_break_waived",
        r#"
        ALTER TABLE timecards ADD COLUMN break_waived INTEGER NOT NULL DEFAULT 0;
        "#,
    ),
];

fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version     TEXT PRIMARY KEY,
            applied_at  TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare_cached("SELECT 1 FROM schema_migrations WHERE version = ?1")?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Apply every migration not yet recorded. Returns the versions applied now.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_migrations_table(conn)?;

    let mut applied = Vec::new();

    for (version, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            [*version, chrono::Local::now().to_rfc3339().as_str()],
        )?;
        tx.commit()?;

        info!(version, "migration applied");
        applied.push(*version);
    }

    Ok(applied)
}
