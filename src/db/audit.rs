use crate::core::ports::AuditRecorder;
use crate::errors::{AppError, AppResult};
use crate::models::audit::{AuditAction, AuditEntry};
use rusqlite::{Connection, params};

/// Audit trail stored in the `audit_log` table.
pub struct SqliteAuditLog<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteAuditLog<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl AuditRecorder for SqliteAuditLog<'_> {
    fn record(&mut self, entry: &AuditEntry) -> AppResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO audit_log (timecard_id, field, old_value, new_value, actor, action, changed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        stmt.execute(params![
            entry.timecard_id,
            entry.field,
            entry.old_value,
            entry.new_value,
            entry.actor,
            entry.action.to_db_str(),
            entry.changed_at,
        ])?;

        Ok(())
    }

    fn entries_for(&self, timecard_id: i64) -> AppResult<Vec<AuditEntry>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT timecard_id, field, old_value, new_value, actor, action, changed_at
             FROM audit_log WHERE timecard_id = ?1 ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([timecard_id], |row| {
            let action: String = row.get(5)?;
            let action = AuditAction::from_db_str(&action).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(AppError::Corrupt(format!("unknown audit action '{action}'"))),
                )
            })?;

            Ok(AuditEntry {
                timecard_id: row.get(0)?,
                field: row.get(1)?,
                old_value: row.get(2)?,
                new_value: row.get(3)?,
                actor: row.get(4)?,
                action,
                changed_at: row.get(6)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}
