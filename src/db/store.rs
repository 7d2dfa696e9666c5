use crate::core::ports::{RecordStore, TimecardFilter};
use crate::errors::{AppError, AppResult};
use crate::models::project::Project;
use crate::models::timecard::{TimecardDay, TimecardStatus};
use crate::utils::time::{from_db_timestamp, to_db_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_TIMECARD: &str = "SELECT id, user_id, project_id, date, check_in_time, check_out_time,
            break_start_time, break_end_time, pay_rate, status, manually_edited,
            break_waived, total_hours, break_duration, total_pay, admin_notes, created_at
     FROM timecards";

/// SQLite-backed record store. Borrows the connection so the audit log can
/// share it.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn opt_timestamp(row: &Row, col: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => from_db_timestamp(&s)
            .map(Some)
            .ok_or_else(|| conversion_error(0, AppError::InvalidTime(s))),
    }
}

pub fn map_row(row: &Row) -> Result<TimecardDay> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = TimecardStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidStatus(status_str.clone())))?;

    Ok(TimecardDay {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        project_id: row.get("project_id")?,
        date,
        check_in_time: opt_timestamp(row, "check_in_time")?,
        check_out_time: opt_timestamp(row, "check_out_time")?,
        break_start_time: opt_timestamp(row, "break_start_time")?,
        break_end_time: opt_timestamp(row, "break_end_time")?,
        pay_rate: row.get("pay_rate")?,
        status,
        manually_edited: row.get::<_, i64>("manually_edited")? != 0,
        break_waived: row.get::<_, i64>("break_waived")? != 0,
        total_hours: row.get("total_hours")?,
        break_duration: row.get("break_duration")?,
        total_pay: row.get("total_pay")?,
        admin_notes: row.get("admin_notes")?,
        created_at: row.get("created_at")?,
    })
}

fn update_one(conn: &Connection, tc: &TimecardDay) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE timecards SET
            check_in_time = ?1, check_out_time = ?2,
            break_start_time = ?3, break_end_time = ?4,
            pay_rate = ?5, status = ?6, manually_edited = ?7,
            total_hours = ?8, break_duration = ?9, total_pay = ?10,
            admin_notes = ?11, break_waived = ?12
         WHERE id = ?13",
        params![
            tc.check_in_time.map(to_db_timestamp),
            tc.check_out_time.map(to_db_timestamp),
            tc.break_start_time.map(to_db_timestamp),
            tc.break_end_time.map(to_db_timestamp),
            tc.pay_rate,
            tc.status.to_db_str(),
            tc.manually_edited as i64,
            tc.total_hours,
            tc.break_duration,
            tc.total_pay,
            tc.admin_notes,
            tc.break_waived as i64,
            tc.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(tc.id));
    }
    Ok(())
}

impl RecordStore for SqliteStore<'_> {
    fn get_timecard(&self, id: i64) -> AppResult<Option<TimecardDay>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_TIMECARD} WHERE id = ?1"))?;
        Ok(stmt.query_row([id], map_row).optional()?)
    }

    fn list_timecards(&self, filter: &TimecardFilter) -> AppResult<Vec<TimecardDay>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(u) = &filter.user_id {
            clauses.push("user_id = ?");
            values.push(Value::Text(u.clone()));
        }
        if let Some(p) = &filter.project_id {
            clauses.push("project_id = ?");
            values.push(Value::Text(p.clone()));
        }
        if let Some(s) = filter.status {
            clauses.push("status = ?");
            values.push(Value::Text(s.to_db_str().to_string()));
        }
        if let Some(d) = filter.from {
            clauses.push("date >= ?");
            values.push(Value::Text(d.format("%Y-%m-%d").to_string()));
        }
        if let Some(d) = filter.to {
            clauses.push("date <= ?");
            values.push(Value::Text(d.format("%Y-%m-%d").to_string()));
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        let sql = format!("{SELECT_TIMECARD}{where_sql} ORDER BY date ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(values), map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn insert_timecard(&mut self, tc: &TimecardDay) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO timecards (
                user_id, project_id, date, check_in_time, check_out_time,
                break_start_time, break_end_time, pay_rate, status, manually_edited,
                total_hours, break_duration, total_pay, admin_notes, created_at, break_waived
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                tc.user_id,
                tc.project_id,
                tc.date_str(),
                tc.check_in_time.map(to_db_timestamp),
                tc.check_out_time.map(to_db_timestamp),
                tc.break_start_time.map(to_db_timestamp),
                tc.break_end_time.map(to_db_timestamp),
                tc.pay_rate,
                tc.status.to_db_str(),
                tc.manually_edited as i64,
                tc.total_hours,
                tc.break_duration,
                tc.total_pay,
                tc.admin_notes,
                tc.created_at,
                tc.break_waived as i64,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_timecard(&mut self, tc: &TimecardDay) -> AppResult<()> {
        update_one(self.conn, tc)
    }

    fn update_timecards(&mut self, tcs: &[TimecardDay]) -> AppResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for tc in tcs {
            update_one(&tx, tc)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_project(&self, id: &str) -> AppResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, start_date FROM projects WHERE id = ?1")?;

        let row = stmt
            .query_row([id], |row| {
                let start: Option<String> = row.get(2)?;
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, start))
            })
            .optional()?;

        match row {
            None => Ok(None),
            Some((id, name, start)) => {
                let start_date = match start {
                    Some(s) if !s.is_empty() => Some(
                        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                            .map_err(|_| AppError::InvalidDate(s))?,
                    ),
                    _ => None,
                };
                Ok(Some(Project {
                    id,
                    name,
                    start_date,
                }))
            }
        }
    }

    fn upsert_project(&mut self, project: &Project) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO projects (id, name, start_date) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, start_date = excluded.start_date",
            params![
                project.id,
                project.name,
                project.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            ],
        )?;
        Ok(())
    }
}
