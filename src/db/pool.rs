//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;

use crate::db::audit::SqliteAuditLog;
use crate::db::store::SqliteStore;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Record store and audit log sharing this connection.
    pub fn collaborators(&self) -> (SqliteStore<'_>, SqliteAuditLog<'_>) {
        (SqliteStore::new(&self.conn), SqliteAuditLog::new(&self.conn))
    }
}
