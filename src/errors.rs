//! Unified application error type.
//! Store, service and CLI layers return AppError to keep the error
//! handling consistent. The calculation engine never raises: it reports
//! input problems as values (see `models::calculation::ValidationError`).

use std::io;
use thiserror::Error;

use crate::models::timecard::TimecardStatus;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid break interval: {0}")]
    InvalidBreak(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Timecard {0} not found")]
    NotFound(i64),

    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Timecard {id} is {status} and can no longer be recalculated")]
    Immutable { id: i64, status: TimecardStatus },

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Timecard {id} is invalid: {reason}")]
    InvalidTimecard { id: i64, reason: String },

    #[error("Submission blocked: {0}")]
    SubmissionBlocked(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration format error: {0}")]
    ConfigFormat(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type AppResult<T> = Result<T, AppError>;
