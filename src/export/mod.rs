//! Timecard export (payroll hand-off).

mod csv;
mod fs_utils;
mod json;
mod model;

pub use model::ExportRow;

use crate::errors::{AppError, AppResult};
use crate::models::timecard::TimecardDay;
use crate::utils::path::{expand_tilde, is_absolute};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::InvalidExportFormat(other.to_string())),
        }
    }
}

/// Write `timecards` to `file`. The path must be absolute; an existing
/// file is only replaced with `force` or after confirmation.
pub fn export_timecards(
    timecards: &[TimecardDay],
    format: ExportFormat,
    file: &str,
    force: bool,
) -> AppResult<usize> {
    if !is_absolute(file) {
        return Err(AppError::Export(format!(
            "output path must be absolute: {}",
            file
        )));
    }
    let path = expand_tilde(file);
    fs_utils::ensure_writable(&path, force)?;

    let rows: Vec<ExportRow> = timecards.iter().map(ExportRow::from).collect();
    write_rows(&path, &rows, format)?;
    Ok(rows.len())
}

fn write_rows(path: &Path, rows: &[ExportRow], format: ExportFormat) -> AppResult<()> {
    match format {
        ExportFormat::Csv => csv::write_csv(path, rows),
        ExportFormat::Json => json::write_json(path, rows),
    }
}
