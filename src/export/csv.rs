use super::model::ExportRow;
use crate::errors::AppResult;
use csv::Writer;
use std::path::Path;

/// Write the rows as CSV, header derived from the field names.
pub fn write_csv(path: &Path, rows: &[ExportRow]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
