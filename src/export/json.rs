use super::model::ExportRow;
use crate::errors::AppResult;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn write_json(path: &Path, rows: &[ExportRow]) -> AppResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), rows)?;
    Ok(())
}
