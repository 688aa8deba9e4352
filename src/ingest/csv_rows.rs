use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::domain::RawRow;

/// Reads one log sheet. Headers are matched by name so column order does
/// not matter; columns the pipeline has no mapping for land in
/// `RawRow::extra`.
pub fn read_log_rows(path: &Path) -> Result<Vec<RawRow>> {
    let reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    collect_rows(reader).with_context(|| format!("Failed to parse {}", path.display()))
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: RawRow = record?;
        rows.push(row);
    }
    Ok(rows)
}
