use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Weekly log sheets only ("02.10.26 log.csv"); the roster sheet and any
/// other CSVs in the folder are not tournament logs.
pub fn list_log_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read data dir {}", data_dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_log_file(path))
        .collect();
    files.sort();
    Ok(files)
}

fn is_log_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_lowercase().ends_with(" log.csv"))
        .unwrap_or(false)
}

/// Name of the most recently modified log file, for the "latest data"
/// banner on the season report.
pub fn latest_log_filename(files: &[PathBuf]) -> String {
    let mut newest: Option<(SystemTime, &PathBuf)> = None;
    for path in files {
        let Ok(metadata) = fs::metadata(path) else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        match newest {
            Some((time, _)) if time >= modified => {}
            _ => newest = Some((modified, path)),
        }
    }

    newest
        .and_then(|(_, path)| path.file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "N/A".to_string())
}

/// Tournament date from the sheet name: the stem's first token in
/// `mm.dd.yy` form.
pub fn date_from_filename(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    let token = stem.split_whitespace().next()?;
    NaiveDate::parse_from_str(token, "%m.%d.%y").ok()
}
