pub mod csv_rows;
pub mod log_files;

use std::path::Path;

use anyhow::Result;
use log::{info, warn};

use crate::domain::TournamentLog;

/// Loads every weekly log under `data_dir`. Returns the logs plus the
/// name of the most recently modified sheet, threaded back for display
/// rather than stashed in a global.
pub fn load_season_logs(data_dir: &Path) -> Result<(Vec<TournamentLog>, String)> {
    let files = log_files::list_log_files(data_dir)?;
    if files.is_empty() {
        anyhow::bail!("No log CSV files found in {}", data_dir.display());
    }
    let latest_source_file = log_files::latest_log_filename(&files);

    let mut logs = Vec::with_capacity(files.len());
    for path in &files {
        let Some(date) = log_files::date_from_filename(path) else {
            warn!("Skipping {}: no mm.dd.yy date in file name", path.display());
            continue;
        };
        let rows = csv_rows::read_log_rows(path)?;
        let source_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        info!("  → {} rows from {}", rows.len(), source_file);
        logs.push(TournamentLog {
            date,
            source_file,
            rows,
        });
    }
    Ok((logs, latest_source_file))
}
