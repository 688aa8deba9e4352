use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use log::{info, warn};

use crate::config::LeagueConfig;
use crate::export::{self, SeasonDocument};
use crate::ingest;
use crate::pipeline;

pub struct BuildService {
    config: LeagueConfig,
}

impl BuildService {
    pub fn new(config: LeagueConfig) -> Self {
        Self { config }
    }

    /// Full rebuild-from-truth: load every log sheet, derive the season
    /// report, publish the document atomically (write temp, rename) so a
    /// concurrent reader never observes a half-written file.
    pub fn run(&self, data_dir: &Path, out_path: &Path) -> Result<()> {
        info!("=== Starting Season Build (Atomic) ===\n");
        info!("Data dir: {}, Target: {}", data_dir.display(), out_path.display());

        let (logs, latest_source_file) = ingest::load_season_logs(data_dir)?;
        info!(
            "  → Loaded {} weekly logs (latest: {})\n",
            logs.len(),
            latest_source_file
        );

        let report = pipeline::run(&logs, &self.config)?;
        for exclusion in &report.exclusions {
            warn!("  ! {}: {}", exclusion.tournament, exclusion.reason);
        }
        if report.dropped_rows > 0 {
            warn!(
                "  ! {} rows dropped for unparsable timestamps",
                report.dropped_rows
            );
        }

        let built_at = Local::now().format("%b %d, %Y %I:%M %p").to_string();
        let document = export::build_document(&report, &self.config, &latest_source_file, &built_at);

        self.publish(&document, out_path)?;
        info!("=== Build Complete ===");
        Ok(())
    }

    fn publish(&self, document: &SeasonDocument, out_path: &Path) -> Result<()> {
        let temp_path = PathBuf::from(format!("{}.tmp", out_path.display()));

        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Clean up previous temp file if exists
        if temp_path.exists() {
            fs::remove_file(&temp_path)?;
        }

        let json = serde_json::to_string_pretty(document)?;
        fs::write(&temp_path, json)?;

        // Atomic swap
        fs::rename(&temp_path, out_path)?;
        info!(
            "Successfully swapped season document to {}",
            out_path.display()
        );
        Ok(())
    }
}
