//! Export report use case

use crate::domain::StreakSummary;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_FILE: &str = "sobriety_data.txt";

/// Outcome of the most recent export, observed by whoever presents the share surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportState {
    pub path: Option<PathBuf>,
    pub share_ready: bool,
}

/// Write the rendered report into `dir`, replacing any earlier export
pub fn write_report(summary: &StreakSummary, dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let path = dir.join(EXPORT_FILE);
    fs::write(&path, summary.render_report())?;
    Ok(path)
}
