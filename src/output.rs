use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analyze::AnalysisReport;
use crate::error::ScrapeError;
use crate::record::DrugRecord;

/// Serialize records as CSV (header `Drug Name,Uses,Side Effects`).
pub fn write_records<W: Write>(writer: W, records: &[DrugRecord]) -> Result<(), ScrapeError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record.csv_row())?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the table next to `path` first and rename it into place, so the
/// target either holds the full table or is untouched.
pub fn save_csv(path: &Path, records: &[DrugRecord]) -> Result<(), ScrapeError> {
    let tmp = temp_path(path);
    let file = fs::File::create(&tmp).map_err(|source| ScrapeError::Output {
        path: tmp.clone(),
        source,
    })?;
    if let Err(e) = write_records(file, records) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path).map_err(|source| ScrapeError::Output {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// JSON summary of a completed run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub pages_listed: usize,
    pub pages_scraped: usize,
    pub pages_failed: usize,
    pub records_written: usize,
    pub output_path: &'a Path,
    pub analysis: &'a AnalysisReport,
}

pub fn save_report(path: &Path, report: &RunReport<'_>) -> Result<(), ScrapeError> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|source| ScrapeError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote run report to {}", path.display());
    Ok(())
}

// ── Tests ──
