//! Series ingestion for the CLI harness.
//!
//! This module discovers CSV recordings in a directory, reads one amplitude
//! column from each, applies the optional low-pass pre-filter, and hands
//! the result to the analysis core as a [`Signal`]. It is the only layer
//! that touches the filesystem.

mod prefilter;

pub use prefilter::lowpass;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use crate::config::IngestConfig;
use crate::signal::Signal;

/// Series name derived from its file stem
pub fn series_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// List the `.csv` files directly inside `dir`, sorted by path
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Parse CSV text, keeping the zero-based `column` of every data row
///
/// The first line is a header and is skipped. Reading stops at the first
/// row whose column is missing, not a number, or not finite (`nan`, `inf`);
/// blank lines are ignored.
pub fn parse_csv_samples(contents: &str, column: usize) -> Result<Vec<f64>> {
    let mut lines = contents.lines();
    lines
        .next()
        .ok_or_else(|| anyhow!("CSV input has no header line"))?;

    let mut samples = Vec::new();
    for (row, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed = line
            .split(',')
            .nth(column)
            .and_then(|field| field.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite());
        match parsed {
            Some(value) => samples.push(value),
            None => {
                log::warn!(
                    "[Ingest] Stopping at data row {}: column {} is missing or not a finite number",
                    row + 1,
                    column
                );
                break;
            }
        }
    }

    if samples.is_empty() {
        bail!("no numeric samples found in column {}", column);
    }
    Ok(samples)
}

/// Read one amplitude column from a CSV file
pub fn read_csv_samples(path: &Path, column: usize) -> Result<Vec<f64>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let samples =
        parse_csv_samples(&contents, column).with_context(|| format!("parsing {}", path.display()))?;

    log::debug!("[Ingest] {}: {} samples", path.display(), samples.len());
    Ok(samples)
}

/// Load a CSV file as an analysis-ready Signal
///
/// Applies the low-pass pre-filter when `config.lowpass_cutoff` is set.
pub fn load_signal(path: &Path, config: &IngestConfig) -> Result<Signal> {
    let raw = read_csv_samples(path, config.value_column)?;

    let samples = match config.lowpass_cutoff {
        Some(cutoff) => lowpass(&raw, cutoff),
        None => raw,
    };

    Signal::new(samples, config.sample_rate)
        .with_context(|| format!("building signal from {}", path.display()))
}
