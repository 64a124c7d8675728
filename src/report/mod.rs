//! Report sinks
//!
//! Consume a finished [`Report`]: CSV tables and `manifest.json` under the
//! output directory, statistics files inside each configuration directory
//! of the log tree, and a plain-text rendering for the terminal.

mod csv;
mod manifest;
mod summary;

pub use self::csv::{read_table, write_table, write_table_file};
pub use manifest::{RunManifest, RunManifestBuilder};
pub use summary::{stats_text, MeanStd};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::pipeline::Report;
use crate::Result;

/// Name of the manifest file in the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";
/// Baseline statistics written per configuration with `json_stats`.
pub const SEQUENTIAL_STATS_FILE: &str = "sequential_stats.json";
/// Measured statistics written per configuration with `json_stats`.
pub const PARALLEL_STATS_FILE: &str = "parallel_stats.json";

/// Files a report run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenFiles {
    /// One CSV per table
    pub tables: Vec<PathBuf>,
    /// The run manifest
    pub manifest: PathBuf,
    /// Statistics files inside the log tree
    pub stats: Vec<PathBuf>,
}

/// Write every output of a report.
///
/// Statistics files are only written into configuration directories that
/// exist; the log tree is never extended.
///
/// # Errors
///
/// Returns `Error::Io`, `Error::Csv` or `Error::Json` on the first failed write.
pub fn write_report(report: &Report) -> Result<WrittenFiles> {
    let config = report.config();
    fs::create_dir_all(&config.output_dir)?;

    let tables = report
        .tables()
        .iter()
        .map(|table| write_table_file(table, &config.output_dir))
        .collect::<Result<Vec<_>>>()?;

    let stats = write_cell_stats(report)?;

    let manifest = config.output_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&RunManifest::from_report(report)?)?;
    fs::write(&manifest, json)?;

    info!(
        output = %config.output_dir.display(),
        tables = tables.len(),
        stats_files = stats.len(),
        "report written"
    );
    Ok(WrittenFiles {
        tables,
        manifest,
        stats,
    })
}

fn write_cell_stats(report: &Report) -> Result<Vec<PathBuf>> {
    let config = report.config();
    let grid = report.analysis().summaries();
    let basis = report.analysis().metrics().basis();
    let mut written = Vec::new();

    for size in &config.sizes {
        for &workers in &config.workers {
            let dir = config.cell_dir(size, workers);
            if !dir.is_dir() {
                debug!(dir = %dir.display(), "no configuration directory, skipping stats");
                continue;
            }
            let Some(cell) = grid.cell(size, workers) else {
                continue;
            };

            if let Some(path) = config.stats_path(size, workers) {
                fs::write(&path, stats_text(cell))?;
                written.push(path);
            }

            if config.layout.json_stats {
                let baseline = grid.baseline(size).and_then(|c| c.field(basis.baseline));
                let measured = cell.field(basis.measured);
                written.push(write_json(&dir, SEQUENTIAL_STATS_FILE, &MeanStd::from(baseline))?);
                written.push(write_json(&dir, PARALLEL_STATS_FILE, &MeanStd::from(measured))?);
            }
        }
    }
    Ok(written)
}

fn write_json(dir: &Path, name: &str, value: &MeanStd) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(path)
}

/// Every table of a report as aligned text, separated by blank lines.
#[must_use]
pub fn render_text(report: &Report) -> String {
    report
        .tables()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
