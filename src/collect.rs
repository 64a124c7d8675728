//! Run collector
//!
//! Walks the configured (size x workers x run) grid, reads each expected
//! log file and hands its text to the [`LogParser`]. A missing file is a
//! normal data state and only logged at debug level. A malformed file is
//! reported once with `warn!`, counted and skipped.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::experiment::{ExperimentKey, RunGrid, RunSet};
use crate::parser::LogParser;
use crate::{Error, Result};

/// What the collector found on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectStats {
    /// Files turned into measurements
    pub parsed: usize,
    /// Expected files that do not exist
    pub missing: usize,
    /// Files that exist but could not be parsed
    pub malformed: Vec<PathBuf>,
}

impl CollectStats {
    /// Number of files expected by the grid.
    #[must_use]
    pub fn expected(&self) -> usize {
        self.parsed + self.missing + self.malformed.len()
    }
}

/// Read every log file the configuration expects.
///
/// # Errors
///
/// Returns an error only if the log patterns fail to compile. Unreadable
/// or unparsable files are skipped and reported in [`CollectStats`].
pub fn collect(config: &PipelineConfig) -> Result<(RunGrid, CollectStats)> {
    let parser = LogParser::new(config.shape)?;
    let mut stats = CollectStats::default();
    let mut grid = RunGrid::new();

    for size in &config.sizes {
        for &workers in &config.workers {
            let paths = (1..=config.runs).map(|run| config.run_path(size, workers, run));
            let runs = read_run_set(&parser, paths, &mut stats);
            debug!(size = %size, workers, runs = runs.len(), "collected configuration");
            grid.insert(ExperimentKey::new(size.as_str(), workers), runs);
        }

        if config.layout.sequential_file.is_some() {
            let paths = (1..=config.runs).filter_map(|run| config.sequential_path(size, run));
            let runs = read_run_set(&parser, paths, &mut stats);
            debug!(size = %size, runs = runs.len(), "collected sequential runs");
            grid.insert_sequential(size.as_str(), runs);
        }
    }

    info!(
        parsed = stats.parsed,
        missing = stats.missing,
        malformed = stats.malformed.len(),
        "log collection finished"
    );
    Ok((grid, stats))
}

fn read_run_set(
    parser: &LogParser,
    paths: impl Iterator<Item = PathBuf>,
    stats: &mut CollectStats,
) -> RunSet {
    let mut runs = RunSet::new();
    for path in paths {
        match read_log(&path) {
            Ok(None) => {
                debug!(path = %path.display(), "log file missing");
                stats.missing += 1;
            }
            Ok(Some(text)) => match parser.parse(&text) {
                Ok(run) => {
                    runs.push(run);
                    stats.parsed += 1;
                }
                Err(e) => skip_malformed(stats, path, e.to_string()),
            },
            Err(e) => skip_malformed(stats, path, e.to_string()),
        }
    }
    runs
}

fn skip_malformed(stats: &mut CollectStats, path: PathBuf, reason: String) {
    let err = Error::MalformedLog {
        path: path.clone(),
        reason,
    };
    warn!("{err}, skipping");
    stats.malformed.push(path);
}

/// Read a log as text, `None` when it does not exist.
///
/// Invalid UTF-8 is replaced rather than rejected: the fields of interest
/// are ASCII.
fn read_log(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
