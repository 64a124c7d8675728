//! Error types for lcs-perf
//!
//! Only conditions that stop a whole report are errors. A missing or
//! malformed log file is a data state handled by the collector, and an
//! undefined metric is rendered as `N/A`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// lcs-perf error types
#[derive(Error, Debug)]
pub enum Error {
    /// Every configuration in the grid came back empty
    #[error(
        "No usable measurements found under {}\nCheck the base directory, size labels and run file template",
        .0.display()
    )]
    NoData(PathBuf),

    /// Configuration rejected before any file was read
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A log file could not be turned into a measurement
    #[error("Malformed log {}: {reason}", path.display())]
    MalformedLog {
        /// Offending file
        path: PathBuf,
        /// Parser diagnostic
        reason: String,
    },

    /// Log field pattern failed to compile
    #[error("Log pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
