//! Experiment Key - identity of one benchmark configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one (input size, worker count) configuration.
///
/// The size label is kept verbatim: it doubles as a directory name and may
/// be a scalar (`"1000"`) or a composite label (`"10k_10k"`). A worker count
/// of 1 denotes the purely sequential configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExperimentKey {
    size: String,
    workers: u32,
}

impl ExperimentKey {
    /// Create a new key.
    ///
    /// # Arguments
    ///
    /// * `size` - Input size label as it appears in the log directory tree
    /// * `workers` - Thread or process count
    #[must_use]
    pub fn new(size: impl Into<String>, workers: u32) -> Self {
        Self {
            size: size.into(),
            workers,
        }
    }

    /// Get the input size label.
    #[must_use]
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Get the worker count.
    #[must_use]
    pub const fn workers(&self) -> u32 {
        self.workers
    }

    /// True for the single-worker configuration.
    #[must_use]
    pub const fn is_sequential(&self) -> bool {
        self.workers == 1
    }
}

impl fmt::Display for ExperimentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size={}, workers={}", self.size, self.workers)
    }
}
