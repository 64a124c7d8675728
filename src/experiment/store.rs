//! Run Grid - in-memory store of run sets for one report
//!
//! Holds one `RunSet` per `ExperimentKey`, plus the dedicated sequential
//! run sets some layouts record per input size.

use std::collections::HashMap;

use super::{ExperimentKey, RunSet};

/// In-memory store of every run set collected for a report.
///
/// ## Design
///
/// Hash maps give O(1) lookups by key. The grid carries no ordering of its
/// own: tables iterate the configured size and worker lists, so discovery
/// order never leaks into the output.
#[derive(Debug, Default, Clone)]
pub struct RunGrid {
    cells: HashMap<ExperimentKey, RunSet>,
    sequential: HashMap<String, RunSet>,
}

impl RunGrid {
    /// Create a new empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no configuration holds a single usable run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.values().all(RunSet::is_empty) && self.sequential.values().all(RunSet::is_empty)
    }

    /// Number of configurations recorded (empty ones included).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Total number of usable runs across the grid.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.cells.values().map(RunSet::len).sum::<usize>()
            + self.sequential.values().map(RunSet::len).sum::<usize>()
    }

    /// Record the run set of one configuration.
    pub fn insert(&mut self, key: ExperimentKey, runs: RunSet) {
        self.cells.insert(key, runs);
    }

    /// Get the run set of one configuration.
    #[must_use]
    pub fn get(&self, key: &ExperimentKey) -> Option<&RunSet> {
        self.cells.get(key)
    }

    /// Record the dedicated sequential run set of an input size.
    pub fn insert_sequential(&mut self, size: impl Into<String>, runs: RunSet) {
        self.sequential.insert(size.into(), runs);
    }

    /// Get the dedicated sequential run set of an input size.
    #[must_use]
    pub fn sequential(&self, size: &str) -> Option<&RunSet> {
        self.sequential.get(size)
    }

    /// Iterate over every configuration and its runs, in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = (&ExperimentKey, &RunSet)> {
        self.cells.iter()
    }
}
