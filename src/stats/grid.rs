//! Summary Grid - aggregated view of every configuration

use std::collections::HashMap;

use super::{aggregate, CellSummary};
use crate::experiment::{ExperimentKey, RunGrid, RunSet};

/// Every configuration of a report reduced to a `CellSummary`.
///
/// The grid remembers the configured size and worker order; consumers walk
/// `sizes()` and `workers()` instead of the hash maps.
#[derive(Debug, Clone)]
pub struct SummaryGrid {
    sizes: Vec<String>,
    workers: Vec<u32>,
    cells: HashMap<ExperimentKey, CellSummary>,
    sequential: HashMap<String, CellSummary>,
}

impl SummaryGrid {
    /// Aggregate every (size, workers) cell of a run grid.
    ///
    /// Cells absent from the run grid are summarised as empty, so every
    /// configured key has a summary.
    #[must_use]
    pub fn build(runs: &RunGrid, sizes: &[String], workers: &[u32]) -> Self {
        let empty = RunSet::new();
        let mut cells = HashMap::with_capacity(sizes.len() * workers.len());
        let mut sequential = HashMap::new();

        for size in sizes {
            for &w in workers {
                let key = ExperimentKey::new(size.as_str(), w);
                let set = runs.get(&key).unwrap_or(&empty);
                cells.insert(key.clone(), aggregate(key, set));
            }
            if let Some(set) = runs.sequential(size) {
                sequential.insert(size.clone(), aggregate(ExperimentKey::new(size.as_str(), 1), set));
            }
        }

        Self {
            sizes: sizes.to_vec(),
            workers: workers.to_vec(),
            cells,
            sequential,
        }
    }

    /// Configured input sizes, in report order.
    #[must_use]
    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    /// Configured worker counts, ascending.
    #[must_use]
    pub fn workers(&self) -> &[u32] {
        &self.workers
    }

    /// Summary of one configuration.
    #[must_use]
    pub fn cell(&self, size: &str, workers: u32) -> Option<&CellSummary> {
        self.cells.get(&ExperimentKey::new(size, workers))
    }

    /// Summary of the dedicated sequential runs of a size.
    #[must_use]
    pub fn dedicated_sequential(&self, size: &str) -> Option<&CellSummary> {
        self.sequential.get(size)
    }

    /// Reference configuration speedups of `size` are measured against.
    ///
    /// The single-worker cell when it holds data, otherwise the dedicated
    /// sequential runs.
    #[must_use]
    pub fn baseline(&self, size: &str) -> Option<&CellSummary> {
        self.cell(size, 1)
            .filter(|cell| !cell.is_empty())
            .or_else(|| self.dedicated_sequential(size).filter(|cell| !cell.is_empty()))
    }

    /// Number of configurations (dedicated sequential ones included) with data.
    #[must_use]
    pub fn populated(&self) -> usize {
        self.cells
            .values()
            .chain(self.sequential.values())
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// True when at least one configuration has data.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.populated() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{Field, Mode, RawMeasurement};

    fn runs(mode: Mode, times: &[f64]) -> RunSet {
        times
            .iter()
            .map(|&t| RawMeasurement::combined(mode, t, 1))
            .collect()
    }

    fn sizes(labels: &[&str]) -> Vec<String> {
        labels.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_missing_cells_are_summarised_empty() {
        let mut grid = RunGrid::new();
        grid.insert(ExperimentKey::new("100", 1), runs(Mode::Sequential, &[1.0]));

        let summary = SummaryGrid::build(&grid, &sizes(&["100", "200"]), &[1, 2]);
        assert_eq!(summary.populated(), 1);
        assert!(summary.cell("200", 2).is_some_and(CellSummary::is_empty));
        assert!(summary.cell("300", 2).is_none());
    }

    #[test]
    fn test_baseline_prefers_single_worker_cell() {
        let mut grid = RunGrid::new();
        grid.insert(ExperimentKey::new("100", 1), runs(Mode::Sequential, &[4.0]));
        grid.insert_sequential("100", runs(Mode::Sequential, &[8.0]));

        let summary = SummaryGrid::build(&grid, &sizes(&["100"]), &[1, 2]);
        let baseline = summary.baseline("100").unwrap();
        assert_eq!(baseline.mean(Field::TotalTime), Some(4.0));
    }

    #[test]
    fn test_baseline_falls_back_to_dedicated_sequential_runs() {
        let mut grid = RunGrid::new();
        grid.insert(ExperimentKey::new("100", 2), runs(Mode::Parallel, &[1.0]));
        grid.insert_sequential("100", runs(Mode::Sequential, &[8.0, 10.0]));

        let summary = SummaryGrid::build(&grid, &sizes(&["100"]), &[2, 4]);
        let baseline = summary.baseline("100").unwrap();
        assert_eq!(baseline.mean(Field::TotalTime), Some(9.0));
        assert!(summary.baseline("missing").is_none());
    }

    #[test]
    fn test_empty_grid_has_no_data() {
        let summary = SummaryGrid::build(&RunGrid::new(), &sizes(&["100"]), &[1]);
        assert!(!summary.has_data());
    }
}
