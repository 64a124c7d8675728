//! Run set aggregation
//!
//! Reduces each `RunSet` to per-field summary statistics. Standard deviation
//! uses the population convention (ddof = 0) for every field of every
//! configuration, so all tables compare like with like.

mod grid;

pub use grid::SummaryGrid;

use serde::{Deserialize, Serialize};

use crate::experiment::{ExperimentKey, Field, RunSet};
use crate::metrics::amdahl_serial_fraction;

/// Mean, population standard deviation and range of one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation (ddof = 0)
    pub std: f64,
    /// Number of values summarised
    pub count: usize,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl SummaryStats {
    /// Summarise a slice of values; `None` when it is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use lcs_perf::stats::SummaryStats;
    ///
    /// let stats = SummaryStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert!((stats.mean - 5.0).abs() < 1e-12);
    /// assert!((stats.std - 2.0).abs() < 1e-12);
    /// assert!(SummaryStats::from_values(&[]).is_none());
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Rounding can push the mean of near-identical values a hair outside the range.
        Some(Self {
            mean: mean.clamp(min, max),
            std: variance.sqrt(),
            count: values.len(),
            min,
            max,
        })
    }
}

/// Aggregated view of one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSummary {
    key: ExperimentKey,
    runs: usize,
    total_time: Option<SummaryStats>,
    parallel_time: Option<SummaryStats>,
    sequential_time: Option<SummaryStats>,
    score: Option<SummaryStats>,
    serial_fraction: Option<f64>,
}

impl CellSummary {
    /// Get the configuration key.
    #[must_use]
    pub const fn key(&self) -> &ExperimentKey {
        &self.key
    }

    /// Number of usable runs behind this summary.
    #[must_use]
    pub const fn runs(&self) -> usize {
        self.runs
    }

    /// True when no run could be used.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.runs == 0
    }

    /// Statistics of one field, `None` when no run carried it.
    #[must_use]
    pub const fn field(&self, field: Field) -> Option<&SummaryStats> {
        match field {
            Field::TotalTime => self.total_time.as_ref(),
            Field::ParallelTime => self.parallel_time.as_ref(),
            Field::SequentialTime => self.sequential_time.as_ref(),
            Field::Score => self.score.as_ref(),
        }
    }

    /// Mean of one field.
    #[must_use]
    pub fn mean(&self, field: Field) -> Option<f64> {
        self.field(field).map(|s| s.mean)
    }

    /// Mean sequential time over mean total time.
    #[must_use]
    pub const fn serial_fraction(&self) -> Option<f64> {
        self.serial_fraction
    }
}

/// Reduce one run set to its summary.
///
/// Each field is aggregated independently over the runs that carry it.
#[must_use]
pub fn aggregate(key: ExperimentKey, runs: &RunSet) -> CellSummary {
    let summarise = |field| SummaryStats::from_values(&runs.values(field));

    let total_time = summarise(Field::TotalTime);
    let sequential_time = summarise(Field::SequentialTime);
    let serial_fraction = match (&sequential_time, &total_time) {
        (Some(seq), Some(total)) => amdahl_serial_fraction(seq.mean, total.mean),
        _ => None,
    };

    CellSummary {
        key,
        runs: runs.len(),
        total_time,
        parallel_time: summarise(Field::ParallelTime),
        sequential_time,
        score: summarise(Field::Score),
        serial_fraction,
    }
}
