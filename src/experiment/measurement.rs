//! Raw Measurement - one parsed benchmark log

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution mode reported by a combined-shape log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// `SEQUENTIAL: <t>s`
    Sequential,
    /// `PARALLEL: <t>s`
    Parallel,
}

/// A measured field of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Wall-clock time of the whole LCS computation.
    TotalTime,
    /// Time spent in the parallel region.
    ParallelTime,
    /// Time spent in inherently sequential work.
    SequentialTime,
    /// LCS score printed by the program.
    Score,
}

impl Field {
    /// Every field, in report order.
    pub const ALL: [Self; 4] = [
        Self::TotalTime,
        Self::ParallelTime,
        Self::SequentialTime,
        Self::Score,
    ];

    /// Human-readable label used in tables and statistics files.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalTime => "Total time",
            Self::ParallelTime => "Parallel time",
            Self::SequentialTime => "Sequential time",
            Self::Score => "Score",
        }
    }

    /// True for the time fields (reported in seconds).
    #[must_use]
    pub const fn is_time(self) -> bool {
        !matches!(self, Self::Score)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw Measurement extracted from one log file.
///
/// Time fields are optional so that absent values are tracked as absent and
/// skipped during aggregation. A combined-shape record stores `0.0` in the
/// field of the other mode: a PARALLEL run spent no time in a separate
/// sequential phase, which is a measurement, not a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMeasurement {
    mode: Option<Mode>,
    total_time: Option<f64>,
    parallel_time: Option<f64>,
    sequential_time: Option<f64>,
    score: u64,
}

impl RawMeasurement {
    /// Build a record from a combined-shape log line.
    ///
    /// # Arguments
    ///
    /// * `mode` - Which tag the elapsed time was printed under
    /// * `elapsed` - Elapsed seconds
    /// * `score` - LCS score
    #[must_use]
    pub const fn combined(mode: Mode, elapsed: f64, score: u64) -> Self {
        let (parallel, sequential) = match mode {
            Mode::Parallel => (elapsed, 0.0),
            Mode::Sequential => (0.0, elapsed),
        };
        Self {
            mode: Some(mode),
            total_time: Some(elapsed),
            parallel_time: Some(parallel),
            sequential_time: Some(sequential),
            score,
        }
    }

    /// Build a record from a split-shape log (three timing lines).
    #[must_use]
    pub const fn split(total: f64, parallel: f64, sequential: f64, score: u64) -> Self {
        Self {
            mode: None,
            total_time: Some(total),
            parallel_time: Some(parallel),
            sequential_time: Some(sequential),
            score,
        }
    }

    /// Create a builder for records with an arbitrary set of fields.
    #[must_use]
    pub const fn builder(score: u64) -> RawMeasurementBuilder {
        RawMeasurementBuilder::new(score)
    }

    /// Get the mode, if the log carried one.
    #[must_use]
    pub const fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Get the total time in seconds.
    #[must_use]
    pub const fn total_time(&self) -> Option<f64> {
        self.total_time
    }

    /// Get the parallel time in seconds.
    #[must_use]
    pub const fn parallel_time(&self) -> Option<f64> {
        self.parallel_time
    }

    /// Get the sequential time in seconds.
    #[must_use]
    pub const fn sequential_time(&self) -> Option<f64> {
        self.sequential_time
    }

    /// Get the LCS score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Get a field as `f64`, `None` when the log did not carry it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::TotalTime => self.total_time,
            Field::ParallelTime => self.parallel_time,
            Field::SequentialTime => self.sequential_time,
            Field::Score => Some(self.score as f64),
        }
    }
}

/// Builder for `RawMeasurement`.
#[derive(Debug)]
pub struct RawMeasurementBuilder {
    mode: Option<Mode>,
    total_time: Option<f64>,
    parallel_time: Option<f64>,
    sequential_time: Option<f64>,
    score: u64,
}

impl RawMeasurementBuilder {
    /// Create a new builder with the required score.
    #[must_use]
    pub const fn new(score: u64) -> Self {
        Self {
            mode: None,
            total_time: None,
            parallel_time: None,
            sequential_time: None,
            score,
        }
    }

    /// Set the mode.
    #[must_use]
    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the total time.
    #[must_use]
    pub const fn total_time(mut self, seconds: f64) -> Self {
        self.total_time = Some(seconds);
        self
    }

    /// Set the parallel time.
    #[must_use]
    pub const fn parallel_time(mut self, seconds: f64) -> Self {
        self.parallel_time = Some(seconds);
        self
    }

    /// Set the sequential time.
    #[must_use]
    pub const fn sequential_time(mut self, seconds: f64) -> Self {
        self.sequential_time = Some(seconds);
        self
    }

    /// Build the `RawMeasurement`.
    #[must_use]
    pub const fn build(self) -> RawMeasurement {
        RawMeasurement {
            mode: self.mode,
            total_time: self.total_time,
            parallel_time: self.parallel_time,
            sequential_time: self.sequential_time,
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_parallel_zeroes_sequential() {
        let m = RawMeasurement::combined(Mode::Parallel, 2.5, 40);
        assert_eq!(m.mode(), Some(Mode::Parallel));
        assert_eq!(m.total_time(), Some(2.5));
        assert_eq!(m.parallel_time(), Some(2.5));
        assert_eq!(m.sequential_time(), Some(0.0));
        assert_eq!(m.score(), 40);
    }

    #[test]
    fn test_combined_sequential_zeroes_parallel() {
        let m = RawMeasurement::combined(Mode::Sequential, 1.25, 7);
        assert_eq!(m.parallel_time(), Some(0.0));
        assert_eq!(m.sequential_time(), Some(1.25));
    }

    #[test]
    fn test_builder_leaves_fields_absent() {
        let m = RawMeasurement::builder(3).total_time(1.0).build();
        assert_eq!(m.value(Field::TotalTime), Some(1.0));
        assert_eq!(m.value(Field::ParallelTime), None);
        assert_eq!(m.value(Field::Score), Some(3.0));
    }
}
