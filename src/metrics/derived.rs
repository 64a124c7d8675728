//! Derived metric structures built from a `SummaryGrid`

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{amdahl_theoretical_speedup, efficiency, speedup, unweighted_mean};
use crate::experiment::{ExperimentKey, Field};
use crate::stats::SummaryGrid;

/// Worker count for an Amdahl projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workers {
    /// A concrete thread or process count
    Finite(u32),
    /// The unbounded limit
    Infinite,
}

impl fmt::Display for Workers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(p) => write!(f, "{p}"),
            Self::Infinite => f.write_str("∞"),
        }
    }
}

/// Which means a speedup compares.
///
/// `baseline` is read from the size's baseline configuration, `measured`
/// from the configuration under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedupBasis {
    /// Field of the baseline (single worker or dedicated sequential) runs
    pub baseline: Field,
    /// Field of the measured configuration
    pub measured: Field,
}

impl Default for SpeedupBasis {
    fn default() -> Self {
        Self {
            baseline: Field::TotalTime,
            measured: Field::TotalTime,
        }
    }
}

/// Speedup and efficiency of one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    /// Baseline mean of the size, if any
    pub baseline: Option<f64>,
    /// Measured mean of this configuration, if any
    pub measured: Option<f64>,
    /// `baseline / measured`
    pub speedup: Option<f64>,
    /// `speedup / workers`
    pub efficiency: Option<f64>,
}

impl DerivedMetrics {
    fn derive(grid: &SummaryGrid, basis: SpeedupBasis, size: &str, workers: u32) -> Self {
        let baseline = grid.baseline(size).and_then(|cell| cell.mean(basis.baseline));
        let measured = grid
            .cell(size, workers)
            .and_then(|cell| cell.mean(basis.measured));
        let speedup = baseline.zip(measured).and_then(|(b, m)| speedup(b, m));
        let efficiency = speedup.and_then(|s| efficiency(s, workers));

        Self {
            baseline,
            measured,
            speedup,
            efficiency,
        }
    }
}

/// Derived metrics for every configured key.
#[derive(Debug, Clone)]
pub struct MetricGrid {
    basis: SpeedupBasis,
    cells: HashMap<ExperimentKey, DerivedMetrics>,
}

impl MetricGrid {
    /// Derive speedup and efficiency for every (size, workers) cell.
    #[must_use]
    pub fn derive(grid: &SummaryGrid, basis: SpeedupBasis) -> Self {
        let mut cells = HashMap::with_capacity(grid.sizes().len() * grid.workers().len());
        for size in grid.sizes() {
            for &w in grid.workers() {
                cells.insert(
                    ExperimentKey::new(size.as_str(), w),
                    DerivedMetrics::derive(grid, basis, size, w),
                );
            }
        }
        Self { basis, cells }
    }

    /// Basis the metrics were derived with.
    #[must_use]
    pub const fn basis(&self) -> SpeedupBasis {
        self.basis
    }

    /// Metrics of one configuration.
    #[must_use]
    pub fn get(&self, size: &str, workers: u32) -> Option<&DerivedMetrics> {
        self.cells.get(&ExperimentKey::new(size, workers))
    }
}

/// One row of the cross-size Amdahl projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmdahlRow {
    /// Worker count projected for
    pub workers: Workers,
    /// Pooled serial fraction
    pub serial_fraction: Option<f64>,
    /// Theoretical speedup bound
    pub theoretical_speedup: Option<f64>,
}

/// Amdahl's-law projection pooled across input sizes, one row per worker
/// count plus the unbounded limit.
///
/// The serial fraction of a worker count is the unweighted mean of the
/// per-size fractions measured at that count. The unbounded row pools the
/// fractions of every count above one.
#[derive(Debug, Clone, PartialEq)]
pub struct AmdahlProjection {
    rows: Vec<AmdahlRow>,
    infinite: AmdahlRow,
}

impl AmdahlProjection {
    /// Project from the measured serial fractions of the given sizes.
    #[must_use]
    pub fn project(grid: &SummaryGrid, sizes: &[String]) -> Self {
        let rows: Vec<AmdahlRow> = grid
            .workers()
            .iter()
            .map(|&w| {
                let serial_fraction = unweighted_mean(
                    sizes
                        .iter()
                        .map(|size| grid.cell(size, w).and_then(|c| c.serial_fraction())),
                );
                AmdahlRow {
                    workers: Workers::Finite(w),
                    serial_fraction,
                    theoretical_speedup: serial_fraction
                        .and_then(|f| amdahl_theoretical_speedup(f, Workers::Finite(w))),
                }
            })
            .collect();

        let pooled = unweighted_mean(
            rows.iter()
                .filter(|row| matches!(row.workers, Workers::Finite(w) if w > 1))
                .map(|row| row.serial_fraction),
        );
        let infinite = AmdahlRow {
            workers: Workers::Infinite,
            serial_fraction: pooled,
            theoretical_speedup: pooled
                .and_then(|f| amdahl_theoretical_speedup(f, Workers::Infinite)),
        };

        Self { rows, infinite }
    }

    /// Rows for the configured worker counts, ascending.
    #[must_use]
    pub fn rows(&self) -> &[AmdahlRow] {
        &self.rows
    }

    /// The unbounded-workers row.
    #[must_use]
    pub const fn infinite(&self) -> &AmdahlRow {
        &self.infinite
    }
}

/// Amdahl's-law projection of a single input size.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeProjection {
    /// Input size label
    pub size: String,
    /// Serial fraction of the size's baseline runs
    pub serial_fraction: Option<f64>,
    /// Theoretical speedup per projected worker count
    pub speedups: Vec<(u32, Option<f64>)>,
    /// Unbounded-workers speedup
    pub infinite: Option<f64>,
}

/// Project each size onto a list of worker counts.
///
/// The serial fraction comes from the size's baseline configuration.
#[must_use]
pub fn project_sizes(grid: &SummaryGrid, sizes: &[String], workers: &[u32]) -> Vec<SizeProjection> {
    sizes
        .iter()
        .map(|size| {
            let serial_fraction = grid.baseline(size).and_then(|c| c.serial_fraction());
            let at = |w| serial_fraction.and_then(|f| amdahl_theoretical_speedup(f, w));
            SizeProjection {
                size: size.clone(),
                serial_fraction,
                speedups: workers
                    .iter()
                    .map(|&w| (w, at(Workers::Finite(w))))
                    .collect(),
                infinite: at(Workers::Infinite),
            }
        })
        .collect()
}
