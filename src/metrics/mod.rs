//! Performance metric derivation
//!
//! Closed-form speedup, efficiency and Amdahl's-law formulas, plus the
//! per-configuration and per-worker structures built from a summary grid.
//! Everything here is pure: no I/O, no logging. An undefined value is
//! `None`; the unbounded Amdahl speedup is `f64::INFINITY`.

mod derived;

pub use derived::{
    project_sizes, AmdahlProjection, AmdahlRow, DerivedMetrics, MetricGrid, SizeProjection,
    SpeedupBasis, Workers,
};

/// Observed speedup: `baseline / measured`.
///
/// # Example
///
/// ```
/// use lcs_perf::metrics::speedup;
///
/// assert_eq!(speedup(10.0, 2.5), Some(4.0));
/// assert_eq!(speedup(10.0, 0.0), None);
/// ```
#[must_use]
pub fn speedup(baseline: f64, measured: f64) -> Option<f64> {
    (measured > 0.0 && baseline.is_finite()).then(|| baseline / measured)
}

/// Parallel efficiency: `speedup / workers`.
#[must_use]
pub fn efficiency(speedup: f64, workers: u32) -> Option<f64> {
    (workers > 0).then(|| speedup / f64::from(workers))
}

/// Empirical serial fraction: `sequential / total`, clamped into `[0, 1]`.
///
/// `None` when the total is zero or negative, never zero by default.
#[must_use]
pub fn amdahl_serial_fraction(sequential: f64, total: f64) -> Option<f64> {
    (total > 0.0 && sequential >= 0.0).then(|| (sequential / total).clamp(0.0, 1.0))
}

/// Amdahl's-law speedup bound for serial fraction `f` on `workers`.
///
/// Finite worker counts give `1 / (f + (1 - f) / p)`. The infinite case gives
/// `1 / f`, or `f64::INFINITY` for a perfectly parallel workload.
///
/// # Example
///
/// ```
/// use lcs_perf::metrics::{amdahl_theoretical_speedup, Workers};
///
/// assert_eq!(amdahl_theoretical_speedup(0.0, Workers::Finite(8)), Some(8.0));
/// assert_eq!(amdahl_theoretical_speedup(1.0, Workers::Finite(64)), Some(1.0));
/// assert_eq!(amdahl_theoretical_speedup(0.0, Workers::Infinite), Some(f64::INFINITY));
/// ```
#[must_use]
pub fn amdahl_theoretical_speedup(serial_fraction: f64, workers: Workers) -> Option<f64> {
    if !(0.0..=1.0).contains(&serial_fraction) {
        return None;
    }
    match workers {
        Workers::Finite(0) => None,
        Workers::Finite(p) => {
            Some(1.0 / (serial_fraction + (1.0 - serial_fraction) / f64::from(p)))
        }
        Workers::Infinite if serial_fraction > 0.0 => Some(1.0 / serial_fraction),
        Workers::Infinite => Some(f64::INFINITY),
    }
}

/// `value` as a percentage of `baseline`.
#[must_use]
pub fn relative_percent(value: f64, baseline: f64) -> Option<f64> {
    (baseline > 0.0).then(|| value / baseline * 100.0)
}

/// Unweighted arithmetic mean of the defined values.
///
/// Used to pool serial fractions across input sizes: each size counts once,
/// whatever its run time.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unweighted_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let defined: Vec<f64> = values.into_iter().flatten().collect();
    if defined.is_empty() {
        None
    } else {
        Some(defined.iter().sum::<f64>() / defined.len() as f64)
    }
}
