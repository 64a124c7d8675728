//! Cell formatting

use crate::metrics::Workers;
use crate::stats::SummaryStats;

/// Rendering of an undefined value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendering of the unbounded speedup.
pub const INFINITY: &str = "∞";

/// `"<mean> (±<std>)"` or `N/A`.
///
/// # Example
///
/// ```
/// use lcs_perf::stats::SummaryStats;
/// use lcs_perf::table::format::mean_std;
///
/// let stats = SummaryStats::from_values(&[1.0, 3.0]);
/// assert_eq!(mean_std(stats.as_ref(), 3), "2.000 (±1.000)");
/// assert_eq!(mean_std(None, 3), "N/A");
/// ```
#[must_use]
pub fn mean_std(stats: Option<&SummaryStats>, places: usize) -> String {
    stats.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |s| format!("{:.places$} (±{:.places$})", s.mean, s.std),
    )
}

/// Fixed-point value, `∞` for the infinite sentinel, `N/A` when undefined.
#[must_use]
pub fn value(v: Option<f64>, places: usize) -> String {
    match v {
        None => NOT_AVAILABLE.to_string(),
        Some(v) if v.is_infinite() && v > 0.0 => INFINITY.to_string(),
        Some(v) if !v.is_finite() => NOT_AVAILABLE.to_string(),
        Some(v) => format!("{v:.places$}"),
    }
}

/// Like [`value`] with an `x` suffix on finite ratios.
#[must_use]
pub fn ratio(v: Option<f64>, places: usize) -> String {
    suffixed(v, places, 'x')
}

/// Like [`value`] with a `%` suffix on finite values.
#[must_use]
pub fn percent(v: Option<f64>, places: usize) -> String {
    suffixed(v, places, '%')
}

fn suffixed(v: Option<f64>, places: usize, suffix: char) -> String {
    let mut out = value(v, places);
    if v.is_some_and(f64::is_finite) {
        out.push(suffix);
    }
    out
}

/// Row/column label of a worker count.
#[must_use]
pub fn workers_label(workers: Workers) -> String {
    match workers {
        Workers::Finite(1) => "1 worker".to_string(),
        other => format!("{other} workers"),
    }
}
