//! Per-configuration statistics files

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::experiment::Field;
use crate::stats::{CellSummary, SummaryStats};
use crate::table::format::NOT_AVAILABLE;

/// Plain-text statistics of one configuration.
///
/// ```text
/// Statistics for size=1000, workers=8
/// Total time: 0.512000 ± 0.004000s
/// Parallel time: 0.480000 ± 0.003000s
/// Sequential time: 0.032000 ± 0.001000s
/// Sequential fraction: 0.062500
/// Score: 412.00 ± 0.00
/// ```
#[must_use]
pub fn stats_text(cell: &CellSummary) -> String {
    let mut out = format!("Statistics for {}\n", cell.key());
    for field in Field::ALL {
        let line = match (cell.field(field), field.is_time()) {
            (None, _) => NOT_AVAILABLE.to_string(),
            (Some(s), true) => format!("{:.6} ± {:.6}s", s.mean, s.std),
            (Some(s), false) => format!("{:.2} ± {:.2}", s.mean, s.std),
        };
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}: {line}", field.label());
        if field == Field::SequentialTime {
            let fraction = cell
                .serial_fraction()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |f| format!("{f:.6}"));
            let _ = writeln!(out, "Sequential fraction: {fraction}");
        }
    }
    out
}

/// `{"mean": .., "std": ..}`, both `null` when undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanStd {
    /// Mean, if any run was usable
    pub mean: Option<f64>,
    /// Population standard deviation, if any run was usable
    pub std: Option<f64>,
}

impl From<Option<&SummaryStats>> for MeanStd {
    fn from(stats: Option<&SummaryStats>) -> Self {
        Self {
            mean: stats.map(|s| s.mean),
            std: stats.map(|s| s.std),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{ExperimentKey, RawMeasurement, RunSet};
    use crate::stats::aggregate;

    #[test]
    fn test_stats_text_lines() {
        let runs: RunSet = vec![
            RawMeasurement::split(2.0, 1.5, 0.5, 10),
            RawMeasurement::split(4.0, 3.5, 0.5, 10),
        ]
        .into_iter()
        .collect();
        let text = stats_text(&aggregate(ExperimentKey::new("1000", 8), &runs));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Statistics for size=1000, workers=8",
                "Total time: 3.000000 ± 1.000000s",
                "Parallel time: 2.500000 ± 1.000000s",
                "Sequential time: 0.500000 ± 0.000000s",
                "Sequential fraction: 0.166667",
                "Score: 10.00 ± 0.00",
            ]
        );
    }

    #[test]
    fn test_stats_text_for_empty_cell() {
        let text = stats_text(&aggregate(ExperimentKey::new("100", 2), &RunSet::new()));
        assert!(text.contains("Total time: N/A"));
        assert!(text.contains("Sequential fraction: N/A"));
    }

    #[test]
    fn test_mean_std_json() {
        let stats = SummaryStats::from_values(&[1.0, 3.0]);
        let json = serde_json::to_string(&MeanStd::from(stats.as_ref())).unwrap();
        assert_eq!(json, r#"{"mean":2.0,"std":1.0}"#);

        let empty = serde_json::to_string(&MeanStd::from(None)).unwrap();
        assert_eq!(empty, r#"{"mean":null,"std":null}"#);
    }
}
