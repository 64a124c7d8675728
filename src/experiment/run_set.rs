//! Run Set - repeated runs of one configuration

use serde::{Deserialize, Serialize};

use super::{Field, RawMeasurement};

/// The measurements collected for one configuration.
///
/// Runs are kept in run-index order. A run whose log is missing or
/// unparsable is simply absent, so `len()` may be below the configured
/// run count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSet {
    runs: Vec<RawMeasurement>,
}

impl RunSet {
    /// Create an empty run set.
    #[must_use]
    pub const fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Append a run.
    pub fn push(&mut self, run: RawMeasurement) {
        self.runs.push(run);
    }

    /// Number of usable runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// True when no run could be used.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Iterate over the runs in run-index order.
    pub fn iter(&self) -> impl Iterator<Item = &RawMeasurement> {
        self.runs.iter()
    }

    /// Present values of one field, absent ones skipped.
    #[must_use]
    pub fn values(&self, field: Field) -> Vec<f64> {
        self.runs.iter().filter_map(|run| run.value(field)).collect()
    }
}

impl FromIterator<RawMeasurement> for RunSet {
    fn from_iter<I: IntoIterator<Item = RawMeasurement>>(iter: I) -> Self {
        Self {
            runs: iter.into_iter().collect(),
        }
    }
}
