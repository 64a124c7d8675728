//! Declarative table views

use serde::{Deserialize, Serialize};

use crate::experiment::Field;

/// One named table to emit.
///
/// A view is data: which projection of the analysis to take, over which
/// input sizes. Serialized flat, with the projection tagged by `view`:
///
/// ```json
/// { "name": "speedup", "title": "Observed speedup", "view": "speedup" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// File stem of the emitted table
    pub name: String,
    /// Human-readable caption
    pub title: String,
    /// Projection to render
    #[serde(flatten)]
    pub kind: ViewKind,
    /// Input sizes to include, every configured size when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
}

impl ViewSpec {
    /// Create a view over every configured size.
    pub fn new(name: impl Into<String>, title: impl Into<String>, kind: ViewKind) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind,
            sizes: None,
        }
    }

    /// Restrict the view to a subset of sizes.
    #[must_use]
    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = Some(sizes.into_iter().map(Into::into).collect());
        self
    }

    /// Keep the configured sizes this view selects, in configured order.
    #[must_use]
    pub fn select_sizes(&self, configured: &[String]) -> Vec<String> {
        match &self.sizes {
            Some(wanted) => configured
                .iter()
                .filter(|size| wanted.contains(size))
                .cloned()
                .collect(),
            None => configured.to_vec(),
        }
    }
}

/// Projection a view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewKind {
    /// Worker rows by size columns of one field's mean and std.
    ///
    /// `relative` adds a `<size> %` column after each size holding the mean
    /// as a percentage of the size's baseline mean.
    Times {
        /// Field to tabulate
        field: Field,
        /// Emit percentage-of-baseline columns
        #[serde(default)]
        relative: bool,
    },
    /// Size rows with the baseline time of each size.
    Sequential,
    /// Size rows by worker columns of observed speedup.
    Speedup,
    /// Size rows by worker columns of parallel efficiency.
    Efficiency,
    /// Worker rows plus `∞ workers` with the pooled serial fraction and
    /// the theoretical speedup bound.
    Amdahl,
    /// Size rows with the serial fraction and the theoretical speedup at
    /// each listed worker count and in the limit.
    AmdahlBySize {
        /// Worker counts to project onto
        workers: Vec<u32>,
    },
    /// Size rows comparing the baseline with one worker count.
    Comparison {
        /// Worker count compared against the baseline
        workers: u32,
    },
}
