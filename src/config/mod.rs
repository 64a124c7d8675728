//! Report configuration
//!
//! One [`PipelineConfig`] describes a complete report: where the logs live,
//! which grammar they follow, the grid of sizes and worker counts, how
//! speedups are measured and which tables to emit. Configurations come from
//! a built-in [`Preset`] or a JSON file.
//!
//! ## Log layout
//!
//! ```text
//! <base_dir>/
//!   <size>/
//!     <workers>/
//!       <run_file>          one per run index, `{run}` replaced by 1..=runs
//!       <sequential_file>   dedicated sequential runs (first worker dir only)
//!       <stats_file>        written back by the report
//! ```

mod presets;

pub use presets::Preset;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::experiment::Field;
use crate::metrics::SpeedupBasis;
use crate::parser::LogShape;
use crate::table::{Precision, ViewKind, ViewSpec};
use crate::{Error, Result};

/// Placeholder substituted with the run index in file templates.
pub const RUN_PLACEHOLDER: &str = "{run}";

/// File names inside a configuration directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLayout {
    /// Template of a run's log file name
    pub run_file: String,
    /// Template of a dedicated sequential run's log file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequential_file: Option<String>,
    /// Name of the statistics summary written per configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_file: Option<String>,
    /// Write `sequential_stats.json` and `parallel_stats.json` per configuration
    #[serde(default)]
    pub json_stats: bool,
}

impl Default for LogLayout {
    fn default() -> Self {
        Self {
            run_file: "{run}.log".to_string(),
            sequential_file: None,
            stats_file: None,
            json_stats: false,
        }
    }
}

/// Complete description of one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Report name, recorded in the manifest
    pub name: String,
    /// Root of the log tree
    pub base_dir: PathBuf,
    /// Where tables and the manifest are written
    pub output_dir: PathBuf,
    /// Input size labels, in report order
    pub sizes: Vec<String>,
    /// Worker counts, strictly ascending
    pub workers: Vec<u32>,
    /// Runs per configuration
    pub runs: u32,
    /// Log grammar
    #[serde(default)]
    pub shape: LogShape,
    /// File names inside each configuration directory
    #[serde(default)]
    pub layout: LogLayout,
    /// Fields compared by speedups
    #[serde(default)]
    pub speedup: SpeedupBasis,
    /// Decimal places
    #[serde(default)]
    pub precision: Precision,
    /// Tables to emit, a default set when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<ViewSpec>,
}

impl PipelineConfig {
    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` or `Error::Json` when the file cannot be read or
    /// parsed, `Error::InvalidConfig` when it fails [`validate`](Self::validate).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON form.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the configuration before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return invalid("at least one input size is required");
        }
        if let Some(dup) = first_duplicate(self.sizes.iter().map(String::as_str)) {
            return invalid(format!("input size {dup:?} is listed twice"));
        }
        if self.workers.is_empty() {
            return invalid("at least one worker count is required");
        }
        if self.workers.contains(&0) {
            return invalid("worker counts must be positive");
        }
        if self.workers.windows(2).any(|w| w[0] >= w[1]) {
            return invalid(format!(
                "worker counts must be strictly ascending, got {:?}",
                self.workers
            ));
        }
        if self.runs == 0 {
            return invalid("runs must be positive");
        }
        check_template("run_file", &self.layout.run_file)?;
        if let Some(template) = &self.layout.sequential_file {
            check_template("sequential_file", template)?;
        }
        if self.precision.time > 12 || self.precision.ratio > 12 || self.precision.fraction > 12 {
            return invalid("precision is limited to 12 decimal places");
        }

        let views = self.effective_views();
        if let Some(dup) = first_duplicate(views.iter().map(|v| v.name.as_str())) {
            return invalid(format!("view name {dup:?} is used twice"));
        }
        for view in &views {
            self.check_view(view)?;
        }
        Ok(())
    }

    fn check_view(&self, view: &ViewSpec) -> Result<()> {
        if view.name.trim().is_empty() {
            return invalid("view names must not be empty");
        }
        if let Some(sizes) = &view.sizes {
            if let Some(unknown) = sizes.iter().find(|s| !self.sizes.contains(s)) {
                return invalid(format!(
                    "view {:?} selects unconfigured size {unknown:?}",
                    view.name
                ));
            }
        }
        match &view.kind {
            ViewKind::Comparison { workers } if !self.workers.contains(workers) => invalid(format!(
                "view {:?} compares against unconfigured worker count {workers}",
                view.name
            )),
            ViewKind::AmdahlBySize { workers } if workers.is_empty() || workers.contains(&0) => {
                invalid(format!(
                    "view {:?} needs positive worker counts to project onto",
                    view.name
                ))
            }
            _ => Ok(()),
        }
    }

    /// Views to emit: the configured ones, or a default set.
    #[must_use]
    pub fn effective_views(&self) -> Vec<ViewSpec> {
        if !self.views.is_empty() {
            return self.views.clone();
        }
        vec![
            ViewSpec::new(
                "times",
                "Total time (s)",
                ViewKind::Times {
                    field: Field::TotalTime,
                    relative: false,
                },
            ),
            ViewSpec::new("speedup", "Observed speedup", ViewKind::Speedup),
            ViewSpec::new("efficiency", "Parallel efficiency", ViewKind::Efficiency),
            ViewSpec::new("amdahl", "Amdahl's law projection", ViewKind::Amdahl),
        ]
    }

    /// Directory of one configuration.
    #[must_use]
    pub fn cell_dir(&self, size: &str, workers: u32) -> PathBuf {
        self.base_dir.join(size).join(workers.to_string())
    }

    /// Log file of one run.
    #[must_use]
    pub fn run_path(&self, size: &str, workers: u32, run: u32) -> PathBuf {
        self.cell_dir(size, workers)
            .join(fill(&self.layout.run_file, run))
    }

    /// Log file of one dedicated sequential run, if the layout has them.
    ///
    /// These live in the directory of the first configured worker count.
    #[must_use]
    pub fn sequential_path(&self, size: &str, run: u32) -> Option<PathBuf> {
        let template = self.layout.sequential_file.as_deref()?;
        let first = *self.workers.first()?;
        Some(self.cell_dir(size, first).join(fill(template, run)))
    }

    /// Statistics file of one configuration, if the layout writes them.
    #[must_use]
    pub fn stats_path(&self, size: &str, workers: u32) -> Option<PathBuf> {
        let name = self.layout.stats_file.as_deref()?;
        Some(self.cell_dir(size, workers).join(name))
    }
}

fn fill(template: &str, run: u32) -> String {
    template.replace(RUN_PLACEHOLDER, &run.to_string())
}

fn check_template(what: &str, template: &str) -> Result<()> {
    if template.contains(RUN_PLACEHOLDER) {
        Ok(())
    } else {
        invalid(format!(
            "{what} template {template:?} lacks the {RUN_PLACEHOLDER} placeholder"
        ))
    }
}

fn first_duplicate<'a>(items: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    items.into_iter().find(|item| !seen.insert(*item))
}

fn invalid<T>(reason: impl Into<String>) -> Result<T> {
    Err(Error::InvalidConfig(reason.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig {
            name: "test".to_string(),
            base_dir: PathBuf::from("logs"),
            output_dir: PathBuf::from("out"),
            sizes: vec!["100".to_string(), "1000".to_string()],
            workers: vec![1, 2, 4],
            runs: 3,
            shape: LogShape::Auto,
            layout: LogLayout::default(),
            speedup: SpeedupBasis::default(),
            precision: Precision::default(),
            views: Vec::new(),
        }
    }

    fn rejects(config: &PipelineConfig, needle: &str) {
        match config.validate() {
            Err(Error::InvalidConfig(reason)) => {
                assert!(reason.contains(needle), "{reason:?} lacks {needle:?}");
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
        assert_eq!(config().effective_views().len(), 4);
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        let mut c = config();
        c.sizes.clear();
        rejects(&c, "input size");

        let mut c = config();
        c.workers.clear();
        rejects(&c, "worker count");

        let mut c = config();
        c.runs = 0;
        rejects(&c, "runs");
    }

    #[test]
    fn test_rejects_unordered_or_zero_workers() {
        let mut c = config();
        c.workers = vec![1, 4, 2];
        rejects(&c, "ascending");

        let mut c = config();
        c.workers = vec![1, 1];
        rejects(&c, "ascending");

        let mut c = config();
        c.workers = vec![0, 1];
        rejects(&c, "positive");
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let mut c = config();
        c.layout.run_file = "run.log".to_string();
        rejects(&c, "run_file");

        let mut c = config();
        c.layout.sequential_file = Some("seq.log".to_string());
        rejects(&c, "sequential_file");
    }

    #[test]
    fn test_rejects_bad_views() {
        let mut c = config();
        c.views = vec![ViewSpec::new("cmp", "Cmp", ViewKind::Comparison { workers: 8 })];
        rejects(&c, "worker count 8");

        let mut c = config();
        c.views = vec![
            ViewSpec::new("a", "A", ViewKind::Speedup),
            ViewSpec::new("a", "A", ViewKind::Efficiency),
        ];
        rejects(&c, "used twice");

        let mut c = config();
        c.views = vec![ViewSpec::new("a", "A", ViewKind::Speedup).with_sizes(["5"])];
        rejects(&c, "unconfigured size");
    }

    #[test]
    fn test_paths() {
        let mut c = config();
        assert_eq!(c.run_path("100", 2, 7), PathBuf::from("logs/100/2/7.log"));
        assert!(c.sequential_path("100", 1).is_none());
        assert!(c.stats_path("100", 1).is_none());

        c.workers = vec![2, 4];
        c.layout.sequential_file = Some("sequential_{run}.log".to_string());
        c.layout.stats_file = Some("stats.txt".to_string());
        assert_eq!(
            c.sequential_path("100", 3),
            Some(PathBuf::from("logs/100/2/sequential_3.log"))
        );
        assert_eq!(
            c.stats_path("1000", 4),
            Some(PathBuf::from("logs/1000/4/stats.txt"))
        );
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "name": "minimal",
            "base_dir": "logs",
            "output_dir": "out",
            "sizes": ["10"],
            "workers": [1, 2],
            "runs": 5
        }"#;
        let c: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.shape, LogShape::Auto);
        assert_eq!(c.layout, LogLayout::default());
        assert_eq!(c.speedup, SpeedupBasis::default());
        assert_eq!(c.precision, Precision::default());
        assert!(c.validate().is_ok());
    }
}
