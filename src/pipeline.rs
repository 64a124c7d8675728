//! Report pipeline
//!
//! ```text
//! PipelineConfig
//!      │ collect        (fs reads, parser)
//!      ▼
//! RunGrid ──aggregate──▶ SummaryGrid ──derive──▶ MetricGrid
//!                             │                      │
//!                             └──project──▶ AmdahlProjection
//!                                        │
//!                     build_table(view)  ▼
//!                                    Vec<Table>  ──▶ report sinks
//! ```
//!
//! Each stage is a pure function of the previous one; only `collect` touches
//! the filesystem.

use tracing::info;

use crate::collect::{collect, CollectStats};
use crate::config::PipelineConfig;
use crate::experiment::RunGrid;
use crate::metrics::{AmdahlProjection, MetricGrid, SpeedupBasis};
use crate::stats::SummaryGrid;
use crate::table::{build_table, Table};
use crate::{Error, Result};

/// Aggregated statistics and derived metrics of one report.
#[derive(Debug, Clone)]
pub struct Analysis {
    summaries: SummaryGrid,
    metrics: MetricGrid,
    amdahl: AmdahlProjection,
}

impl Analysis {
    /// Aggregate a run grid and derive every metric from it.
    #[must_use]
    pub fn from_runs(
        runs: &RunGrid,
        sizes: &[String],
        workers: &[u32],
        basis: SpeedupBasis,
    ) -> Self {
        let summaries = SummaryGrid::build(runs, sizes, workers);
        let metrics = MetricGrid::derive(&summaries, basis);
        let amdahl = AmdahlProjection::project(&summaries, summaries.sizes());
        Self {
            summaries,
            metrics,
            amdahl,
        }
    }

    /// Per-configuration summaries.
    #[must_use]
    pub const fn summaries(&self) -> &SummaryGrid {
        &self.summaries
    }

    /// Speedup and efficiency per configuration.
    #[must_use]
    pub const fn metrics(&self) -> &MetricGrid {
        &self.metrics
    }

    /// Amdahl projection pooled over every configured size.
    #[must_use]
    pub const fn amdahl(&self) -> &AmdahlProjection {
        &self.amdahl
    }
}

/// Everything a report run produced, ready for the sinks.
#[derive(Debug, Clone)]
pub struct Report {
    config: PipelineConfig,
    collected: CollectStats,
    analysis: Analysis,
    tables: Vec<Table>,
}

impl Report {
    /// Configuration the report was built from.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Collection counters.
    #[must_use]
    pub const fn collected(&self) -> &CollectStats {
        &self.collected
    }

    /// Statistics and metrics.
    #[must_use]
    pub const fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// Rendered tables, in view order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Look up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Validate, collect, analyze and tabulate.
///
/// # Errors
///
/// Returns `Error::InvalidConfig` before any I/O when the configuration is
/// rejected, and `Error::NoData` when no configuration yielded a run.
pub fn run(config: &PipelineConfig) -> Result<Report> {
    config.validate()?;
    let (runs, collected) = collect(config)?;
    analyze(config, &runs, collected)
}

/// Build a report from runs already in memory.
///
/// # Errors
///
/// Returns `Error::NoData` when every configuration is empty.
pub fn analyze(config: &PipelineConfig, runs: &RunGrid, collected: CollectStats) -> Result<Report> {
    let analysis = Analysis::from_runs(runs, &config.sizes, &config.workers, config.speedup);
    if !analysis.summaries().has_data() {
        return Err(Error::NoData(config.base_dir.clone()));
    }

    let tables: Vec<Table> = config
        .effective_views()
        .iter()
        .map(|view| build_table(view, &analysis, &config.precision))
        .collect();

    info!(
        report = %config.name,
        configurations = analysis.summaries().populated(),
        tables = tables.len(),
        "analysis complete"
    );

    Ok(Report {
        config: config.clone(),
        collected,
        analysis,
        tables,
    })
}
