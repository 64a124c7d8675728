//! Result table builder
//!
//! Turns a [`ViewSpec`] and the analysis of one report into a [`Table`] of
//! pre-formatted strings. Tables are the only thing the sinks see.
//!
//! ```text
//! ┌──────────────┬──────────┬──────────┬──────────┐
//! │ corner       │ column 0 │ column 1 │ ...      │  header()
//! ├──────────────┼──────────┼──────────┼──────────┤
//! │ row label 0  │ cell     │ cell     │          │  rows[0]
//! │ row label 1  │ cell     │ N/A      │          │  rows[1]
//! └──────────────┴──────────┴──────────┴──────────┘
//! ```
//!
//! Rows and columns follow the configured order of sizes and worker counts,
//! never discovery order.

pub mod format;
mod view;

pub use view::{ViewKind, ViewSpec};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::experiment::Field;
use crate::metrics::{project_sizes, relative_percent, AmdahlProjection, Workers};
use crate::pipeline::Analysis;

/// Decimal places per kind of value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precision {
    /// Times (mean and std)
    pub time: usize,
    /// Speedups and efficiencies
    pub ratio: usize,
    /// Serial fractions
    pub fraction: usize,
    /// Percent-of-baseline columns
    pub percent: usize,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            time: 3,
            ratio: 2,
            fraction: 4,
            percent: 2,
        }
    }
}

/// One labelled row of formatted cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label
    pub label: String,
    /// One cell per column label
    pub cells: Vec<String>,
}

impl TableRow {
    /// Create a row.
    pub fn new(label: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            label: label.into(),
            cells,
        }
    }
}

/// Named table of formatted strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// File stem
    pub name: String,
    /// Caption
    pub title: String,
    /// Label of the row-label column
    pub corner: String,
    /// Column labels, excluding the corner
    pub column_labels: Vec<String>,
    /// Rows in display order
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Corner label followed by the column labels.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        std::iter::once(self.corner.clone())
            .chain(self.column_labels.iter().cloned())
            .collect()
    }

    /// Look up a cell by row and column label.
    #[must_use]
    pub fn cell(&self, row: &str, column: &str) -> Option<&str> {
        let col = self.column_labels.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.label == row)
            .and_then(|r| r.cells.get(col))
            .map(String::as_str)
    }

    /// Cells of one row.
    #[must_use]
    pub fn row(&self, label: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.cells.as_slice())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.header();
        let lines: Vec<Vec<&str>> =
            std::iter::once(header.iter().map(String::as_str).collect::<Vec<_>>())
                .chain(self.rows.iter().map(|row| {
                    std::iter::once(row.label.as_str())
                        .chain(row.cells.iter().map(String::as_str))
                        .collect::<Vec<_>>()
                }))
                .collect();

        let mut widths = vec![0; header.len()];
        for line in &lines {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        writeln!(f, "{}", self.title)?;
        for (i, line) in lines.iter().enumerate() {
            let padded: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| {
                    let pad = width.saturating_sub(cell.chars().count());
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect();
            writeln!(f, "{}", padded.join(" | ").trim_end())?;
            if i == 0 {
                let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
                writeln!(f, "{}", rule.join("-+-"))?;
            }
        }
        Ok(())
    }
}

const SIZE_CORNER: &str = "Input size";
const WORKERS_CORNER: &str = "Workers";

/// Render one view of an analysis.
///
/// Undefined values render as `N/A`; nothing here fails.
#[must_use]
pub fn build_table(view: &ViewSpec, analysis: &Analysis, precision: &Precision) -> Table {
    let sizes = view.select_sizes(analysis.summaries().sizes());
    let (corner, column_labels, rows) = match &view.kind {
        ViewKind::Times { field, relative } => {
            times(analysis, &sizes, *field, *relative, precision)
        }
        ViewKind::Sequential => sequential(analysis, &sizes, precision),
        ViewKind::Speedup => per_worker(analysis, &sizes, precision, |m| m.speedup),
        ViewKind::Efficiency => per_worker(analysis, &sizes, precision, |m| m.efficiency),
        ViewKind::Amdahl => amdahl(analysis, &sizes, precision),
        ViewKind::AmdahlBySize { workers } => amdahl_by_size(analysis, &sizes, workers, precision),
        ViewKind::Comparison { workers } => comparison(analysis, &sizes, *workers, precision),
    };

    Table {
        name: view.name.clone(),
        title: view.title.clone(),
        corner: corner.to_string(),
        column_labels,
        rows,
    }
}

type Parts = (&'static str, Vec<String>, Vec<TableRow>);

fn times(
    analysis: &Analysis,
    sizes: &[String],
    field: Field,
    relative: bool,
    precision: &Precision,
) -> Parts {
    let grid = analysis.summaries();
    let basis = analysis.metrics().basis();

    let mut columns = Vec::with_capacity(sizes.len() * 2);
    for size in sizes {
        columns.push(size.clone());
        if relative {
            columns.push(format!("{size} %"));
        }
    }

    let rows = grid
        .workers()
        .iter()
        .map(|&w| {
            let mut cells = Vec::with_capacity(columns.len());
            for size in sizes {
                let stats = grid.cell(size, w).and_then(|c| c.field(field));
                cells.push(format::mean_std(stats, precision.time));
                if relative {
                    let baseline = grid.baseline(size).and_then(|c| c.mean(basis.baseline));
                    let pct = stats
                        .zip(baseline)
                        .and_then(|(s, b)| relative_percent(s.mean, b));
                    cells.push(format::percent(pct, precision.percent));
                }
            }
            TableRow::new(format::workers_label(Workers::Finite(w)), cells)
        })
        .collect();

    (WORKERS_CORNER, columns, rows)
}

fn sequential(analysis: &Analysis, sizes: &[String], precision: &Precision) -> Parts {
    let grid = analysis.summaries();
    let field = analysis.metrics().basis().baseline;
    let rows = sizes
        .iter()
        .map(|size| {
            let stats = grid.baseline(size).and_then(|c| c.field(field));
            TableRow::new(size.as_str(), vec![format::mean_std(stats, precision.time)])
        })
        .collect();
    (SIZE_CORNER, vec!["Time (s)".to_string()], rows)
}

fn per_worker(
    analysis: &Analysis,
    sizes: &[String],
    precision: &Precision,
    pick: impl Fn(&crate::metrics::DerivedMetrics) -> Option<f64>,
) -> Parts {
    let workers = analysis.summaries().workers();
    let columns = workers
        .iter()
        .map(|&w| format::workers_label(Workers::Finite(w)))
        .collect();
    let rows = sizes
        .iter()
        .map(|size| {
            let cells = workers
                .iter()
                .map(|&w| {
                    let v = analysis.metrics().get(size, w).and_then(&pick);
                    format::value(v, precision.ratio)
                })
                .collect();
            TableRow::new(size.as_str(), cells)
        })
        .collect();
    (SIZE_CORNER, columns, rows)
}

fn amdahl(analysis: &Analysis, sizes: &[String], precision: &Precision) -> Parts {
    let restricted;
    let projection = if sizes == analysis.summaries().sizes() {
        analysis.amdahl()
    } else {
        restricted = AmdahlProjection::project(analysis.summaries(), sizes);
        &restricted
    };

    let rows = projection
        .rows()
        .iter()
        .chain(std::iter::once(projection.infinite()))
        .map(|row| {
            TableRow::new(
                format::workers_label(row.workers),
                vec![
                    format::value(row.serial_fraction, precision.fraction),
                    format::value(row.theoretical_speedup, precision.ratio),
                ],
            )
        })
        .collect();

    (
        WORKERS_CORNER,
        vec!["Serial fraction".to_string(), "Theoretical speedup".to_string()],
        rows,
    )
}

fn amdahl_by_size(
    analysis: &Analysis,
    sizes: &[String],
    workers: &[u32],
    precision: &Precision,
) -> Parts {
    let columns = std::iter::once("Serial fraction".to_string())
        .chain(workers.iter().map(|&w| format::workers_label(Workers::Finite(w))))
        .chain(std::iter::once(format::workers_label(Workers::Infinite)))
        .collect();

    let rows = project_sizes(analysis.summaries(), sizes, workers)
        .into_iter()
        .map(|p| {
            let cells = std::iter::once(format::value(p.serial_fraction, precision.fraction))
                .chain(p.speedups.iter().map(|&(_, s)| format::value(s, precision.ratio)))
                .chain(std::iter::once(format::value(p.infinite, precision.ratio)))
                .collect();
            TableRow::new(p.size, cells)
        })
        .collect();

    (SIZE_CORNER, columns, rows)
}

fn comparison(analysis: &Analysis, sizes: &[String], workers: u32, precision: &Precision) -> Parts {
    let grid = analysis.summaries();
    let basis = analysis.metrics().basis();
    let columns = vec![
        "Sequential time (s)".to_string(),
        format!("Parallel time (s), {}", format::workers_label(Workers::Finite(workers))),
        "Speedup".to_string(),
    ];

    let rows = sizes
        .iter()
        .map(|size| {
            let baseline = grid.baseline(size).and_then(|c| c.field(basis.baseline));
            let measured = grid.cell(size, workers).and_then(|c| c.field(basis.measured));
            let speedup = analysis.metrics().get(size, workers).and_then(|m| m.speedup);
            TableRow::new(
                size.as_str(),
                vec![
                    format::mean_std(baseline, precision.time),
                    format::mean_std(measured, precision.time),
                    format::ratio(speedup, precision.ratio),
                ],
            )
        })
        .collect();

    (SIZE_CORNER, columns, rows)
}
