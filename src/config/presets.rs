//! Built-in report layouts

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{LogLayout, PipelineConfig};
use crate::experiment::Field;
use crate::metrics::SpeedupBasis;
use crate::parser::LogShape;
use crate::table::{Precision, ViewKind, ViewSpec};

/// Built-in configuration for one of the benchmark campaigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Threaded runs with split timing logs, 1 to 32 threads
    Omp,
    /// MPI runs on paired sequence lengths, 1 to 6 processes
    Mpi,
    /// Threaded runs with dedicated sequential logs per size
    Cpu,
}

const THREAD_SIZES: [&str; 7] = ["100", "1000", "10000", "100000", "110000", "120000", "130000"];
const SMALL_SIZES: [&str; 3] = ["100", "1000", "10000"];
const LARGE_SIZES: [&str; 4] = ["100000", "110000", "120000", "130000"];

impl Preset {
    /// Materialise the configuration.
    #[must_use]
    pub fn config(self) -> PipelineConfig {
        match self {
            Self::Omp => omp(),
            Self::Mpi => mpi(),
            Self::Cpu => cpu(),
        }
    }
}

fn labels(sizes: &[&str]) -> Vec<String> {
    sizes.iter().map(ToString::to_string).collect()
}

fn parallel_times(relative: bool) -> ViewKind {
    ViewKind::Times {
        field: Field::ParallelTime,
        relative,
    }
}

fn omp() -> PipelineConfig {
    PipelineConfig {
        name: "omp".to_string(),
        base_dir: PathBuf::from("logs"),
        output_dir: PathBuf::from("results"),
        sizes: labels(&THREAD_SIZES),
        workers: vec![1, 2, 4, 8, 12, 16, 32],
        runs: 20,
        shape: LogShape::Split,
        layout: LogLayout {
            run_file: "{run}.log".to_string(),
            sequential_file: None,
            stats_file: Some("stats.txt".to_string()),
            json_stats: false,
        },
        speedup: SpeedupBasis {
            baseline: Field::SequentialTime,
            measured: Field::ParallelTime,
        },
        precision: Precision::default(),
        views: vec![
            ViewSpec::new("sequential", "Sequential execution time", ViewKind::Sequential),
            ViewSpec::new("parallel_all", "Parallel time, all inputs", parallel_times(false)),
            ViewSpec::new("parallel_small", "Parallel time, small inputs", parallel_times(true))
                .with_sizes(SMALL_SIZES),
            ViewSpec::new("parallel_large", "Parallel time, large inputs", parallel_times(true))
                .with_sizes(LARGE_SIZES),
            ViewSpec::new(
                "amdahl",
                "Amdahl's law speedup bound per input",
                ViewKind::AmdahlBySize {
                    workers: vec![2, 4, 8],
                },
            ),
            ViewSpec::new("speedup", "Observed speedup", ViewKind::Speedup),
            ViewSpec::new("efficiency", "Parallel efficiency", ViewKind::Efficiency),
        ],
    }
}

fn mpi() -> PipelineConfig {
    PipelineConfig {
        name: "mpi".to_string(),
        base_dir: PathBuf::from("logsmpi"),
        output_dir: PathBuf::from("results_logsmpi"),
        sizes: labels(&["10k_10k", "20k_20k", "30k_30k", "40k_40k"]),
        workers: vec![1, 2, 4, 6],
        runs: 50,
        shape: LogShape::Combined,
        layout: LogLayout {
            run_file: "{run}.log".to_string(),
            sequential_file: None,
            stats_file: Some("statistics.txt".to_string()),
            json_stats: false,
        },
        speedup: SpeedupBasis::default(),
        precision: Precision::default(),
        views: vec![
            ViewSpec::new(
                "general_results",
                "Total time (s)",
                ViewKind::Times {
                    field: Field::TotalTime,
                    relative: false,
                },
            ),
            ViewSpec::new("theoretical_speedup", "Amdahl's law projection", ViewKind::Amdahl),
            ViewSpec::new("observed_speedup", "Observed speedup", ViewKind::Speedup),
            ViewSpec::new("efficiency", "Parallel efficiency", ViewKind::Efficiency),
        ],
    }
}

fn cpu() -> PipelineConfig {
    PipelineConfig {
        name: "cpu".to_string(),
        base_dir: PathBuf::from("logscpu1"),
        output_dir: PathBuf::from("results_logscpu1"),
        sizes: labels(&THREAD_SIZES),
        workers: vec![2, 4, 8, 12, 16, 32],
        runs: 20,
        shape: LogShape::Combined,
        layout: LogLayout {
            run_file: "parallel_{run}.log".to_string(),
            sequential_file: Some("sequential_{run}.log".to_string()),
            stats_file: None,
            json_stats: true,
        },
        speedup: SpeedupBasis::default(),
        precision: Precision {
            time: 6,
            ..Precision::default()
        },
        views: vec![
            ViewSpec::new(
                "sequential_results",
                "Sequential execution time",
                ViewKind::Sequential,
            ),
            ViewSpec::new(
                "parallel_results_all",
                "Parallel time, all inputs",
                times(),
            ),
            ViewSpec::new("parallel_results_small", "Parallel time, small inputs", times())
                .with_sizes(SMALL_SIZES),
            ViewSpec::new("parallel_results_large", "Parallel time, large inputs", times())
                .with_sizes(LARGE_SIZES),
            ViewSpec::new(
                "comparison_12_threads",
                "Sequential vs parallel, 12 workers",
                ViewKind::Comparison { workers: 12 },
            ),
        ],
    }
}

/// Combined-shape parallel logs carry their time as the total.
fn times() -> ViewKind {
    ViewKind::Times {
        field: Field::TotalTime,
        relative: false,
    }
}
