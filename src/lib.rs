//! # lcs-perf: Benchmark Log Analysis for LCS Runs
//!
//! **Version**: 0.1.0
//!
//! lcs-perf turns the log trees produced by repeated sequential, threaded
//! and MPI runs of a Longest-Common-Subsequence program into statistics,
//! speedup, efficiency and Amdahl's-law tables.
//!
//! ## Pipeline
//!
//! - **parser**: log text to [`experiment::RawMeasurement`]
//! - **collect**: log tree to [`experiment::RunGrid`]
//! - **stats**: run sets to mean and population standard deviation
//! - **metrics**: speedup, efficiency, serial fraction, Amdahl bounds
//! - **table**: declarative views to formatted [`table::Table`]s
//! - **report**: CSV, statistics files, manifest, terminal text
//!
//! Every stage after collection is a pure function of the previous one.
//! Missing data is a state, not an error: undefined values render as `N/A`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lcs_perf::config::Preset;
//! use lcs_perf::{pipeline, report};
//!
//! let config = Preset::Omp.config();
//! let report = pipeline::run(&config)?;
//! report::write_report(&report)?;
//! println!("{}", report::render_text(&report));
//! # Ok::<(), lcs_perf::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod collect;
pub mod config;
pub mod error;
pub mod experiment;
pub mod metrics;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod simulate;
pub mod stats;
pub mod table;

pub use error::{Error, Result};
