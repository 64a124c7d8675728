//! Benchmark experiment schema
//!
//! The data model every later stage consumes.
//!
//! ## Schema Overview
//!
//! ```text
//! RunGrid (1) ──< ExperimentKey (size, workers) ──> RunSet (1) ──< RawMeasurement (N)
//!     │
//!     └──< size ──> RunSet [dedicated sequential runs, optional]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lcs_perf::experiment::{ExperimentKey, Field, Mode, RawMeasurement, RunGrid, RunSet};
//!
//! let mut runs = RunSet::new();
//! runs.push(RawMeasurement::combined(Mode::Parallel, 2.5, 42));
//! runs.push(RawMeasurement::combined(Mode::Parallel, 2.7, 42));
//!
//! let mut grid = RunGrid::new();
//! grid.insert(ExperimentKey::new("1000", 4), runs);
//!
//! let set = grid.get(&ExperimentKey::new("1000", 4)).unwrap();
//! assert_eq!(set.values(Field::TotalTime), vec![2.5, 2.7]);
//! ```

mod key;
mod measurement;
mod run_set;
mod store;

pub use key::ExperimentKey;
pub use measurement::{Field, Mode, RawMeasurement, RawMeasurementBuilder};
pub use run_set::RunSet;
pub use store::RunGrid;
