//! Synthetic log trees
//!
//! Writes a deterministic (seeded) log tree for a configuration, in the
//! grammar and layout the configuration expects. Timings follow Amdahl's
//! law with a fixed serial share and multiplicative Gaussian noise, so the
//! reports built from them show realistic speedup curves.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::PipelineConfig;
use crate::parser::LogShape;
use crate::{Error, Result};

/// Timing model of the simulated program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationProfile {
    /// Single-worker seconds per unit of problem size
    pub seconds_per_unit: f64,
    /// Share of the work that does not parallelize, in `[0, 1]`
    pub serial_fraction: f64,
    /// Relative standard deviation of the run-to-run noise
    pub noise: f64,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            seconds_per_unit: 1.1e-7,
            serial_fraction: 0.05,
            noise: 0.1,
        }
    }
}

/// One simulated run.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Timing {
    sequential: f64,
    parallel: f64,
}

impl Timing {
    fn total(self) -> f64 {
        self.sequential + self.parallel
    }
}

/// Numeric problem size of a label: `1000` or `10k_10k` (first component).
///
/// # Errors
///
/// Returns `Error::InvalidConfig` when the label does not start with a number.
pub fn problem_size(label: &str) -> Result<f64> {
    let re = Regex::new(r"^(\d+)([kK]?)")?;
    let caps = re.captures(label).ok_or_else(|| {
        Error::InvalidConfig(format!("cannot derive a problem size from label {label:?}"))
    })?;
    let base: f64 = caps[1]
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("size label {label:?} is out of range")))?;
    Ok(if caps[2].is_empty() { base } else { base * 1000.0 })
}

/// Writes simulated logs for one configuration.
pub struct Simulator {
    profile: SimulationProfile,
    rng: StdRng,
}

impl Simulator {
    /// Create a simulator with a fixed seed.
    #[must_use]
    pub fn new(profile: SimulationProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Write every file the configuration expects; returns the file count.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for a rejected configuration or an
    /// unusable size label, `Error::Io` when a file cannot be written.
    pub fn write_tree(&mut self, config: &PipelineConfig) -> Result<usize> {
        config.validate()?;
        if !(0.0..=1.0).contains(&self.profile.serial_fraction) {
            return Err(Error::InvalidConfig(
                "simulated serial fraction must lie in [0, 1]".to_string(),
            ));
        }

        let mut written = 0;
        for size in &config.sizes {
            let units = problem_size(size)?;
            for &workers in &config.workers {
                fs::create_dir_all(config.cell_dir(size, workers))?;
                for run in 1..=config.runs {
                    let timing = self.timing(units, workers);
                    let text = render(config.shape, timing, workers, score(units));
                    write(&config.run_path(size, workers, run), &text)?;
                    written += 1;
                }
            }
            for run in 1..=config.runs {
                if let Some(path) = config.sequential_path(size, run) {
                    let timing = self.timing(units, 1);
                    let text = format!("SEQUENTIAL: {:.6}s\nScore: {}\n", timing.total(), score(units));
                    write(&path, &text)?;
                    written += 1;
                }
            }
        }

        info!(base = %config.base_dir.display(), files = written, "simulated log tree");
        Ok(written)
    }

    fn timing(&mut self, units: f64, workers: u32) -> Timing {
        let work = self.profile.seconds_per_unit * units;
        let f = self.profile.serial_fraction;
        Timing {
            sequential: work * f * self.noise(),
            parallel: work * (1.0 - f) / f64::from(workers.max(1)) * self.noise(),
        }
    }

    /// Multiplicative noise factor, `1 + noise * z` with `z ~ N(0, 1)`.
    fn noise(&mut self) -> f64 {
        // Box-Muller
        let u1: f64 = 1.0 - self.rng.gen::<f64>();
        let u2: f64 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        (self.profile.noise.mul_add(z, 1.0)).max(0.01)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score(units: f64) -> u64 {
    (units / 4.0).round() as u64
}

fn render(shape: LogShape, timing: Timing, workers: u32, score: u64) -> String {
    match shape {
        LogShape::Combined if workers == 1 => {
            format!("SEQUENTIAL: {:.6}s\nScore: {score}\n", timing.total())
        }
        LogShape::Combined => format!("PARALLEL: {:.6}s\nScore: {score}\n", timing.total()),
        LogShape::Split | LogShape::Auto => format!(
            "Total time: {:.6}s\nParallel time: {:.6}s\nSequential time: {:.6}s\nScore: {score}\n",
            timing.total(),
            timing.parallel,
            timing.sequential,
        ),
    }
}

fn write(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    #[test]
    fn test_problem_size() {
        assert_eq!(problem_size("1000").unwrap(), 1000.0);
        assert_eq!(problem_size("10k_10k").unwrap(), 10_000.0);
        assert!(matches!(problem_size("huge"), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_same_seed_same_tree() {
        let profile = SimulationProfile::default();
        let mut a = Simulator::new(profile, 7);
        let mut b = Simulator::new(profile, 7);
        for _ in 0..10 {
            assert_eq!(a.timing(1000.0, 4), b.timing(1000.0, 4));
        }
    }

    #[test]
    fn test_noise_free_timing_follows_amdahl() {
        let profile = SimulationProfile {
            seconds_per_unit: 1.0,
            serial_fraction: 0.25,
            noise: 0.0,
        };
        let mut sim = Simulator::new(profile, 1);
        let t = sim.timing(8.0, 2);
        assert!((t.sequential - 2.0).abs() < 1e-12);
        assert!((t.parallel - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_write_tree_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Preset::Cpu.config();
        config.base_dir = dir.path().to_path_buf();
        config.sizes = vec!["100".to_string()];
        config.workers = vec![2, 4];
        config.runs = 2;
        config.views.clear();

        let written = Simulator::new(SimulationProfile::default(), 3)
            .write_tree(&config)
            .unwrap();
        assert_eq!(written, 6);

        let seq = fs::read_to_string(config.sequential_path("100", 2).unwrap()).unwrap();
        assert!(seq.starts_with("SEQUENTIAL: "));
        let par = fs::read_to_string(config.run_path("100", 4, 1)).unwrap();
        assert!(par.starts_with("PARALLEL: "));
        assert!(par.ends_with("Score: 25\n"));
    }
}
