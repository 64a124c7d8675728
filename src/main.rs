//! lcs-perf command line
//!
//! ```text
//! lcs-perf report      --preset omp             # tables, manifest, stats files
//! lcs-perf simulate    --preset cpu --seed 7    # synthetic log tree
//! lcs-perf show-config --preset mpi             # JSON configuration to start from
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lcs_perf::config::{PipelineConfig, Preset};
use lcs_perf::simulate::{SimulationProfile, Simulator};
use lcs_perf::{pipeline, report};

#[derive(Parser)]
#[command(name = "lcs-perf")]
#[command(about = "Statistics, speedup and Amdahl tables from LCS benchmark logs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Warnings and errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a log tree and write the report
    Report {
        #[command(flatten)]
        source: ConfigSource,

        /// Do not print the tables on stdout
        #[arg(long)]
        no_stdout: bool,
    },
    /// Write a synthetic log tree for a configuration
    Simulate {
        #[command(flatten)]
        source: ConfigSource,

        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Serial share of the simulated work
        #[arg(long, default_value_t = 0.05)]
        serial_fraction: f64,

        /// Relative run-to-run noise
        #[arg(long, default_value_t = 0.1)]
        noise: f64,
    },
    /// Print the effective configuration as JSON
    ShowConfig {
        #[command(flatten)]
        source: ConfigSource,
    },
}

#[derive(Args)]
struct ConfigSource {
    /// Built-in report layout
    #[arg(short, long, value_enum, default_value = "omp", conflicts_with = "config")]
    preset: Preset,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the log tree root
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Override the output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Override the number of runs per configuration
    #[arg(long)]
    runs: Option<u32>,
}

impl ConfigSource {
    fn load(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => self.preset.config(),
        };
        if let Some(dir) = &self.base_dir {
            config.base_dir.clone_from(dir);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lcs_perf={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Report { source, no_stdout } => {
            let config = source.load()?;
            let report = pipeline::run(&config)
                .with_context(|| format!("building report {:?}", config.name))?;
            let written = report::write_report(&report)
                .with_context(|| format!("writing report to {}", config.output_dir.display()))?;
            if !no_stdout {
                println!("{}", report::render_text(&report));
            }
            info!(
                tables = written.tables.len(),
                manifest = %written.manifest.display(),
                "done"
            );
        }
        Command::Simulate {
            source,
            seed,
            serial_fraction,
            noise,
        } => {
            let config = source.load()?;
            let profile = SimulationProfile {
                serial_fraction,
                noise,
                ..SimulationProfile::default()
            };
            let files = Simulator::new(profile, seed)
                .write_tree(&config)
                .with_context(|| format!("simulating into {}", config.base_dir.display()))?;
            println!("wrote {files} log files under {}", config.base_dir.display());
        }
        Command::ShowConfig { source } => {
            println!("{}", source.load()?.to_json_pretty()?);
        }
    }
    Ok(())
}
