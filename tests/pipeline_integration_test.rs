//! End-to-end report tests over temporary log trees
//!
//! Each test writes a log tree with `tempfile`, runs the pipeline and checks
//! the tables and files it produces.

use std::fs;
use std::path::Path;

use lcs_perf::config::{PipelineConfig, Preset};
use lcs_perf::pipeline;
use lcs_perf::report::{self, MeanStd, RunManifest};
use lcs_perf::simulate::{SimulationProfile, Simulator};
use lcs_perf::Error;
use tempfile::TempDir;

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// MPI-style configuration rooted in a fresh temporary directory.
fn mpi_config(dir: &TempDir, sizes: &[&str], workers: &[u32], runs: u32) -> PipelineConfig {
    let mut config = Preset::Mpi.config();
    config.base_dir = dir.path().join("logs");
    config.output_dir = dir.path().join("results");
    config.sizes = sizes.iter().map(ToString::to_string).collect();
    config.workers = workers.to_vec();
    config.runs = runs;
    config
}

fn write_combined(config: &PipelineConfig, size: &str, workers: u32, times: &[f64]) {
    let tag = if workers == 1 { "SEQUENTIAL" } else { "PARALLEL" };
    for (i, t) in times.iter().enumerate() {
        let run = u32::try_from(i + 1).unwrap();
        write(
            &config.run_path(size, workers, run),
            &format!("Score: 77\n{tag}: {t:.6}s\n"),
        );
    }
}

#[test]
fn test_speedup_scenario() {
    let dir = TempDir::new().unwrap();
    let config = mpi_config(&dir, &["1000"], &[1, 2, 4], 3);
    write_combined(&config, "1000", 1, &[9.0, 10.0, 11.0]);
    write_combined(&config, "1000", 2, &[4.5, 5.0, 5.5]);
    write_combined(&config, "1000", 4, &[2.0, 2.5, 3.0]);

    let report = pipeline::run(&config).unwrap();

    let speedup = report.table("observed_speedup").unwrap();
    assert_eq!(speedup.row("1000").unwrap(), ["1.00", "2.00", "4.00"]);
    let efficiency = report.table("efficiency").unwrap();
    assert_eq!(efficiency.row("1000").unwrap(), ["1.00", "1.00", "1.00"]);

    let times = report.table("general_results").unwrap();
    assert_eq!(times.cell("2 workers", "1000"), Some("5.000 (±0.408)"));
}

#[test]
fn test_missing_configuration_renders_not_available() {
    let dir = TempDir::new().unwrap();
    let config = mpi_config(&dir, &["10k_10k", "20k_20k"], &[1, 2], 20);
    let twenty = vec![2.0; 20];
    write_combined(&config, "10k_10k", 1, &twenty);
    write_combined(&config, "10k_10k", 2, &[1.0; 20]);
    write_combined(&config, "20k_20k", 1, &twenty);
    // 20k_20k with 2 workers: 0 of 20 logs present.

    let report = pipeline::run(&config).unwrap();
    assert_eq!(report.collected().missing, 20);
    assert!(report.collected().malformed.is_empty());

    let times = report.table("general_results").unwrap();
    assert_eq!(times.cell("2 workers", "20k_20k"), Some("N/A"));
    assert_eq!(times.cell("2 workers", "10k_10k"), Some("1.000 (±0.000)"));

    let speedup = report.table("observed_speedup").unwrap();
    assert_eq!(speedup.row("20k_20k").unwrap(), ["1.00", "N/A"]);
    assert_eq!(speedup.row("10k_10k").unwrap(), ["1.00", "2.00"]);
}

#[test]
fn test_malformed_log_is_skipped() {
    let dir = TempDir::new().unwrap();
    let config = mpi_config(&dir, &["10k_10k"], &[1], 20);
    write_combined(&config, "10k_10k", 1, &[3.0; 20]);
    write(&config.run_path("10k_10k", 1, 20), "Segmentation fault\n");

    let report = pipeline::run(&config).unwrap();
    assert_eq!(report.collected().parsed, 19);
    assert_eq!(
        report.collected().malformed,
        vec![config.run_path("10k_10k", 1, 20)]
    );
    let cell = report.analysis().summaries().cell("10k_10k", 1).unwrap();
    assert_eq!(cell.runs(), 19);
}

#[test]
fn test_empty_tree_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let config = mpi_config(&dir, &["10k_10k"], &[1, 2], 5);

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, Error::NoData(_)));
    assert!(!config.output_dir.exists());
}

#[test]
fn test_report_files_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = mpi_config(&dir, &["10k_10k", "20k_20k"], &[1, 2, 4], 4);
    Simulator::new(SimulationProfile::default(), 11)
        .write_tree(&config)
        .unwrap();

    let report = pipeline::run(&config).unwrap();
    let written = report::write_report(&report).unwrap();
    assert_eq!(written.tables.len(), report.tables().len());

    for (path, table) in written.tables.iter().zip(report.tables()) {
        let back = report::read_table(table.name.clone(), fs::File::open(path).unwrap()).unwrap();
        assert_eq!(back.header(), table.header());
        assert_eq!(back.rows, table.rows);
    }

    let manifest: RunManifest =
        serde_json::from_str(&fs::read_to_string(&written.manifest).unwrap()).unwrap();
    assert_eq!(manifest.name(), "mpi");
    assert_eq!(manifest.configurations(), 6);
    assert_eq!(manifest.counts(), (24, 0, 0));
    assert_eq!(manifest.tables().len(), 4);

    // statistics.txt lands in every configuration directory
    assert_eq!(written.stats.len(), 6);
    let stats = fs::read_to_string(config.stats_path("20k_20k", 4).unwrap()).unwrap();
    assert!(stats.starts_with("Statistics for size=20k_20k, workers=4\n"));
    assert!(stats.contains("Sequential fraction: 0.000000"));
}

#[test]
fn test_dedicated_sequential_layout() {
    let dir = TempDir::new().unwrap();
    let mut config = Preset::Cpu.config();
    config.base_dir = dir.path().join("logs");
    config.output_dir = dir.path().join("results");
    config.sizes = vec!["100".to_string(), "1000".to_string()];
    config.workers = vec![2, 12];
    config.runs = 3;
    config.views.retain(|v| v.sizes.is_none());

    let files = Simulator::new(SimulationProfile::default(), 5)
        .write_tree(&config)
        .unwrap();
    assert_eq!(files, 2 * 2 * 3 + 2 * 3);

    let report = pipeline::run(&config).unwrap();
    assert!(report.collected().malformed.is_empty());
    assert_eq!(report.collected().parsed, files);

    let comparison = report.table("comparison_12_threads").unwrap();
    for size in ["100", "1000"] {
        let row = comparison.row(size).unwrap();
        assert!(row.iter().all(|cell| cell != "N/A"), "{size}: {row:?}");
        assert!(row[2].ends_with('x'));
    }

    let written = report::write_report(&report).unwrap();
    assert_eq!(written.stats.len(), 2 * 2 * 2);
    let seq: MeanStd = serde_json::from_str(
        &fs::read_to_string(config.cell_dir("1000", 12).join("sequential_stats.json")).unwrap(),
    )
    .unwrap();
    assert!(seq.mean.is_some() && seq.std.is_some());
}

#[test]
fn test_render_text_contains_every_title() {
    let dir = TempDir::new().unwrap();
    let config = mpi_config(&dir, &["10k_10k"], &[1, 2], 2);
    write_combined(&config, "10k_10k", 1, &[2.0, 2.0]);
    write_combined(&config, "10k_10k", 2, &[1.0, 1.0]);

    let report = pipeline::run(&config).unwrap();
    let text = report::render_text(&report);
    for table in report.tables() {
        assert!(text.contains(&table.title));
    }
    assert!(text.contains("∞ workers"));
}
