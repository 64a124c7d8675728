//! Property-based tests for lcs-perf
//!
//! - Test mathematical invariants of the statistics and metric formulas
//! - Test formatting stability of tables through CSV
//! - Run with ProptestConfig::with_cases(100)

use lcs_perf::metrics::{
    amdahl_serial_fraction, amdahl_theoretical_speedup, efficiency, speedup, Workers,
};
use lcs_perf::report::{read_table, write_table};
use lcs_perf::stats::SummaryStats;
use lcs_perf::table::format;
use lcs_perf::table::{Table, TableRow};
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Run times in seconds, as the LCS programs print them
fn arb_times() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.0f64..1000.0, 1..50)
}

/// Cell strings as the table builder produces them
fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(format::NOT_AVAILABLE.to_string()),
        Just(format::INFINITY.to_string()),
        (0.0f64..100.0, 0.0f64..10.0).prop_map(|(m, s)| format!("{m:.3} (±{s:.3})")),
        (0.0f64..64.0).prop_map(|v| format::ratio(Some(v), 2)),
        (0.0f64..500.0).prop_map(|v| format::percent(Some(v), 2)),
    ]
}

fn arb_table() -> impl Strategy<Value = Table> {
    (1usize..6, 1usize..8).prop_flat_map(|(cols, rows)| {
        proptest::collection::vec(proptest::collection::vec(arb_cell(), cols), rows).prop_map(
            move |cells| Table {
                name: "prop".to_string(),
                title: String::new(),
                corner: "Input size".to_string(),
                column_labels: (1..=cols).map(|w| format!("{w} workers")).collect(),
                rows: cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| TableRow::new(format!("{}k_{}k", i + 1, i + 1), c))
                    .collect(),
            },
        )
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: min <= mean <= max and std >= 0
    #[test]
    fn prop_summary_mean_within_range(values in arb_times()) {
        let stats = SummaryStats::from_values(&values).unwrap();
        prop_assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        prop_assert!(stats.std >= 0.0);
        prop_assert_eq!(stats.count, values.len());
    }

    /// Property: a constant run set has zero spread
    #[test]
    fn prop_constant_runs_have_zero_std(value in 0.0f64..1000.0, n in 1usize..40) {
        let stats = SummaryStats::from_values(&vec![value; n]).unwrap();
        prop_assert!(stats.std.abs() < 1e-9 * value.max(1.0));
        prop_assert!((stats.mean - value).abs() < 1e-9 * value.max(1.0));
    }

    /// Property: speedup is exact division when the measurement is positive
    #[test]
    fn prop_speedup_exact(baseline in 0.0f64..1e4, measured in 1e-6f64..1e4) {
        prop_assert_eq!(speedup(baseline, measured), Some(baseline / measured));
    }

    /// Property: one worker's efficiency equals its speedup
    #[test]
    fn prop_single_worker_efficiency(s in 0.0f64..64.0) {
        prop_assert_eq!(efficiency(s, 1), Some(s));
    }

    /// Property: 1 <= theoretical speedup <= workers, and never above the limit
    #[test]
    fn prop_amdahl_bounds(f in 0.0f64..=1.0, p in 1u32..1024) {
        let bound = amdahl_theoretical_speedup(f, Workers::Finite(p)).unwrap();
        let limit = amdahl_theoretical_speedup(f, Workers::Infinite).unwrap();
        prop_assert!(bound >= 1.0 - 1e-12);
        prop_assert!(bound <= f64::from(p) + 1e-9);
        prop_assert!(bound <= limit * (1.0 + 1e-12));
    }

    /// Property: more workers never lower the bound
    #[test]
    fn prop_amdahl_monotonic(f in 0.0f64..=1.0, p in 1u32..512) {
        let fewer = amdahl_theoretical_speedup(f, Workers::Finite(p)).unwrap();
        let more = amdahl_theoretical_speedup(f, Workers::Finite(p + 1)).unwrap();
        prop_assert!(more >= fewer - 1e-12);
    }

    /// Property: serial fractions always land in [0, 1]
    #[test]
    fn prop_serial_fraction_in_unit_interval(seq in 0.0f64..100.0, total in 1e-9f64..100.0) {
        let f = amdahl_serial_fraction(seq, total).unwrap();
        prop_assert!((0.0..=1.0).contains(&f));
    }

    /// Property: CSV read-back reproduces labels and formatted cells
    #[test]
    fn prop_csv_round_trip(table in arb_table()) {
        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        let back = read_table("prop", buf.as_slice()).unwrap();
        prop_assert_eq!(back.header(), table.header());
        prop_assert_eq!(back.rows, table.rows);
    }
}
