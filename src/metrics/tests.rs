use super::*;

#[test]
fn empty_report_is_all_zero() {
    let report = MetricsReport::default();
    assert_eq!(report.rounds, 0);
    assert_eq!(report.combinations, 0);
    assert_eq!(report.dead_end_rate(), 0.0);
    assert_eq!(report.combinations_per_round(), 0.0);
}

#[test]
fn dead_end_rate_counts_branches_and_dead_ends() {
    let report = MetricsReport {
        branches: 3,
        dead_ends: 1,
        ..Default::default()
    };
    assert!((report.dead_end_rate() - 0.25).abs() < 0.001);
}

#[test]
fn combinations_per_round() {
    let report = MetricsReport {
        rounds: 4,
        combinations: 10,
        ..Default::default()
    };
    assert!((report.combinations_per_round() - 2.5).abs() < 0.001);
}

#[test]
fn report_display() {
    let report = MetricsReport {
        rounds: 7,
        cache_records: 12,
        pruned: 2,
        branches: 9,
        dead_ends: 1,
        ..Default::default()
    };

    let output = format!("{}", report);
    assert!(output.starts_with("=== Rewriting Metrics ==="));
    assert!(output.contains("Rounds:"));
    assert!(output.contains("12 recorded, 2 pruned"));
    assert!(output.contains("(10.0%)"));
}

#[cfg(not(feature = "tracing"))]
#[test]
fn disabled_metrics_stay_zero() {
    let metrics = RewriteMetrics::new();
    metrics.record_round();
    metrics.record_combination();
    assert_eq!(metrics.report(), MetricsReport::default());
}

#[cfg(feature = "tracing")]
#[test]
fn counters_accumulate_and_reset() {
    let metrics = RewriteMetrics::new();

    metrics.record_round();
    metrics.record_round();
    metrics.record_piece_unifiers(5);
    metrics.record_cache_record();
    metrics.record_pruned(3);
    metrics.record_branch();
    metrics.record_dead_end();
    metrics.record_combination();
    metrics.record_duplicate();

    let report = metrics.report();
    assert_eq!(report.rounds, 2);
    assert_eq!(report.piece_unifiers, 5);
    assert_eq!(report.cache_records, 1);
    assert_eq!(report.pruned, 3);
    assert_eq!(report.branches, 1);
    assert_eq!(report.dead_ends, 1);
    assert_eq!(report.combinations, 1);
    assert_eq!(report.duplicates, 1);

    metrics.reset();
    assert_eq!(metrics.report(), MetricsReport::default());
}
