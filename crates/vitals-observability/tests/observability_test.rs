use vitals_core::config::ObservabilityConfig;
use vitals_observability::metrics::SchedulerMetrics;
use vitals_observability::tracing_setup::{events, init_tracing_from_config, init_tracing_with_filter};

#[test]
fn tracing_init_is_idempotent() {
    let first = init_tracing_with_filter("debug");
    let second = init_tracing_from_config(&ObservabilityConfig::default());
    // Only one global subscriber can win; the second call must not panic.
    assert!(!(first && second));
}

#[test]
fn events_emit_without_subscriber_panics() {
    events::run_started("run-1", 3, true);
    events::check_attempt_failed("run-1", "security", 0, "boom");
    events::check_timed_out("run-1", "security", 1, 500);
    events::check_completed("run-1", "security", "failed", 2, 1_020);
    events::run_completed("run-1", 50, "failed", 1_100);
    events::cache_swept(2, 5);
}

#[test]
fn snapshot_serializes_all_counters() {
    let m = SchedulerMetrics::new();
    m.record_run_started();
    m.record_run_completed();
    m.record_timeout();
    m.record_persistence_failure();
    let json = serde_json::to_value(m.snapshot()).unwrap();
    assert_eq!(json["runs_started"], 1);
    assert_eq!(json["runs_completed"], 1);
    assert_eq!(json["timeouts"], 1);
    assert_eq!(json["persistence_failures"], 1);
    assert_eq!(json["runs_failed"], 0);
}
