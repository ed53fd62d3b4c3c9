use std::str::FromStr;

use vitals_core::errors::CheckError;
use vitals_core::models::*;

#[test]
fn severity_defaults_follow_status() {
    assert_eq!(Severity::default_for(CheckStatus::Failed), Severity::High);
    assert_eq!(Severity::default_for(CheckStatus::Warning), Severity::Medium);
    assert_eq!(Severity::default_for(CheckStatus::Passed), Severity::Low);
    assert_eq!(Severity::default_for(CheckStatus::Skipped), Severity::Low);
}

#[test]
fn explicit_severity_wins_over_status_default() {
    let result = CheckResult::new(CheckCategory::Security, "tls", CheckStatus::Failed, "weak")
        .with_severity(Severity::Critical);
    assert_eq!(result.effective_severity(), Severity::Critical);

    let result = CheckResult::new(CheckCategory::Security, "tls", CheckStatus::Failed, "weak");
    assert_eq!(result.effective_severity(), Severity::High);
}

#[test]
fn terminal_statuses() {
    assert!(CheckStatus::Passed.is_terminal());
    assert!(CheckStatus::Failed.is_terminal());
    assert!(CheckStatus::Warning.is_terminal());
    assert!(CheckStatus::Skipped.is_terminal());
    assert!(!CheckStatus::Pending.is_terminal());
    assert!(!CheckStatus::Running.is_terminal());
}

#[test]
fn category_string_roundtrip() {
    for category in CheckCategory::ALL {
        assert_eq!(CheckCategory::from_str(category.as_str()).unwrap(), category);
    }
    assert!(CheckCategory::from_str("bogus").is_err());
}

#[test]
fn category_serializes_as_snake_case() {
    let json = serde_json::to_string(&CheckCategory::ApiConnectivity).unwrap();
    assert_eq!(json, "\"api_connectivity\"");
}

#[test]
fn default_category_configs_match_shipped_table() {
    let api = CheckConfig::default_for(CheckCategory::ApiConnectivity);
    assert_eq!((api.timeout_ms, api.retry_count, api.severity), (10_000, 3, Severity::High));

    let offline = CheckConfig::default_for(CheckCategory::OfflineCapability);
    assert_eq!(
        (offline.timeout_ms, offline.retry_count, offline.severity),
        (5_000, 1, Severity::Low)
    );

    let hard = CheckConfig::default();
    assert_eq!((hard.timeout_ms, hard.retry_count, hard.severity), (30_000, 1, Severity::Medium));
    assert!(hard.enabled);
    assert!(!hard.cache_enabled);
}

#[test]
fn from_error_synthesizes_failed_result() {
    let err = CheckError::Timeout {
        category: CheckCategory::Performance,
        timeout_ms: 500,
    };
    let result = CheckResult::from_error(CheckCategory::Performance, "Performance", &err, 510);
    assert_eq!(result.status, CheckStatus::Failed);
    assert_eq!(result.duration_ms, 510);
    let info = result.error.unwrap();
    assert_eq!(info.code, "CHECK_TIMEOUT");
    assert!(info.message.contains("500ms"));
}

#[test]
fn primary_metric_reads_score_key() {
    let result = CheckResult::new(CheckCategory::Performance, "p", CheckStatus::Passed, "ok")
        .with_metric("score", 87.5)
        .with_metric("latency_ms", 120.0);
    assert_eq!(result.primary_metric(), Some(87.5));

    let bare = CheckResult::new(CheckCategory::Performance, "p", CheckStatus::Passed, "ok");
    assert_eq!(bare.primary_metric(), None);
}

#[test]
fn job_state_transitions() {
    assert!(JobState::Queued.can_transition_to(JobState::Running));
    assert!(JobState::Queued.can_transition_to(JobState::Failed));
    assert!(JobState::Running.can_transition_to(JobState::Completed));
    assert!(JobState::Running.can_transition_to(JobState::Failed));
    assert!(!JobState::Completed.can_transition_to(JobState::Running));
    assert!(!JobState::Failed.can_transition_to(JobState::Completed));
    assert!(!JobState::Queued.can_transition_to(JobState::Completed));
}

#[test]
fn check_result_json_roundtrip_keeps_optional_fields() {
    let result = CheckResult::new(CheckCategory::ErrorHandling, "boundary", CheckStatus::Warning, "slow")
        .with_suggestions(["add a fallback"])
        .with_details(serde_json::json!({"handler": "upload"}));
    let json = serde_json::to_string(&result).unwrap();
    let back: CheckResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn run_request_builder_sets_overrides() {
    let req = RunRequest::for_categories(vec![CheckCategory::Security])
        .parallel(true)
        .timeout_ms(250)
        .retry_count(0);
    assert_eq!(req.config.parallel, Some(true));
    assert_eq!(req.config.timeout_ms, Some(250));
    assert_eq!(req.config.retry_count, Some(0));
}

#[test]
fn status_scores_follow_the_report_table() {
    let scores: Vec<u8> = CheckStatus::ALL.iter().map(CheckStatus::score).collect();
    // Pending, Running, Passed, Failed, Warning, Skipped
    assert_eq!(scores, vec![30, 50, 100, 0, 70, 50]);
}

#[test]
fn retain_finite_metrics_keeps_scalar_details() {
    let mut result = CheckResult::new(CheckCategory::Performance, "p95", CheckStatus::Passed, "ok")
        .with_metric("ratio", f64::NEG_INFINITY)
        .with_details(serde_json::json!("raw"));
    assert!(result.has_non_finite_metrics());

    assert_eq!(result.retain_finite_metrics(), vec!["ratio".to_string()]);
    assert!(result.metrics.as_ref().unwrap().is_empty());
    let details = result.details.as_ref().unwrap();
    assert_eq!(details["value"], "raw");
    assert_eq!(details["non_finite_metrics"], serde_json::json!(["ratio"]));
    assert!(result.retain_finite_metrics().is_empty());
}
