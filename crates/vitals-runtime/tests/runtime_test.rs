use chrono::{Duration, Utc};
use tempfile::TempDir;

use test_fixtures::stubs::{AlwaysPass, AlwaysThrow};
use vitals_core::errors::VitalsError;
use vitals_core::models::{
    CheckCategory, CheckConfig, CheckStatus, GlobalConfig, JobState, RunRequest,
};
use vitals_runtime::{RuntimeOptions, VitalsRuntime};
use vitals_scheduler::CheckRegistry;

use CheckCategory::{ApiConnectivity, Performance, Security};

const FAST_TOML: &str = r#"
[scheduler]
retry_backoff_base_ms = 1

[analytics]
trend_threshold = 5.0
"#;

fn options() -> RuntimeOptions {
    RuntimeOptions {
        config_toml: Some(FAST_TOML.to_string()),
        ..RuntimeOptions::default()
    }
}

fn registry() -> CheckRegistry {
    CheckRegistry::new()
        .with(AlwaysPass::new(ApiConnectivity))
        .with(AlwaysPass::new(Performance))
        .with(AlwaysThrow::new(Security))
}

#[test]
fn new_runtime_seeds_default_category_configs() {
    let runtime = VitalsRuntime::new(options(), registry()).unwrap();
    for category in CheckCategory::ALL {
        let stored = runtime.repository().get_check_config(category).unwrap();
        assert_eq!(stored, Some(CheckConfig::default_for(category)));
    }
    assert_eq!(runtime.config().scheduler.retry_backoff_base_ms, 1);
}

#[test]
fn seeding_keeps_existing_configs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vitals.db");
    let opts = || RuntimeOptions {
        db_path: Some(path.clone()),
        ..options()
    };

    let custom = CheckConfig {
        timeout_ms: 777,
        ..CheckConfig::default_for(Security)
    };
    {
        let runtime = VitalsRuntime::new(opts(), registry()).unwrap();
        runtime.repository().save_check_config(Security, &custom).unwrap();
    }

    let runtime = VitalsRuntime::new(opts(), registry()).unwrap();
    assert_eq!(runtime.repository().get_check_config(Security).unwrap(), Some(custom));
}

#[test]
fn invalid_config_is_rejected() {
    let opts = RuntimeOptions {
        config_toml: Some("[scheduler]\ndefault_timeout_ms = 0\n".to_string()),
        ..RuntimeOptions::default()
    };
    let err = VitalsRuntime::new(opts, registry()).err().unwrap();
    assert!(matches!(err, VitalsError::ConfigError(_)));
}

#[tokio::test]
async fn trigger_uses_global_categories_and_mode() {
    let runtime = VitalsRuntime::new(options(), registry()).unwrap();
    runtime
        .repository()
        .save_global_config(&GlobalConfig {
            enabled_categories: vec![Performance, ApiConnectivity],
            parallel: true,
            ..GlobalConfig::default()
        })
        .unwrap();

    let ticket = runtime.trigger(RunRequest::default()).unwrap();
    let snapshot = runtime.scheduler().wait(&ticket.run_id).await.unwrap();
    assert_eq!(snapshot.state, JobState::Completed);

    let report = runtime.repository().get_check_report(&ticket.run_id).unwrap().unwrap();
    assert_eq!(report.metadata.categories, [Performance, ApiConnectivity]);
    assert!(report.metadata.parallel);
    assert_eq!(report.summary.overall_status, CheckStatus::Passed);
}

#[tokio::test]
async fn default_request_runs_only_registered_categories() {
    let partial = CheckRegistry::new()
        .with(AlwaysPass::new(ApiConnectivity))
        .with(AlwaysPass::new(Performance));
    let runtime = VitalsRuntime::new(options(), partial).unwrap();

    let report = runtime.execute(RunRequest::default()).await.unwrap();
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.metadata.categories, [ApiConnectivity, Performance]);
    assert_eq!(report.summary.overall_status, CheckStatus::Passed);
    assert_eq!(report.summary.score, 100);

    let ticket = runtime.trigger(RunRequest::default()).unwrap();
    runtime.scheduler().wait(&ticket.run_id).await.unwrap();
    let stored = runtime.repository().get_check_report(&ticket.run_id).unwrap().unwrap();
    assert!(stored
        .results
        .iter()
        .all(|r| r.error.as_ref().map(|e| e.code.as_str()) != Some("CHECK_NOT_REGISTERED")));
}

#[tokio::test]
async fn explicit_request_fields_beat_global_config() {
    let runtime = VitalsRuntime::new(options(), registry()).unwrap();
    let report = runtime
        .execute(RunRequest::for_categories([Security]).parallel(false).retry_count(0))
        .await
        .unwrap();

    assert_eq!(report.metadata.categories, [Security]);
    assert!(!report.metadata.parallel);
    assert_eq!(report.summary.overall_status, CheckStatus::Failed);
    // Seeded Security config carries High severity.
    assert_eq!(
        report.result_for(Security).unwrap().severity,
        Some(vitals_core::models::Severity::High)
    );
}

#[tokio::test]
async fn analytics_cover_executed_runs() {
    let runtime = VitalsRuntime::new(options(), registry()).unwrap();
    let start = Utc::now() - Duration::minutes(1);

    for _ in 0..3 {
        runtime
            .execute(RunRequest::for_categories([ApiConnectivity, Performance]))
            .await
            .unwrap();
    }

    let analytics = runtime
        .analytics(start, Utc::now() + Duration::minutes(1))
        .unwrap();
    assert_eq!(analytics.report_count, 3);
    assert_eq!(analytics.success_rate, 100.0);
    assert_eq!(analytics.reliability.uptime_percentage, 100.0);
    assert!(analytics.categories.contains_key(&Performance));
    assert!(analytics.recommendations.is_empty());
}

#[tokio::test]
async fn maintenance_sweeps_cache_and_old_history() {
    let runtime = VitalsRuntime::new(options(), registry()).unwrap();
    let old = test_fixtures::ReportFixture::new("ancient")
        .at(Utc::now() - Duration::days(90))
        .build();
    runtime.repository().save_check_report(&old).unwrap();

    let summary = runtime.maintenance().unwrap();
    assert_eq!(summary.cache_swept, 0);
    assert_eq!(summary.cleanup.unwrap().deleted_reports, 1);

    runtime
        .repository()
        .save_global_config(&GlobalConfig {
            auto_cleanup: false,
            ..GlobalConfig::default()
        })
        .unwrap();
    assert!(runtime.maintenance().unwrap().cleanup.is_none());
}
