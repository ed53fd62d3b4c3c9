//! Behavior shared by every IReportRepository: each scenario runs against
//! the SQLite engine (in memory and file-backed) and the in-memory store.

use chrono::{Duration, Utc};
use tempfile::TempDir;

use test_fixtures::{result, ReportFixture};
use vitals_core::errors::{StorageError, VitalsError};
use vitals_core::models::{
    CheckCategory, CheckConfig, CheckStatus, GlobalConfig, Severity,
};
use vitals_core::traits::IReportRepository;
use vitals_storage::{InMemoryReportRepository, StorageEngine};

fn with_each_repository(scenario: impl Fn(&dyn IReportRepository)) {
    scenario(&InMemoryReportRepository::new());
    scenario(&StorageEngine::open_in_memory().unwrap());

    let dir = TempDir::new().unwrap();
    let engine = StorageEngine::open(&dir.path().join("vitals.db")).unwrap();
    scenario(&engine);
}

#[test]
fn saved_report_round_trips_with_its_results() {
    with_each_repository(|repo| {
        let report = ReportFixture::new("run-1")
            .at_hour(1)
            .score(85)
            .status(CheckStatus::Warning)
            .result(result(CheckCategory::ApiConnectivity, CheckStatus::Passed))
            .result(result(CheckCategory::Performance, CheckStatus::Warning).with_metric("score", 70.0))
            .build();
        repo.save_check_report(&report).unwrap();

        let loaded = repo.get_check_report("run-1").unwrap().unwrap();
        assert_eq!(loaded, report);
        assert!(repo.get_check_report("missing").unwrap().is_none());

        let by_category = repo
            .get_check_results_by_category(CheckCategory::Performance, 10)
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].primary_metric(), Some(70.0));
    });
}

#[test]
fn resaving_a_report_replaces_its_results() {
    with_each_repository(|repo| {
        let first = ReportFixture::new("run-1")
            .result(result(CheckCategory::Security, CheckStatus::Failed))
            .build();
        repo.save_check_report(&first).unwrap();

        let second = ReportFixture::new("run-1")
            .result(result(CheckCategory::Security, CheckStatus::Passed))
            .build();
        repo.save_check_report(&second).unwrap();

        let failed = repo.get_check_results_by_status(CheckStatus::Failed, 10).unwrap();
        assert!(failed.is_empty());
        let passed = repo.get_check_results_by_status(CheckStatus::Passed, 10).unwrap();
        assert_eq!(passed.len(), 1);
        assert_eq!(repo.get_check_reports(10, 0).unwrap().len(), 1);
    });
}

#[test]
fn listing_is_newest_first_and_ranges_are_oldest_first() {
    with_each_repository(|repo| {
        for hour in [3, 1, 4, 2] {
            let report = ReportFixture::new(format!("run-{hour}")).at_hour(hour).build();
            repo.save_check_report(&report).unwrap();
        }

        let ids = |reports: Vec<vitals_core::models::HealthCheckReport>| {
            reports.into_iter().map(|r| r.id).collect::<Vec<_>>()
        };

        assert_eq!(ids(repo.get_check_reports(10, 0).unwrap()), ["run-4", "run-3", "run-2", "run-1"]);
        assert_eq!(ids(repo.get_check_reports(2, 1).unwrap()), ["run-3", "run-2"]);
        assert_eq!(repo.get_latest_check_report().unwrap().unwrap().id, "run-4");

        let from = test_fixtures::builders::epoch() + Duration::hours(2);
        let to = test_fixtures::builders::epoch() + Duration::hours(3);
        assert_eq!(
            ids(repo.get_check_reports_by_date_range(from, to).unwrap()),
            ["run-2", "run-3"]
        );
    });
}

#[test]
fn empty_repository_has_no_latest_report() {
    with_each_repository(|repo| {
        assert!(repo.get_latest_check_report().unwrap().is_none());
        assert!(repo.get_check_reports(10, 0).unwrap().is_empty());
    });
}

#[test]
fn severity_lookup_uses_the_effective_severity() {
    with_each_repository(|repo| {
        let implied_high = result(CheckCategory::Security, CheckStatus::Failed);
        let explicit_critical =
            result(CheckCategory::ApiConnectivity, CheckStatus::Failed).with_severity(Severity::Critical);
        repo.save_check_result(&implied_high).unwrap();
        repo.save_check_result(&explicit_critical).unwrap();

        let high = repo.get_check_results_by_severity(Severity::High, 10).unwrap();
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].id, implied_high.id);
        let critical = repo.get_check_results_by_severity(Severity::Critical, 10).unwrap();
        assert_eq!(critical[0].id, explicit_critical.id);
    });
}

#[test]
fn result_queries_are_newest_first_and_limited() {
    with_each_repository(|repo| {
        let now = Utc::now();
        for minutes in 0..5 {
            let r = result(CheckCategory::Performance, CheckStatus::Passed)
                .with_timestamp(now - Duration::minutes(minutes));
            repo.save_check_result(&r).unwrap();
        }
        let results = repo
            .get_check_results_by_category(CheckCategory::Performance, 3)
            .unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    });
}

#[test]
fn statistics_cover_recent_results_only() {
    with_each_repository(|repo| {
        let now = Utc::now();
        repo.save_check_result(&result(CheckCategory::Performance, CheckStatus::Passed).with_duration_ms(100))
            .unwrap();
        repo.save_check_result(&result(CheckCategory::Security, CheckStatus::Failed).with_duration_ms(300))
            .unwrap();
        repo.save_check_result(
            &result(CheckCategory::Security, CheckStatus::Passed).with_timestamp(now - Duration::days(10)),
        )
        .unwrap();

        let stats = repo.get_check_result_statistics(7).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_category[&CheckCategory::Security], 1);
        assert!((stats.average_score - 50.0).abs() < 1e-9);
        assert!((stats.average_duration - 200.0).abs() < 1e-9);
    });
}

#[test]
fn cleanup_removes_old_reports_with_their_results() {
    with_each_repository(|repo| {
        let now = Utc::now();
        let old = ReportFixture::new("old")
            .at(now - Duration::days(40))
            .result(result(CheckCategory::Performance, CheckStatus::Passed))
            .result(result(CheckCategory::Security, CheckStatus::Passed))
            .build();
        let fresh = ReportFixture::new("fresh")
            .at(now - Duration::days(1))
            .result(result(CheckCategory::Performance, CheckStatus::Passed))
            .build();
        repo.save_check_report(&old).unwrap();
        repo.save_check_report(&fresh).unwrap();
        repo.save_check_result(
            &result(CheckCategory::UserExperience, CheckStatus::Warning).with_timestamp(now - Duration::days(31)),
        )
        .unwrap();

        let summary = repo.cleanup_old_data(30).unwrap();
        assert_eq!(summary.deleted_reports, 1);
        assert_eq!(summary.deleted_results, 3);
        assert!(repo.get_check_report("old").unwrap().is_none());
        assert!(repo.get_check_report("fresh").unwrap().is_some());

        let again = repo.cleanup_old_data(30).unwrap();
        assert_eq!(again.deleted_reports + again.deleted_results, 0);
    });
}

#[test]
fn cleanup_ages_owned_results_by_their_report() {
    with_each_repository(|repo| {
        let now = Utc::now();
        let mut fresh = ReportFixture::new("fresh")
            .at(now - Duration::days(1))
            .result(result(CheckCategory::Performance, CheckStatus::Passed))
            .build();
        // A cached result keeps the timestamp of the run that produced it.
        fresh.results[0].timestamp = now - Duration::days(40);
        repo.save_check_report(&fresh).unwrap();

        let summary = repo.cleanup_old_data(30).unwrap();
        assert_eq!(summary.deleted_results, 0);
        assert_eq!(summary.deleted_reports, 0);
        assert_eq!(
            repo.get_check_results_by_category(CheckCategory::Performance, 10)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(repo.get_check_report("fresh").unwrap().unwrap().results.len(), 1);
    });
}

#[test]
fn non_finite_metrics_do_not_poison_reads() {
    with_each_repository(|repo| {
        let report = ReportFixture::new("nan-run")
            .at_hour(2)
            .result(
                result(CheckCategory::Performance, CheckStatus::Warning)
                    .with_metric("score", f64::NAN)
                    .with_metric("latency_ms", 120.0),
            )
            .build();
        repo.save_check_report(&report).unwrap();
        repo.save_check_result(
            &result(CheckCategory::Security, CheckStatus::Passed).with_metric("ratio", f64::INFINITY),
        )
        .unwrap();

        let loaded = repo.get_check_report("nan-run").unwrap().unwrap();
        let stored = &loaded.results[0];
        assert_eq!(stored.primary_metric(), None);
        assert_eq!(stored.metrics.as_ref().unwrap()["latency_ms"], 120.0);
        assert_eq!(
            stored.details.as_ref().unwrap()["non_finite_metrics"],
            serde_json::json!(["score"])
        );

        let from = test_fixtures::builders::epoch();
        let to = from + Duration::hours(4);
        assert_eq!(repo.get_check_reports_by_date_range(from, to).unwrap().len(), 1);
        assert_eq!(repo.get_check_result_statistics(3650).unwrap().total, 2);
        let bundle = repo.export_data().unwrap();
        assert_eq!(bundle.reports.len(), 1);
        assert_eq!(bundle.results.len(), 1);
    });
}

#[test]
fn configs_persist_and_global_defaults_when_absent() {
    with_each_repository(|repo| {
        assert!(repo.get_check_config(CheckCategory::Security).unwrap().is_none());
        assert_eq!(repo.get_global_config().unwrap(), GlobalConfig::default());

        let config = CheckConfig {
            timeout_ms: 1_234,
            ..CheckConfig::default_for(CheckCategory::Security)
        };
        repo.save_check_config(CheckCategory::Security, &config).unwrap();
        assert_eq!(repo.get_check_config(CheckCategory::Security).unwrap(), Some(config));

        let global = GlobalConfig {
            parallel: true,
            retention_days: 7,
            enabled_categories: vec![CheckCategory::Performance],
            auto_cleanup: false,
        };
        repo.save_global_config(&global).unwrap();
        assert_eq!(repo.get_global_config().unwrap(), global);
    });
}

#[test]
fn export_then_import_into_an_empty_repository() {
    with_each_repository(|source| {
        let report = ReportFixture::new("run-1")
            .at_hour(5)
            .result(result(CheckCategory::OfflineCapability, CheckStatus::Passed))
            .build();
        source.save_check_report(&report).unwrap();
        source
            .save_check_result(&result(CheckCategory::Security, CheckStatus::Warning))
            .unwrap();
        source
            .save_check_config(CheckCategory::Performance, &CheckConfig::default_for(CheckCategory::Performance))
            .unwrap();

        let bundle = source.export_data().unwrap();
        assert_eq!(bundle.reports.len(), 1);
        assert_eq!(bundle.results.len(), 1);

        let target = InMemoryReportRepository::new();
        let summary = target.import_data(&bundle).unwrap();
        assert_eq!(summary.imported_reports, 1);
        assert_eq!(summary.imported_results, 1);
        assert_eq!(summary.imported_configs, 1);
        assert_eq!(target.get_check_report("run-1").unwrap(), Some(report));
        assert_eq!(
            target.get_check_results_by_status(CheckStatus::Warning, 10).unwrap().len(),
            1
        );
    });
}

#[test]
fn import_rejects_unknown_bundle_versions() {
    with_each_repository(|repo| {
        let mut bundle = repo.export_data().unwrap();
        bundle.version += 1;
        let err = repo.import_data(&bundle).unwrap_err();
        assert!(matches!(
            err,
            VitalsError::StorageError(StorageError::UnsupportedBundleVersion { .. })
        ));
    });
}
