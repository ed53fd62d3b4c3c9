use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::VitalsResult;
use crate::models::{
    CheckCategory, CheckConfig, CheckResult, CheckResultStatistics, CheckStatus, CleanupSummary,
    ExportBundle, GlobalConfig, HealthCheckReport, ImportSummary, Severity,
};

/// Persistence of reports, results, and configuration.
///
/// Implementations provide per-entity read/write atomicity; the engine needs
/// no cross-entity transactions.
pub trait IReportRepository: Send + Sync {
    // --- Reports ---
    /// Persist a report and every result it owns.
    fn save_check_report(&self, report: &HealthCheckReport) -> VitalsResult<()>;
    fn get_check_report(&self, id: &str) -> VitalsResult<Option<HealthCheckReport>>;
    fn get_latest_check_report(&self) -> VitalsResult<Option<HealthCheckReport>>;
    /// Newest first.
    fn get_check_reports(&self, limit: usize, offset: usize)
        -> VitalsResult<Vec<HealthCheckReport>>;
    /// Oldest first, both bounds inclusive.
    fn get_check_reports_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> VitalsResult<Vec<HealthCheckReport>>;

    // --- Results ---
    fn save_check_result(&self, result: &CheckResult) -> VitalsResult<()>;
    fn get_check_results_by_category(
        &self,
        category: CheckCategory,
        limit: usize,
    ) -> VitalsResult<Vec<CheckResult>>;
    fn get_check_results_by_status(
        &self,
        status: CheckStatus,
        limit: usize,
    ) -> VitalsResult<Vec<CheckResult>>;
    fn get_check_results_by_severity(
        &self,
        severity: Severity,
        limit: usize,
    ) -> VitalsResult<Vec<CheckResult>>;
    fn get_check_result_statistics(&self, days: u32) -> VitalsResult<CheckResultStatistics>;

    // --- Maintenance ---
    fn cleanup_old_data(&self, retention_days: u32) -> VitalsResult<CleanupSummary>;
    fn export_data(&self) -> VitalsResult<ExportBundle>;
    fn import_data(&self, bundle: &ExportBundle) -> VitalsResult<ImportSummary>;

    // --- Configuration ---
    fn get_check_config(&self, category: CheckCategory) -> VitalsResult<Option<CheckConfig>>;
    fn save_check_config(&self, category: CheckCategory, config: &CheckConfig)
        -> VitalsResult<()>;
    fn get_global_config(&self) -> VitalsResult<GlobalConfig>;
    fn save_global_config(&self, config: &GlobalConfig) -> VitalsResult<()>;
}

/// Blanket impl: `Arc<T>` implements `IReportRepository` by delegating to the inner `T`.
impl<T: IReportRepository> IReportRepository for Arc<T> {
    fn save_check_report(&self, report: &HealthCheckReport) -> VitalsResult<()> { (**self).save_check_report(report) }
    fn get_check_report(&self, id: &str) -> VitalsResult<Option<HealthCheckReport>> { (**self).get_check_report(id) }
    fn get_latest_check_report(&self) -> VitalsResult<Option<HealthCheckReport>> { (**self).get_latest_check_report() }
    fn get_check_reports(&self, limit: usize, offset: usize) -> VitalsResult<Vec<HealthCheckReport>> { (**self).get_check_reports(limit, offset) }
    fn get_check_reports_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> VitalsResult<Vec<HealthCheckReport>> { (**self).get_check_reports_by_date_range(from, to) }
    fn save_check_result(&self, result: &CheckResult) -> VitalsResult<()> { (**self).save_check_result(result) }
    fn get_check_results_by_category(&self, category: CheckCategory, limit: usize) -> VitalsResult<Vec<CheckResult>> { (**self).get_check_results_by_category(category, limit) }
    fn get_check_results_by_status(&self, status: CheckStatus, limit: usize) -> VitalsResult<Vec<CheckResult>> { (**self).get_check_results_by_status(status, limit) }
    fn get_check_results_by_severity(&self, severity: Severity, limit: usize) -> VitalsResult<Vec<CheckResult>> { (**self).get_check_results_by_severity(severity, limit) }
    fn get_check_result_statistics(&self, days: u32) -> VitalsResult<CheckResultStatistics> { (**self).get_check_result_statistics(days) }
    fn cleanup_old_data(&self, retention_days: u32) -> VitalsResult<CleanupSummary> { (**self).cleanup_old_data(retention_days) }
    fn export_data(&self) -> VitalsResult<ExportBundle> { (**self).export_data() }
    fn import_data(&self, bundle: &ExportBundle) -> VitalsResult<ImportSummary> { (**self).import_data(bundle) }
    fn get_check_config(&self, category: CheckCategory) -> VitalsResult<Option<CheckConfig>> { (**self).get_check_config(category) }
    fn save_check_config(&self, category: CheckCategory, config: &CheckConfig) -> VitalsResult<()> { (**self).save_check_config(category, config) }
    fn get_global_config(&self) -> VitalsResult<GlobalConfig> { (**self).get_global_config() }
    fn save_global_config(&self, config: &GlobalConfig) -> VitalsResult<()> { (**self).save_global_config(config) }
}
