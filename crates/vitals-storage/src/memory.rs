//! In-memory IReportRepository with the same ordering and retention
//! semantics as the SQLite engine.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use vitals_core::constants::MAX_QUERY_LIMIT;
use vitals_core::errors::{StorageError, VitalsResult};
use vitals_core::models::{
    CheckCategory, CheckConfig, CheckResult, CheckResultStatistics, CheckStatus, CleanupSummary,
    ExportBundle, GlobalConfig, HealthCheckReport, ImportSummary, Severity,
};
use vitals_core::traits::IReportRepository;
use vitals_observability::tracing_setup::events;

use crate::{bundle, stats};

#[derive(Default)]
struct State {
    reports: HashMap<String, HealthCheckReport>,
    /// Result id -> (result, owning report id).
    results: HashMap<String, (CheckResult, Option<String>)>,
    configs: BTreeMap<CheckCategory, CheckConfig>,
    global: Option<GlobalConfig>,
}

impl State {
    fn upsert_report(&mut self, report: &HealthCheckReport) {
        let mut report = report.clone();
        report.retain_finite_metrics();
        self.results
            .retain(|_, (_, owner)| owner.as_deref() != Some(report.id.as_str()));
        for result in &report.results {
            self.results
                .insert(result.id.clone(), (result.clone(), Some(report.id.clone())));
        }
        self.reports.insert(report.id.clone(), report);
    }

    fn insert_standalone(&mut self, result: &CheckResult) {
        let mut result = result.clone();
        result.retain_finite_metrics();
        self.results.insert(result.id.clone(), (result, None));
    }

    /// Reports sorted oldest first.
    fn sorted_reports(&self) -> Vec<&HealthCheckReport> {
        let mut reports: Vec<_> = self.reports.values().collect();
        reports.sort_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)));
        reports
    }

    fn newest_results<P>(&self, pred: P, limit: usize) -> Vec<CheckResult>
    where
        P: Fn(&CheckResult) -> bool,
    {
        let mut matching: Vec<&CheckResult> =
            self.results.values().map(|(r, _)| r).filter(|r| pred(r)).collect();
        matching.sort_by(|a, b| (b.timestamp, &b.id).cmp(&(a.timestamp, &a.id)));
        matching
            .into_iter()
            .take(limit.min(MAX_QUERY_LIMIT))
            .cloned()
            .collect()
    }
}

/// Lock-guarded maps. Cheap to construct; nothing survives the process.
#[derive(Default)]
pub struct InMemoryReportRepository {
    state: RwLock<State>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_count(&self) -> usize {
        self.read().map(|s| s.reports.len()).unwrap_or(0)
    }

    fn read(&self) -> VitalsResult<RwLockReadGuard<'_, State>> {
        self.state.read().map_err(|e| {
            StorageError::LockPoisoned {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> VitalsResult<RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(|e| {
            StorageError::LockPoisoned {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn days_ago(days: u32) -> DateTime<Utc> {
    Utc::now() - Duration::days(i64::from(days))
}

impl IReportRepository for InMemoryReportRepository {
    fn save_check_report(&self, report: &HealthCheckReport) -> VitalsResult<()> {
        self.write()?.upsert_report(report);
        Ok(())
    }

    fn get_check_report(&self, id: &str) -> VitalsResult<Option<HealthCheckReport>> {
        Ok(self.read()?.reports.get(id).cloned())
    }

    fn get_latest_check_report(&self) -> VitalsResult<Option<HealthCheckReport>> {
        Ok(self.read()?.sorted_reports().last().map(|r| (*r).clone()))
    }

    fn get_check_reports(&self, limit: usize, offset: usize) -> VitalsResult<Vec<HealthCheckReport>> {
        let state = self.read()?;
        Ok(state
            .sorted_reports()
            .into_iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn get_check_reports_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> VitalsResult<Vec<HealthCheckReport>> {
        let state = self.read()?;
        Ok(state
            .sorted_reports()
            .into_iter()
            .filter(|r| r.timestamp >= from && r.timestamp <= to)
            .cloned()
            .collect())
    }

    fn save_check_result(&self, result: &CheckResult) -> VitalsResult<()> {
        self.write()?.insert_standalone(result);
        Ok(())
    }

    fn get_check_results_by_category(&self, category: CheckCategory, limit: usize) -> VitalsResult<Vec<CheckResult>> {
        Ok(self.read()?.newest_results(|r| r.category == category, limit))
    }

    fn get_check_results_by_status(&self, status: CheckStatus, limit: usize) -> VitalsResult<Vec<CheckResult>> {
        Ok(self.read()?.newest_results(|r| r.status == status, limit))
    }

    fn get_check_results_by_severity(&self, severity: Severity, limit: usize) -> VitalsResult<Vec<CheckResult>> {
        Ok(self
            .read()?
            .newest_results(|r| r.effective_severity() == severity, limit))
    }

    fn get_check_result_statistics(&self, days: u32) -> VitalsResult<CheckResultStatistics> {
        let since = days_ago(days);
        let state = self.read()?;
        Ok(stats::compute(
            state
                .results
                .values()
                .map(|(r, _)| r)
                .filter(|r| r.timestamp >= since),
        ))
    }

    fn cleanup_old_data(&self, retention_days: u32) -> VitalsResult<CleanupSummary> {
        let cutoff = days_ago(retention_days);
        let mut state = self.write()?;

        let expired_reports: Vec<String> = state
            .reports
            .values()
            .filter(|r| r.timestamp < cutoff)
            .map(|r| r.id.clone())
            .collect();

        let before = state.results.len();
        state.results.retain(|_, (result, owner)| match owner {
            Some(id) => !expired_reports.contains(id),
            None => result.timestamp >= cutoff,
        });
        let deleted_results = before - state.results.len();

        for id in &expired_reports {
            state.reports.remove(id);
        }
        let summary = CleanupSummary {
            deleted_results,
            deleted_reports: expired_reports.len(),
        };
        drop(state);

        events::data_cleaned(retention_days, summary.deleted_results, summary.deleted_reports);
        Ok(summary)
    }

    fn export_data(&self) -> VitalsResult<ExportBundle> {
        let state = self.read()?;
        let mut standalone: Vec<CheckResult> = state
            .results
            .values()
            .filter(|(_, owner)| owner.is_none())
            .map(|(r, _)| r.clone())
            .collect();
        standalone.sort_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)));
        Ok(bundle::assemble(
            standalone,
            state.sorted_reports().into_iter().cloned().collect(),
            state.configs.clone(),
            state.global.clone(),
        ))
    }

    fn import_data(&self, bundle: &ExportBundle) -> VitalsResult<ImportSummary> {
        bundle::check_version(bundle)?;
        let mut state = self.write()?;
        for report in &bundle.reports {
            state.upsert_report(report);
        }
        for result in &bundle.results {
            state.insert_standalone(result);
        }
        for (category, config) in &bundle.configs {
            state.configs.insert(*category, config.clone());
        }
        if let Some(global) = &bundle.global_config {
            state.global = Some(global.clone());
        }
        Ok(ImportSummary {
            imported_results: bundle.results.len(),
            imported_reports: bundle.reports.len(),
            imported_configs: bundle.configs.len(),
        })
    }

    fn get_check_config(&self, category: CheckCategory) -> VitalsResult<Option<CheckConfig>> {
        Ok(self.read()?.configs.get(&category).cloned())
    }

    fn save_check_config(&self, category: CheckCategory, config: &CheckConfig) -> VitalsResult<()> {
        self.write()?.configs.insert(category, config.clone());
        Ok(())
    }

    fn get_global_config(&self) -> VitalsResult<GlobalConfig> {
        Ok(self.read()?.global.clone().unwrap_or_default())
    }

    fn save_global_config(&self, config: &GlobalConfig) -> VitalsResult<()> {
        self.write()?.global = Some(config.clone());
        Ok(())
    }
}
