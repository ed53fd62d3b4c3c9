//! Report assembly: scoring, issues, recommendations, and metadata.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use vitals_core::constants::{ORCHESTRATION_CHECK_NAME, VERSION};
use vitals_core::models::{
    CheckCategory, CheckConfig, CheckErrorInfo, CheckResult, CheckStatus, HealthCheckReport,
    ReportMetadata, RunTrigger, Severity, SystemInfo,
};

use crate::issues::IssueGenerator;
use crate::recommendations::RecommendationGenerator;
use crate::scoring::ScoringEngine;

/// Category the synthetic orchestration failure is filed under.
pub const ORCHESTRATION_CATEGORY: CheckCategory = CheckCategory::ErrorHandling;
pub const ORCHESTRATION_ERROR_CODE: &str = "ORCHESTRATION_FAILED";

/// Builds the immutable report of one run. The report id is the run id.
pub struct ReportBuilder {
    run_id: String,
    trigger: RunTrigger,
    categories: Vec<CheckCategory>,
    parallel: bool,
    resolved_configs: BTreeMap<CheckCategory, CheckConfig>,
    timestamp: DateTime<Utc>,
    duration_ms: u64,
    system_info: Option<SystemInfo>,
}

impl ReportBuilder {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            trigger: RunTrigger::default(),
            categories: Vec::new(),
            parallel: false,
            resolved_configs: BTreeMap::new(),
            timestamp: Utc::now(),
            duration_ms: 0,
            system_info: None,
        }
    }

    pub fn trigger(mut self, trigger: RunTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn categories(mut self, categories: Vec<CheckCategory>) -> Self {
        self.categories = categories;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn resolved_configs(mut self, configs: BTreeMap<CheckCategory, CheckConfig>) -> Self {
        self.resolved_configs = configs;
        self
    }

    /// Run start time.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn system_info(mut self, info: SystemInfo) -> Self {
        self.system_info = Some(info);
        self
    }

    /// Assemble a report from results in selection order.
    pub fn build(self, results: Vec<CheckResult>) -> HealthCheckReport {
        self.assemble(results, None)
    }

    /// Best-effort report after an orchestration failure: the collected
    /// results plus one synthetic `Failed` result describing `error`.
    /// Overall status is forced to `Failed` and the score to 0.
    pub fn build_failed(self, mut results: Vec<CheckResult>, error: &str) -> HealthCheckReport {
        results.push(orchestration_failure(error, self.duration_ms));
        let mut report = self.assemble(results, Some(error.to_string()));
        report.summary.overall_status = CheckStatus::Failed;
        report.summary.score = 0;
        report
    }

    fn assemble(self, mut results: Vec<CheckResult>, orchestration_error: Option<String>) -> HealthCheckReport {
        for result in &mut results {
            result.retain_finite_metrics();
        }
        let summary = ScoringEngine::summarize(&results);
        let issues = IssueGenerator::generate(&results);
        let recommendations = RecommendationGenerator::generate(&results, &issues);

        HealthCheckReport {
            id: self.run_id.clone(),
            timestamp: self.timestamp,
            duration_ms: self.duration_ms,
            summary,
            results,
            issues,
            recommendations,
            system_info: self.system_info.unwrap_or_else(SystemInfo::collect),
            metadata: ReportMetadata {
                run_id: self.run_id,
                trigger: self.trigger,
                categories: self.categories,
                parallel: self.parallel,
                resolved_configs: self.resolved_configs,
                orchestration_error,
                engine_version: VERSION.to_string(),
            },
        }
    }
}

fn orchestration_failure(error: &str, duration_ms: u64) -> CheckResult {
    let mut result = CheckResult::new(
        ORCHESTRATION_CATEGORY,
        ORCHESTRATION_CHECK_NAME,
        CheckStatus::Failed,
        error,
    )
    .with_severity(Severity::Critical)
    .with_duration_ms(duration_ms);
    result.error = Some(CheckErrorInfo {
        code: ORCHESTRATION_ERROR_CODE.to_string(),
        message: error.to_string(),
        stack: None,
    });
    result
}
