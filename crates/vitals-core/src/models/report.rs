use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CheckCategory, CheckConfig, CheckResult, CheckStatus, Issue, Recommendation, SystemInfo};

/// Aggregate counts and score of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub skipped: usize,
    pub overall_status: CheckStatus,
    /// Always within [0, 100].
    pub score: u8,
}

/// What started a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunTrigger {
    #[default]
    Manual,
    Scheduled,
    Startup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub run_id: String,
    pub trigger: RunTrigger,
    /// Categories in selection order.
    pub categories: Vec<CheckCategory>,
    pub parallel: bool,
    pub resolved_configs: BTreeMap<CheckCategory, CheckConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orchestration_error: Option<String>,
    pub engine_version: String,
}

/// Immutable aggregate of one run. `id` equals the run id.
///
/// Invariants: `summary.total == results.len()`, `summary.score <= 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckReport {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
    pub summary: ReportSummary,
    pub results: Vec<CheckResult>,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
    pub system_info: SystemInfo,
    pub metadata: ReportMetadata,
}

impl HealthCheckReport {
    /// Result for a category, if the run included it.
    pub fn result_for(&self, category: CheckCategory) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.category == category)
    }

    pub fn has_non_finite_metrics(&self) -> bool {
        self.results.iter().any(CheckResult::has_non_finite_metrics)
    }

    /// Apply [`CheckResult::retain_finite_metrics`] to every result.
    pub fn retain_finite_metrics(&mut self) {
        for result in &mut self.results {
            result.retain_finite_metrics();
        }
    }
}
