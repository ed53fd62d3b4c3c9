use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    CheckCategory, CheckConfig, CheckResult, CheckStatus, GlobalConfig, HealthCheckReport,
    Severity,
};

/// Aggregates over results stored in the last N days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResultStatistics {
    pub total: usize,
    pub by_status: BTreeMap<CheckStatus, usize>,
    pub by_category: BTreeMap<CheckCategory, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
    /// Mean status score of the results, 0-100.
    pub average_score: f64,
    pub average_duration: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupSummary {
    pub deleted_results: usize,
    pub deleted_reports: usize,
}

/// Versioned JSON bundle of everything the repository persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub results: Vec<CheckResult>,
    pub reports: Vec<HealthCheckReport>,
    pub configs: BTreeMap<CheckCategory, CheckConfig>,
    pub global_config: Option<GlobalConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported_results: usize,
    pub imported_reports: usize,
    pub imported_configs: usize,
}
