//! Result and report builders.
//!
//! Reports built here carry an explicit score and status so tests do not
//! depend on the scoring crate.

use chrono::{DateTime, Duration, TimeZone, Utc};

use vitals_core::constants::VERSION;
use vitals_core::models::{
    CheckCategory, CheckResult, CheckStatus, HealthCheckReport, Issue, ReportMetadata,
    ReportSummary, RunTrigger, Severity, SystemInfo,
};

/// A result named after its category.
pub fn result(category: CheckCategory, status: CheckStatus) -> CheckResult {
    CheckResult::new(category, category.display_name(), status, status.as_str())
}

/// Fixed epoch for deterministic histories.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

pub struct ReportFixture {
    id: String,
    timestamp: DateTime<Utc>,
    duration_ms: u64,
    score: u8,
    overall_status: CheckStatus,
    results: Vec<CheckResult>,
    issues: Vec<Issue>,
}

impl ReportFixture {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: epoch(),
            duration_ms: 1_000,
            score: 100,
            overall_status: CheckStatus::Passed,
            results: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Timestamp `hours` after [`epoch`].
    pub fn at_hour(self, hours: i64) -> Self {
        self.at(epoch() + Duration::hours(hours))
    }

    pub fn score(mut self, score: u8) -> Self {
        self.score = score;
        self
    }

    pub fn status(mut self, status: CheckStatus) -> Self {
        self.overall_status = status;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn result(mut self, result: CheckResult) -> Self {
        self.results.push(result);
        self
    }

    /// Add an issue with the given title for a category.
    pub fn issue(mut self, category: CheckCategory, title: &str) -> Self {
        self.issues.push(Issue {
            id: format!("{}-issue-{}", self.id, self.issues.len()),
            category,
            severity: Severity::Medium,
            title: title.to_string(),
            description: title.to_string(),
            affected_checks: Vec::new(),
            impact: String::new(),
            root_cause: None,
            resolution: None,
        });
        self
    }

    pub fn build(self) -> HealthCheckReport {
        let results: Vec<CheckResult> = self
            .results
            .into_iter()
            .map(|r| r.with_timestamp(self.timestamp))
            .collect();
        let count = |status: CheckStatus| results.iter().filter(|r| r.status == status).count();
        let summary = ReportSummary {
            total: results.len(),
            passed: count(CheckStatus::Passed),
            failed: count(CheckStatus::Failed),
            warnings: count(CheckStatus::Warning),
            skipped: count(CheckStatus::Skipped),
            overall_status: self.overall_status,
            score: self.score,
        };
        let categories = results.iter().map(|r| r.category).collect();

        HealthCheckReport {
            id: self.id.clone(),
            timestamp: self.timestamp,
            duration_ms: self.duration_ms,
            summary,
            results,
            issues: self.issues,
            recommendations: Vec::new(),
            system_info: SystemInfo::collect(),
            metadata: ReportMetadata {
                run_id: self.id,
                trigger: RunTrigger::Scheduled,
                categories,
                parallel: false,
                resolved_configs: Default::default(),
                orchestration_error: None,
                engine_version: VERSION.to_string(),
            },
        }
    }
}
