//! One [`Issue`] per Failed or Warning result.

use vitals_core::models::{CheckResult, CheckStatus, Difficulty, Issue, Resolution, Severity};

use crate::impact::impact_for;

pub struct IssueGenerator;

impl IssueGenerator {
    pub fn generate(results: &[CheckResult]) -> Vec<Issue> {
        results
            .iter()
            .filter(|r| r.status.is_problem())
            .map(Self::issue_for)
            .collect()
    }

    /// Stable across runs so recurring problems group by title.
    pub fn title_for(result: &CheckResult) -> String {
        match result.status {
            CheckStatus::Failed => format!("{} failed", result.name),
            _ => format!("{} needs attention", result.name),
        }
    }

    fn issue_for(result: &CheckResult) -> Issue {
        let severity = result.severity.unwrap_or(Severity::Medium);
        let resolution = (!result.suggestions.is_empty()).then(|| Resolution {
            steps: result.suggestions.clone(),
            difficulty: Difficulty::for_severity(severity),
        });

        Issue {
            id: uuid::Uuid::new_v4().to_string(),
            category: result.category,
            severity,
            title: Self::title_for(result),
            description: result.message.clone(),
            affected_checks: vec![result.id.clone()],
            impact: impact_for(result.category, severity).to_string(),
            root_cause: result.error.as_ref().map(|e| e.message.clone()),
            resolution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::errors::CheckError;
    use vitals_core::models::CheckCategory;

    #[test]
    fn passed_and_skipped_produce_nothing() {
        let results = [
            CheckResult::new(CheckCategory::Security, "Security", CheckStatus::Passed, ""),
            CheckResult::new(CheckCategory::Security, "Security", CheckStatus::Skipped, ""),
        ];
        assert!(IssueGenerator::generate(&results).is_empty());
    }

    #[test]
    fn failed_result_maps_fields() {
        let err = CheckError::failed(CheckCategory::ApiConnectivity, "connection refused");
        let result = CheckResult::from_error(CheckCategory::ApiConnectivity, "API", &err, 12)
            .with_severity(Severity::Critical)
            .with_suggestions(["Check the API key", "Retry later"]);

        let issues = IssueGenerator::generate(std::slice::from_ref(&result));
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.severity, Severity::Critical);
        assert_eq!(issue.impact, "AI transcription services are unavailable");
        assert_eq!(issue.affected_checks, vec![result.id.clone()]);
        assert_eq!(issue.title, "API failed");
        assert!(issue.root_cause.as_deref().unwrap().contains("connection refused"));
        let resolution = issue.resolution.as_ref().unwrap();
        assert_eq!(resolution.steps.len(), 2);
        assert_eq!(resolution.difficulty, Difficulty::Hard);
    }

    #[test]
    fn missing_severity_defaults_to_medium() {
        let result =
            CheckResult::new(CheckCategory::Performance, "Perf", CheckStatus::Warning, "slow");
        let issue = &IssueGenerator::generate(&[result])[0];
        assert_eq!(issue.severity, Severity::Medium);
        assert!(issue.resolution.is_none());
        assert!(issue.root_cause.is_none());
        assert_eq!(issue.title, "Perf needs attention");
    }
}
