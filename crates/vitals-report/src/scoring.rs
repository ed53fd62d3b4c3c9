//! Status-average scoring. The only formula behind `summary.score`.

use vitals_core::models::{CheckResult, CheckStatus, ReportSummary};

pub struct ScoringEngine;

impl ScoringEngine {
    /// Per-result score.
    pub fn status_score(status: CheckStatus) -> u8 {
        status.score()
    }

    /// Rounded mean of per-result scores; 0 for no results.
    pub fn score(results: &[CheckResult]) -> u8 {
        if results.is_empty() {
            return 0;
        }
        let sum: u64 = results
            .iter()
            .map(|r| u64::from(Self::status_score(r.status)))
            .sum();
        let mean = sum as f64 / results.len() as f64;
        mean.round().clamp(0.0, 100.0) as u8
    }

    /// First match wins: any Failed, then any Warning, otherwise Passed.
    /// No results at all yields `Pending`.
    pub fn overall_status(results: &[CheckResult]) -> CheckStatus {
        if results.is_empty() {
            return CheckStatus::Pending;
        }
        if results.iter().any(|r| r.status == CheckStatus::Failed) {
            CheckStatus::Failed
        } else if results.iter().any(|r| r.status == CheckStatus::Warning) {
            CheckStatus::Warning
        } else {
            CheckStatus::Passed
        }
    }

    pub fn summarize(results: &[CheckResult]) -> ReportSummary {
        let count = |status: CheckStatus| results.iter().filter(|r| r.status == status).count();
        ReportSummary {
            total: results.len(),
            passed: count(CheckStatus::Passed),
            failed: count(CheckStatus::Failed),
            warnings: count(CheckStatus::Warning),
            skipped: count(CheckStatus::Skipped),
            overall_status: Self::overall_status(results),
            score: Self::score(results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::models::CheckCategory;

    fn with_status(status: CheckStatus) -> CheckResult {
        CheckResult::new(CheckCategory::Performance, "p", status, "")
    }

    #[test]
    fn empty_is_pending_sentinel() {
        let summary = ScoringEngine::summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.overall_status, CheckStatus::Pending);
    }

    #[test]
    fn mean_is_rounded() {
        // (100 + 70 + 0) / 3 = 56.67
        let results = [
            with_status(CheckStatus::Passed),
            with_status(CheckStatus::Warning),
            with_status(CheckStatus::Failed),
        ];
        assert_eq!(ScoringEngine::score(&results), 57);
    }

    #[test]
    fn warning_beats_passed_but_not_failed() {
        let warn = [with_status(CheckStatus::Passed), with_status(CheckStatus::Warning)];
        assert_eq!(ScoringEngine::overall_status(&warn), CheckStatus::Warning);

        let fail = [with_status(CheckStatus::Warning), with_status(CheckStatus::Failed)];
        assert_eq!(ScoringEngine::overall_status(&fail), CheckStatus::Failed);
    }

    #[test]
    fn skipped_only_run_is_passed_with_half_score() {
        let results = [with_status(CheckStatus::Skipped)];
        let summary = ScoringEngine::summarize(&results);
        assert_eq!(summary.overall_status, CheckStatus::Passed);
        assert_eq!(summary.score, 50);
        assert_eq!(summary.skipped, 1);
    }
}
