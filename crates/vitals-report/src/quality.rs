//! Severity/duration-penalty "quality score".
//!
//! An alternate utility score. [`ScoringEngine`](crate::ScoringEngine)
//! alone decides `summary.score`.

use vitals_core::models::{CheckResult, CheckStatus, Severity};

const SLOW_MS: u64 = 10_000;
const VERY_SLOW_MS: u64 = 30_000;

pub struct QualityScorer;

impl QualityScorer {
    fn failure_penalty(severity: Severity) -> f64 {
        match severity {
            Severity::Critical => 25.0,
            Severity::High => 15.0,
            Severity::Medium => 10.0,
            Severity::Low => 5.0,
        }
    }

    fn duration_penalty(duration_ms: u64) -> f64 {
        if duration_ms > VERY_SLOW_MS {
            5.0
        } else if duration_ms > SLOW_MS {
            2.0
        } else {
            0.0
        }
    }

    pub fn score(results: &[CheckResult]) -> u8 {
        let mut score = 100.0;
        for result in results {
            let severity = result.effective_severity();
            score -= match result.status {
                CheckStatus::Failed => Self::failure_penalty(severity),
                CheckStatus::Warning => Self::failure_penalty(severity) / 2.0,
                _ => 0.0,
            };
            score -= Self::duration_penalty(result.duration_ms);
        }
        score.clamp(0.0, 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::models::CheckCategory;

    #[test]
    fn clean_fast_run_is_perfect() {
        let r = CheckResult::new(CheckCategory::Security, "s", CheckStatus::Passed, "")
            .with_duration_ms(50);
        assert_eq!(QualityScorer::score(&[r]), 100);
    }

    #[test]
    fn penalties_stack() {
        let failed = CheckResult::new(CheckCategory::Security, "s", CheckStatus::Failed, "")
            .with_severity(Severity::Critical)
            .with_duration_ms(31_000);
        // Warning with implied Medium severity, slow.
        let warning = CheckResult::new(CheckCategory::Performance, "p", CheckStatus::Warning, "")
            .with_duration_ms(12_000);
        // 100 - 25 - 5 - 5 - 2
        assert_eq!(QualityScorer::score(&[failed, warning]), 63);
    }

    #[test]
    fn never_below_zero() {
        let results: Vec<_> = (0..10)
            .map(|_| {
                CheckResult::new(CheckCategory::Security, "s", CheckStatus::Failed, "")
                    .with_severity(Severity::Critical)
            })
            .collect();
        assert_eq!(QualityScorer::score(&results), 0);
    }
}
