//! Aggregates behind `get_check_result_statistics`.

use vitals_core::models::{CheckResult, CheckResultStatistics};

/// Fold results into counts by status/category/severity plus mean status
/// score and mean duration. Empty input yields all zeros.
pub fn compute<'a, I>(results: I) -> CheckResultStatistics
where
    I: IntoIterator<Item = &'a CheckResult>,
{
    let mut stats = CheckResultStatistics::default();
    let mut score_sum = 0.0;
    let mut duration_sum = 0.0;

    for result in results {
        stats.total += 1;
        *stats.by_status.entry(result.status).or_default() += 1;
        *stats.by_category.entry(result.category).or_default() += 1;
        *stats.by_severity.entry(result.effective_severity()).or_default() += 1;
        score_sum += f64::from(result.status.score());
        duration_sum += result.duration_ms as f64;
    }

    if stats.total > 0 {
        stats.average_score = score_sum / stats.total as f64;
        stats.average_duration = duration_sum / stats.total as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::models::{CheckCategory, CheckStatus, Severity};

    fn result(status: CheckStatus, duration_ms: u64) -> CheckResult {
        CheckResult::new(CheckCategory::Performance, "perf", status, "")
            .with_duration_ms(duration_ms)
    }

    #[test]
    fn empty_input_is_all_zero() {
        let stats = compute(std::iter::empty());
        assert_eq!(stats, CheckResultStatistics::default());
    }

    #[test]
    fn averages_status_scores_and_durations() {
        let results = vec![
            result(CheckStatus::Passed, 100),
            result(CheckStatus::Failed, 300),
            result(CheckStatus::Warning, 200),
        ];
        let stats = compute(&results);
        assert_eq!(stats.total, 3);
        assert!((stats.average_score - 170.0 / 3.0).abs() < 1e-9);
        assert!((stats.average_duration - 200.0).abs() < 1e-9);
        assert_eq!(stats.by_status[&CheckStatus::Failed], 1);
        assert_eq!(stats.by_category[&CheckCategory::Performance], 3);
        assert_eq!(stats.by_severity[&Severity::High], 1);
        assert_eq!(stats.by_severity[&Severity::Medium], 1);
        assert_eq!(stats.by_severity[&Severity::Low], 1);
    }
}
