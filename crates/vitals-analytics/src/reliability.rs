//! Uptime, mean time between failures, and recovery time over a report series.

use vitals_core::models::{CheckStatus, HealthCheckReport};

use crate::types::ReliabilityStats;

/// `reports` must be sorted by timestamp.
///
/// - uptime: Passed reports / all reports * 100
/// - MTBF: mean gap from each Failed report to the next report
/// - recovery: mean gap from a Failed report to an immediately following Passed one
pub fn compute(reports: &[HealthCheckReport]) -> ReliabilityStats {
    let total = reports.len();
    let passed = count(reports, CheckStatus::Passed);
    let failed = count(reports, CheckStatus::Failed);
    let uptime_percentage = if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64 * 100.0
    };

    let mut failure_gaps = Vec::new();
    let mut recovery_gaps = Vec::new();
    for pair in reports.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if current.summary.overall_status != CheckStatus::Failed {
            continue;
        }
        let gap = (next.timestamp - current.timestamp).num_milliseconds() as f64;
        failure_gaps.push(gap);
        if next.summary.overall_status == CheckStatus::Passed {
            recovery_gaps.push(gap);
        }
    }

    ReliabilityStats {
        uptime_percentage,
        mean_time_between_failures_ms: average(&failure_gaps),
        average_recovery_time_ms: average(&recovery_gaps),
        reliability_score: uptime_percentage,
        failed_reports: failed,
    }
}

fn count(reports: &[HealthCheckReport], status: CheckStatus) -> usize {
    reports
        .iter()
        .filter(|r| r.summary.overall_status == status)
        .count()
}

fn average(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
