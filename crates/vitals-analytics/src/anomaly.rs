//! Z-score outliers in the report score series.

use vitals_core::models::HealthCheckReport;

use crate::trend::mean;
use crate::types::ScoreAnomaly;

pub const MIN_ANOMALY_POINTS: usize = 3;

/// Reports whose score lies more than `threshold` population standard
/// deviations from the window mean. Empty when the window is too small or
/// every score is equal.
pub fn detect(reports: &[HealthCheckReport], threshold: f64) -> Vec<ScoreAnomaly> {
    if reports.len() < MIN_ANOMALY_POINTS {
        return Vec::new();
    }
    let scores: Vec<f64> = reports.iter().map(|r| f64::from(r.summary.score)).collect();
    let avg = mean(&scores);
    let variance = scores.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / scores.len() as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return Vec::new();
    }

    reports
        .iter()
        .zip(&scores)
        .filter_map(|(report, score)| {
            let z_score = (score - avg) / std_dev;
            (z_score.abs() > threshold).then(|| ScoreAnomaly {
                report_id: report.id.clone(),
                timestamp: report.timestamp,
                score: report.summary.score,
                z_score,
            })
        })
        .collect()
}
