//! [`AnalyticsEngine`]: one pass over a window of reports.

use std::collections::BTreeMap;

use vitals_core::config::AnalyticsConfig;
use vitals_core::models::{CheckCategory, CheckResult, CheckStatus, HealthCheckReport};

use crate::trend::{mean, project_next, TrendAnalyzer};
use crate::types::{AnalyticsReport, AnalyticsWindow, CategoryTrend};
use crate::{anomaly, recommendations, recurring, reliability};

/// Stateless between calls; callers fetch the reports.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyse the reports that fall inside `window`, in timestamp order.
    pub fn analyze(&self, reports: &[HealthCheckReport], window: AnalyticsWindow) -> AnalyticsReport {
        let mut in_window: Vec<HealthCheckReport> = reports
            .iter()
            .filter(|r| window.contains(r.timestamp))
            .cloned()
            .collect();
        in_window.sort_by_key(|r| r.timestamp);

        let analyzer = TrendAnalyzer::new(self.config.trend_threshold);
        let scores: Vec<f64> = in_window.iter().map(|r| f64::from(r.summary.score)).collect();
        let durations: Vec<f64> = in_window.iter().map(|r| r.duration_ms as f64).collect();

        let mut report = AnalyticsReport {
            window,
            report_count: in_window.len(),
            average_score: mean(&scores),
            average_duration_ms: mean(&durations),
            success_rate: success_rate(in_window.iter().flat_map(|r| &r.results)),
            overall: analyzer.classify(&scores),
            categories: category_trends(&analyzer, &in_window),
            reliability: reliability::compute(&in_window),
            anomalies: anomaly::detect(&in_window, self.config.anomaly_z_threshold),
            recurring_issues: recurring::find(&in_window),
            projected_score: project_next(&scores),
            recommendations: Vec::new(),
        };
        report.recommendations = recommendations::generate(&report, &self.config);

        tracing::debug!(
            reports = report.report_count,
            overall = %report.overall.direction,
            recommendations = report.recommendations.len(),
            "analytics computed"
        );
        report
    }
}

/// Per category: the series of primary metric values (falling back to the
/// status score) across the reports that include it.
fn category_trends(
    analyzer: &TrendAnalyzer,
    reports: &[HealthCheckReport],
) -> BTreeMap<CheckCategory, CategoryTrend> {
    let mut series: BTreeMap<CheckCategory, Vec<&CheckResult>> = BTreeMap::new();
    for report in reports {
        for result in &report.results {
            series.entry(result.category).or_default().push(result);
        }
    }

    series
        .into_iter()
        .map(|(category, results)| {
            let values: Vec<f64> = results.iter().map(|r| metric_value(r)).collect();
            let trend = CategoryTrend {
                category,
                trend: analyzer.classify(&values),
                success_rate: success_rate(results.iter().copied()),
                samples: results.len(),
            };
            (category, trend)
        })
        .collect()
}

fn metric_value(result: &CheckResult) -> f64 {
    result
        .primary_metric()
        .unwrap_or_else(|| f64::from(result.status.score()))
}

/// Passed results over all results, 0-100. 0 for no results.
fn success_rate<'a>(results: impl Iterator<Item = &'a CheckResult>) -> f64 {
    let (passed, total) = results.fold((0usize, 0usize), |(passed, total), r| {
        (passed + usize::from(r.status == CheckStatus::Passed), total + 1)
    });
    if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{result, ReportFixture};

    fn window_all() -> AnalyticsWindow {
        AnalyticsWindow::new(
            test_fixtures::builders::epoch(),
            test_fixtures::builders::epoch() + chrono::Duration::days(365),
        )
    }

    #[test]
    fn empty_window_is_neutral() {
        let report = AnalyticsEngine::default().analyze(&[], window_all());
        assert_eq!(report.report_count, 0);
        assert_eq!(report.average_score, 0.0);
        assert!(report.categories.is_empty());
        assert!(report.recommendations.is_empty());
        assert!(report.projected_score.is_none());
    }

    #[test]
    fn reports_outside_the_window_are_ignored() {
        let reports = vec![
            ReportFixture::new("in").at_hour(2).score(90).build(),
            ReportFixture::new("out").at_hour(-5).score(10).build(),
        ];
        let window = AnalyticsWindow::new(
            test_fixtures::builders::epoch(),
            test_fixtures::builders::epoch() + chrono::Duration::hours(3),
        );
        let report = AnalyticsEngine::default().analyze(&reports, window);
        assert_eq!(report.report_count, 1);
        assert_eq!(report.average_score, 90.0);
    }

    #[test]
    fn unsorted_input_is_ordered_before_trending() {
        let reports = vec![
            ReportFixture::new("c").at_hour(3).score(90).build(),
            ReportFixture::new("a").at_hour(1).score(60).build(),
            ReportFixture::new("d").at_hour(4).score(95).build(),
            ReportFixture::new("b").at_hour(2).score(70).build(),
        ];
        let report = AnalyticsEngine::default().analyze(&reports, window_all());
        assert_eq!(report.overall.direction, crate::TrendDirection::Improving);
        assert!((report.overall.percentage - (95.0 - 60.0) / 60.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn category_values_fall_back_to_status_scores() {
        let reports = vec![
            ReportFixture::new("a")
                .at_hour(0)
                .result(result(CheckCategory::Security, CheckStatus::Passed))
                .build(),
            ReportFixture::new("b")
                .at_hour(1)
                .result(result(CheckCategory::Security, CheckStatus::Failed))
                .build(),
        ];
        let report = AnalyticsEngine::default().analyze(&reports, window_all());
        let security = &report.categories[&CheckCategory::Security];
        assert_eq!(security.trend.direction, crate::TrendDirection::Declining);
        assert_eq!(security.success_rate, 50.0);
        assert_eq!(security.samples, 2);
        assert_eq!(report.success_rate, 50.0);
    }

    #[test]
    fn slow_runs_raise_a_low_priority_recommendation() {
        let reports: Vec<_> = (0..3)
            .map(|h| {
                ReportFixture::new(format!("r{h}"))
                    .at_hour(h)
                    .duration_ms(200_000)
                    .result(result(CheckCategory::Performance, CheckStatus::Passed))
                    .build()
            })
            .collect();
        let report = AnalyticsEngine::default().analyze(&reports, window_all());
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(
            report.recommendations[0].priority,
            vitals_core::models::Priority::Low
        );
    }
}
