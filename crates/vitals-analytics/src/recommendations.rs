//! Threshold-driven recommendations over an analysed window.
//!
//! - overall score fell by more than `overall_decline_pct` -> High
//! - check success rate under `success_rate_floor` -> High
//! - reliability under `reliability_floor` -> Medium
//! - a category fell by more than `category_decline_pct`, or its success
//!   rate is under `category_success_floor` -> Medium
//! - average run slower than `slow_run_ms` -> Low

use std::cmp::Reverse;

use vitals_core::config::AnalyticsConfig;
use vitals_core::models::{CheckCategory, Effort, Implementation, Priority, Recommendation};

use crate::types::AnalyticsReport;

/// Recommendations for `report`, highest priority first. An empty window
/// yields none.
pub fn generate(report: &AnalyticsReport, config: &AnalyticsConfig) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    if report.report_count == 0 {
        return recs;
    }

    if report.overall.percentage < -config.overall_decline_pct {
        recs.push(recommendation(
            None,
            Priority::High,
            "Investigate the overall health decline",
            format!(
                "The overall health score fell {:.1}% across the window.",
                -report.overall.percentage
            ),
            "Restores the overall health score",
        ));
    }

    if !report.categories.is_empty() && report.success_rate < config.success_rate_floor {
        recs.push(recommendation(
            None,
            Priority::High,
            "Raise the check success rate",
            format!(
                "Only {:.1}% of checks passed; the floor is {:.0}%.",
                report.success_rate, config.success_rate_floor
            ),
            "Fewer failing checks per run",
        ));
    }

    if report.reliability.reliability_score < config.reliability_floor {
        recs.push(recommendation(
            None,
            Priority::Medium,
            "Improve run reliability",
            format!(
                "{:.1}% of runs passed outright; the floor is {:.0}%.",
                report.reliability.reliability_score, config.reliability_floor
            ),
            "More runs complete without failures",
        ));
    }

    for (category, trend) in &report.categories {
        let declining = trend.trend.percentage < -config.category_decline_pct;
        let unreliable = trend.success_rate < config.category_success_floor;
        if !(declining || unreliable) {
            continue;
        }
        let description = if declining {
            format!(
                "{} fell {:.1}% across the window.",
                category.display_name(),
                -trend.trend.percentage
            )
        } else {
            format!(
                "{} passed {:.1}% of the time.",
                category.display_name(),
                trend.success_rate
            )
        };
        recs.push(recommendation(
            Some(*category),
            Priority::Medium,
            format!("Stabilize {}", category.display_name()),
            description,
            format!("Improves {} health", category.display_name()),
        ));
    }

    if report.average_duration_ms > config.slow_run_ms {
        recs.push(recommendation(
            None,
            Priority::Low,
            "Shorten health check runs",
            format!(
                "Runs take {:.0} ms on average; the target is under {:.0} ms.",
                report.average_duration_ms, config.slow_run_ms
            ),
            "Faster feedback from each run",
        ));
    }

    recs.sort_by_key(|r| Reverse(r.priority));
    recs
}

fn recommendation(
    category: Option<CheckCategory>,
    priority: Priority,
    title: impl Into<String>,
    description: String,
    benefit: impl Into<String>,
) -> Recommendation {
    let (effort, timeframe) = match priority {
        Priority::High => (Effort::High, "1-3 days"),
        Priority::Medium => (Effort::Medium, "1 week"),
        Priority::Low => (Effort::Low, "2 weeks"),
    };
    Recommendation {
        id: uuid::Uuid::new_v4().to_string(),
        category,
        priority,
        title: title.into(),
        description,
        implementation: Implementation {
            effort,
            timeframe: timeframe.to_string(),
        },
        benefits: vec![benefit.into()],
        related_issues: Vec::new(),
    }
}
