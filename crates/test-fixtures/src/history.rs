//! Compact golden report histories.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vitals_core::models::{CheckCategory, CheckStatus, HealthCheckReport};

use crate::builders::{result, ReportFixture};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub hour: i64,
    pub score: u8,
    pub status: CheckStatus,
    #[serde(default = "default_duration")]
    pub duration_ms: u64,
    /// Per-category status and optional primary metric.
    #[serde(default)]
    pub categories: BTreeMap<CheckCategory, CategoryPoint>,
    #[serde(default)]
    pub issues: Vec<String>,
}

fn default_duration() -> u64 {
    1_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub status: CheckStatus,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedAnalytics {
    pub overall_trend: String,
    pub overall_percentage: f64,
    pub uptime_percentage: f64,
    #[serde(default)]
    pub category_trends: BTreeMap<CheckCategory, String>,
    #[serde(default)]
    pub min_recommendations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFixture {
    pub description: String,
    pub points: Vec<HistoryPoint>,
    pub expected: ExpectedAnalytics,
}

impl HistoryFixture {
    /// Expand the points into full reports, ids `"{prefix}-{index}"`.
    pub fn reports(&self, prefix: &str) -> Vec<HealthCheckReport> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let mut fixture = ReportFixture::new(format!("{prefix}-{i}"))
                    .at_hour(p.hour)
                    .score(p.score)
                    .status(p.status)
                    .duration_ms(p.duration_ms);
                for (category, point) in &p.categories {
                    let mut r = result(*category, point.status);
                    if let Some(score) = point.score {
                        r = r.with_metric("score", score);
                    }
                    fixture = fixture.result(r);
                }
                for title in &p.issues {
                    let category = p
                        .categories
                        .keys()
                        .next()
                        .copied()
                        .unwrap_or(CheckCategory::ErrorHandling);
                    fixture = fixture.issue(category, title);
                }
                fixture.build()
            })
            .collect()
    }
}
