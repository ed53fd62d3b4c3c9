//! Analytics output types.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitals_core::models::{CheckCategory, Recommendation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction and magnitude of a time-ordered series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// `(last - first) / first * 100`; 0 when `first == 0` or fewer than 2 points.
    pub percentage: f64,
    pub first_half_avg: f64,
    pub second_half_avg: f64,
    pub points: usize,
}

impl Trend {
    pub fn flat(points: usize) -> Self {
        Self {
            direction: TrendDirection::Stable,
            percentage: 0.0,
            first_half_avg: 0.0,
            second_half_avg: 0.0,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrend {
    pub category: CheckCategory,
    pub trend: Trend,
    /// Passed results over results of this category, 0-100.
    pub success_rate: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityStats {
    /// Passed reports over all reports, 0-100.
    pub uptime_percentage: f64,
    /// Mean gap from a Failed report to the report after it.
    pub mean_time_between_failures_ms: Option<f64>,
    /// Mean gap from a Failed report to an immediately following Passed one.
    pub average_recovery_time_ms: Option<f64>,
    pub reliability_score: f64,
    pub failed_reports: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAnomaly {
    pub report_id: String,
    pub timestamp: DateTime<Utc>,
    pub score: u8,
    pub z_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringIssue {
    pub title: String,
    pub category: CheckCategory,
    pub occurrences: usize,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Inclusive time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AnalyticsWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub window: AnalyticsWindow,
    pub report_count: usize,
    pub average_score: f64,
    pub average_duration_ms: f64,
    /// Passed results over all results in the window, 0-100.
    pub success_rate: f64,
    pub overall: Trend,
    pub categories: BTreeMap<CheckCategory, CategoryTrend>,
    pub reliability: ReliabilityStats,
    pub anomalies: Vec<ScoreAnomaly>,
    pub recurring_issues: Vec<RecurringIssue>,
    /// Least-squares projection of the next report's score.
    pub projected_score: Option<f64>,
    pub recommendations: Vec<Recommendation>,
}
