//! # vitals-analytics
//!
//! Stateless analysis of a window of stored reports: half-over-half trend
//! classification for the overall score and each category, reliability
//! statistics, score anomalies, recurring issues, a next-score projection,
//! and threshold-driven recommendations.

pub mod anomaly;
pub mod engine;
pub mod recommendations;
pub mod recurring;
pub mod reliability;
pub mod trend;
pub mod types;

pub use engine::AnalyticsEngine;
pub use trend::TrendAnalyzer;
pub use types::{
    AnalyticsReport, AnalyticsWindow, CategoryTrend, RecurringIssue, ReliabilityStats,
    ScoreAnomaly, Trend, TrendDirection,
};
