use serde::{Deserialize, Serialize};

use super::defaults;

/// Thresholds used by trend analysis and analytics recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Half-over-half mean delta that counts as improving/declining.
    pub trend_threshold: f64,
    /// Overall score decline (percent) that raises a high-priority recommendation.
    pub overall_decline_pct: f64,
    /// Check success rate (percent) below which a high-priority recommendation is raised.
    pub success_rate_floor: f64,
    /// Reliability score (percent) below which a medium-priority recommendation is raised.
    pub reliability_floor: f64,
    /// Per-category decline (percent) that raises a medium-priority recommendation.
    pub category_decline_pct: f64,
    /// Per-category success rate (percent) floor.
    pub category_success_floor: f64,
    /// Average run duration (ms) above which a low-priority recommendation is raised.
    pub slow_run_ms: f64,
    /// Z-score beyond which a report score counts as anomalous.
    pub anomaly_z_threshold: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_threshold: defaults::DEFAULT_TREND_THRESHOLD,
            overall_decline_pct: defaults::DEFAULT_OVERALL_DECLINE_PCT,
            success_rate_floor: defaults::DEFAULT_SUCCESS_RATE_FLOOR,
            reliability_floor: defaults::DEFAULT_RELIABILITY_FLOOR,
            category_decline_pct: defaults::DEFAULT_CATEGORY_DECLINE_PCT,
            category_success_floor: defaults::DEFAULT_CATEGORY_SUCCESS_FLOOR,
            slow_run_ms: defaults::DEFAULT_SLOW_RUN_MS,
            anomaly_z_threshold: defaults::DEFAULT_ANOMALY_Z_THRESHOLD,
        }
    }
}
