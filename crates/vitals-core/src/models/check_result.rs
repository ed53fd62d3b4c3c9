use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CheckCategory, CheckStatus, Severity};
use crate::constants::{NON_FINITE_METRICS_KEY, PRIMARY_METRIC_KEY};
use crate::errors::CheckError;

/// Error payload attached to a failed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckErrorInfo {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Outcome of one category's check within a run.
///
/// Created once per category per run from the last attempt. Immutable once
/// handed back to the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: String,
    pub category: CheckCategory,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CheckErrorInfo>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub auto_fix_available: bool,
}

impl CheckResult {
    pub fn new(
        category: CheckCategory,
        name: impl Into<String>,
        status: CheckStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            name: name.into(),
            description: String::new(),
            status,
            severity: None,
            duration_ms: 0,
            timestamp: Utc::now(),
            message: message.into(),
            metrics: None,
            details: None,
            error: None,
            suggestions: Vec::new(),
            auto_fix_available: false,
        }
    }

    /// Synthesize the `Failed` result that replaces a category whose
    /// attempts all errored.
    pub fn from_error(
        category: CheckCategory,
        name: impl Into<String>,
        err: &CheckError,
        duration_ms: u64,
    ) -> Self {
        let mut result = Self::new(category, name, CheckStatus::Failed, err.to_string());
        result.duration_ms = duration_ms;
        result.error = Some(CheckErrorInfo {
            code: err.code().to_string(),
            message: err.to_string(),
            stack: None,
        });
        result
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metrics
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }

    pub fn with_metrics(mut self, metrics: BTreeMap<String, f64>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_auto_fix(mut self, available: bool) -> Self {
        self.auto_fix_available = available;
        self
    }

    /// Explicit severity, or the one implied by the status.
    pub fn effective_severity(&self) -> Severity {
        self.severity
            .unwrap_or_else(|| Severity::default_for(self.status))
    }

    pub fn has_non_finite_metrics(&self) -> bool {
        self.metrics
            .as_ref()
            .is_some_and(|m| m.values().any(|v| !v.is_finite()))
    }

    /// Drop NaN and infinite metric values, which JSON cannot carry.
    ///
    /// Dropped keys are listed under `details.non_finite_metrics`. Details
    /// that are not an object are kept under `details.value`. Returns the
    /// dropped keys.
    pub fn retain_finite_metrics(&mut self) -> Vec<String> {
        let Some(metrics) = self.metrics.as_mut() else {
            return Vec::new();
        };
        let dropped: Vec<String> = metrics
            .iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(k, _)| k.clone())
            .collect();
        if dropped.is_empty() {
            return dropped;
        }
        metrics.retain(|_, v| v.is_finite());

        let mut details = match self.details.take() {
            Some(serde_json::Value::Object(map)) => map,
            Some(other) => {
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
            None => serde_json::Map::new(),
        };
        details.insert(
            NON_FINITE_METRICS_KEY.to_string(),
            serde_json::Value::from(dropped.clone()),
        );
        self.details = Some(serde_json::Value::Object(details));
        dropped
    }

    /// Value of the primary metric, if the check reported one.
    pub fn primary_metric(&self) -> Option<f64> {
        self.metrics
            .as_ref()
            .and_then(|m| m.get(PRIMARY_METRIC_KEY).copied())
    }
}
