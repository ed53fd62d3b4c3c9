use serde::{Deserialize, Serialize};

use super::{CheckCategory, Severity};
use crate::config::defaults;

/// Effective configuration of one category for one run.
///
/// Resolved by merging run overrides over the stored category config over
/// the hard default; never mutated after resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub enabled: bool,
    pub timeout_ms: u64,
    pub retry_count: u32,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<CheckCategory>,
    /// Consult the result cache before invoking the check.
    pub cache_enabled: bool,
    /// Per-category TTL; falls back to the cache default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_ms: Option<u64>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: defaults::DEFAULT_CHECK_TIMEOUT_MS,
            retry_count: defaults::DEFAULT_RETRY_COUNT,
            severity: Severity::Medium,
            parameters: None,
            dependencies: Vec::new(),
            cache_enabled: false,
            cache_ttl_ms: None,
        }
    }
}

impl CheckConfig {
    /// Shipped per-category defaults, seeded into the repository on first start.
    pub fn default_for(category: CheckCategory) -> Self {
        let (timeout_ms, retry_count, severity) = match category {
            CheckCategory::ApiConnectivity => (10_000, 3, Severity::High),
            CheckCategory::ErrorHandling => (5_000, 1, Severity::Medium),
            CheckCategory::Performance => (30_000, 1, Severity::Medium),
            CheckCategory::UserExperience => (15_000, 1, Severity::Medium),
            CheckCategory::Security => (10_000, 1, Severity::High),
            CheckCategory::OfflineCapability => (5_000, 1, Severity::Low),
        };
        Self {
            timeout_ms,
            retry_count,
            severity,
            ..Self::default()
        }
    }
}

/// Run-level overrides. `None` keeps the stored/default value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOverrides {
    pub timeout_ms: Option<u64>,
    pub retry_count: Option<u32>,
    pub parallel: Option<bool>,
}
