use serde::{Deserialize, Serialize};

use super::defaults;

/// Result cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Master switch. Categories still opt in individually via `CheckConfig.cache_enabled`.
    pub enabled: bool,
    /// TTL applied when a category does not set its own.
    pub default_ttl_ms: u64,
    /// Also cache `Failed` outcomes.
    pub cache_failures: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_CACHE_ENABLED,
            default_ttl_ms: defaults::DEFAULT_CACHE_TTL_MS,
            cache_failures: defaults::DEFAULT_CACHE_FAILURES,
        }
    }
}
