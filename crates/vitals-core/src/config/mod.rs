//! Configuration system for Vitals.
//! TOML-based; every section falls back to the values in [`defaults`].

pub mod analytics_config;
pub mod cache_config;
pub mod defaults;
pub mod observability_config;
pub mod scheduler_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use analytics_config::AnalyticsConfig;
pub use cache_config::CacheConfig;
pub use observability_config::ObservabilityConfig;
pub use scheduler_config::SchedulerConfig;
pub use storage_config::StorageConfig;

use crate::errors::{VitalsError, VitalsResult};

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    pub scheduler: SchedulerConfig,
    pub cache: CacheConfig,
    pub storage: StorageConfig,
    pub analytics: AnalyticsConfig,
    pub observability: ObservabilityConfig,
}

impl VitalsConfig {
    /// Parse a TOML string. Missing sections and keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> VitalsResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| VitalsError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> VitalsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VitalsError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> VitalsResult<()> {
        if self.scheduler.default_timeout_ms == 0 {
            return Err(invalid("scheduler.default_timeout_ms", "must be greater than 0"));
        }
        if self.scheduler.retry_backoff_base_ms == 0 {
            return Err(invalid("scheduler.retry_backoff_base_ms", "must be greater than 0"));
        }
        if self.scheduler.progress_channel_capacity == 0 {
            return Err(invalid(
                "scheduler.progress_channel_capacity",
                "must be greater than 0",
            ));
        }
        if self.cache.default_ttl_ms == 0 {
            return Err(invalid("cache.default_ttl_ms", "must be greater than 0"));
        }
        let a = &self.analytics;
        for (field, value) in [
            ("analytics.overall_decline_pct", a.overall_decline_pct),
            ("analytics.success_rate_floor", a.success_rate_floor),
            ("analytics.reliability_floor", a.reliability_floor),
            ("analytics.category_decline_pct", a.category_decline_pct),
            ("analytics.category_success_floor", a.category_success_floor),
            ("analytics.trend_threshold", a.trend_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(field, "must be between 0 and 100"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> VitalsError {
    VitalsError::ConfigError(format!("{field}: {message}"))
}
