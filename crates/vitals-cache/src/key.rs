//! Cache key derivation: category plus blake3 digest of the resolved config.

use std::fmt;

use vitals_core::errors::CacheError;
use vitals_core::models::{CheckCategory, CheckConfig};

/// Number of hex characters of the config digest kept in the key.
const DIGEST_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    category: CheckCategory,
    config_hash: String,
}

impl CacheKey {
    /// Derive the key for a category under a resolved config.
    ///
    /// Identical configs always produce identical keys: `serde_json` maps
    /// serialize with sorted keys.
    pub fn derive(category: CheckCategory, config: &CheckConfig) -> Result<Self, CacheError> {
        let bytes = serde_json::to_vec(config).map_err(|e| CacheError::KeyDerivation {
            reason: e.to_string(),
        })?;
        let digest = blake3::hash(&bytes).to_hex();
        Ok(Self {
            category,
            config_hash: digest.as_str()[..DIGEST_LEN].to_string(),
        })
    }

    pub fn category(&self) -> CheckCategory {
        self.category
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category.as_str(), self.config_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_configs_share_a_key() {
        let a = CacheKey::derive(CheckCategory::Security, &CheckConfig::default()).unwrap();
        let b = CacheKey::derive(CheckCategory::Security, &CheckConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn config_change_changes_key() {
        let base = CheckConfig::default();
        let tweaked = CheckConfig {
            timeout_ms: base.timeout_ms + 1,
            ..base.clone()
        };
        let a = CacheKey::derive(CheckCategory::Security, &base).unwrap();
        let b = CacheKey::derive(CheckCategory::Security, &tweaked).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn category_is_part_of_key() {
        let config = CheckConfig::default();
        let a = CacheKey::derive(CheckCategory::Security, &config).unwrap();
        let b = CacheKey::derive(CheckCategory::Performance, &config).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.config_hash(), b.config_hash());
        assert!(a.to_string().starts_with("security:"));
    }

    #[test]
    fn parameter_object_order_does_not_matter() {
        let a = CheckConfig {
            parameters: Some(serde_json::json!({"endpoint": "/health", "method": "GET"})),
            ..CheckConfig::default()
        };
        let b = CheckConfig {
            parameters: Some(serde_json::json!({"method": "GET", "endpoint": "/health"})),
            ..CheckConfig::default()
        };
        assert_eq!(
            CacheKey::derive(CheckCategory::ApiConnectivity, &a).unwrap(),
            CacheKey::derive(CheckCategory::ApiConnectivity, &b).unwrap()
        );
    }
}
