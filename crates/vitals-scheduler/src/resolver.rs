//! Category selection and effective config resolution.

use std::collections::HashSet;

use vitals_core::config::SchedulerConfig;
use vitals_core::models::{CheckCategory, CheckConfig, RunOverrides, Severity};

/// Requested categories with duplicates removed, first occurrence kept.
pub fn select_categories(requested: &[CheckCategory]) -> Vec<CheckCategory> {
    let mut seen = HashSet::new();
    requested.iter().copied().filter(|c| seen.insert(*c)).collect()
}

/// Hard default used when the repository has no stored config for a category.
pub fn hard_default(config: &SchedulerConfig) -> CheckConfig {
    CheckConfig {
        timeout_ms: config.default_timeout_ms,
        retry_count: config.default_retry_count,
        severity: config.default_severity,
        ..CheckConfig::default()
    }
}

/// Run override > stored category config > hard default.
pub fn resolve(
    stored: Option<CheckConfig>,
    overrides: &RunOverrides,
    defaults: &SchedulerConfig,
) -> CheckConfig {
    let mut config = stored.unwrap_or_else(|| hard_default(defaults));
    if let Some(timeout_ms) = overrides.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(retry_count) = overrides.retry_count {
        config.retry_count = retry_count;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_keep_first_position() {
        let selected = select_categories(&[
            CheckCategory::Security,
            CheckCategory::Performance,
            CheckCategory::Security,
        ]);
        assert_eq!(selected, vec![CheckCategory::Security, CheckCategory::Performance]);
    }

    #[test]
    fn override_beats_stored_beats_default() {
        let defaults = SchedulerConfig::default();
        let stored = CheckConfig::default_for(CheckCategory::ApiConnectivity);

        let plain = resolve(None, &RunOverrides::default(), &defaults);
        assert_eq!(plain.timeout_ms, 30_000);
        assert_eq!(plain.retry_count, 1);
        assert_eq!(plain.severity, Severity::Medium);

        let from_store = resolve(Some(stored.clone()), &RunOverrides::default(), &defaults);
        assert_eq!(from_store.timeout_ms, 10_000);
        assert_eq!(from_store.retry_count, 3);

        let overridden = resolve(
            Some(stored),
            &RunOverrides {
                timeout_ms: Some(500),
                retry_count: None,
                parallel: None,
            },
            &defaults,
        );
        assert_eq!(overridden.timeout_ms, 500);
        assert_eq!(overridden.retry_count, 3);
        assert_eq!(overridden.severity, Severity::High);
    }

    #[test]
    fn hard_default_takes_configured_severity() {
        let defaults = SchedulerConfig {
            default_severity: Severity::Critical,
            ..SchedulerConfig::default()
        };
        let resolved = resolve(None, &RunOverrides::default(), &defaults);
        assert_eq!(resolved.severity, Severity::Critical);

        let stored = CheckConfig::default_for(CheckCategory::OfflineCapability);
        let resolved = resolve(Some(stored), &RunOverrides::default(), &defaults);
        assert_eq!(resolved.severity, Severity::Low);
    }
}
