//! Versioned export bundles.

use std::collections::BTreeMap;

use chrono::Utc;

use vitals_core::constants::EXPORT_BUNDLE_VERSION;
use vitals_core::errors::{StorageError, VitalsResult};
use vitals_core::models::{CheckCategory, CheckConfig, CheckResult, ExportBundle, GlobalConfig, HealthCheckReport};

/// Assemble a bundle at the current version. `results` holds only results
/// saved outside a report; report-owned results travel inside their report.
pub fn assemble(
    results: Vec<CheckResult>,
    reports: Vec<HealthCheckReport>,
    configs: BTreeMap<CheckCategory, CheckConfig>,
    global_config: Option<GlobalConfig>,
) -> ExportBundle {
    ExportBundle {
        version: EXPORT_BUNDLE_VERSION,
        exported_at: Utc::now(),
        results,
        reports,
        configs,
        global_config,
    }
}

/// Reject bundles written by any other format version.
pub fn check_version(bundle: &ExportBundle) -> VitalsResult<()> {
    if bundle.version != EXPORT_BUNDLE_VERSION {
        return Err(StorageError::UnsupportedBundleVersion {
            expected: EXPORT_BUNDLE_VERSION,
            actual: bundle.version,
        }
        .into());
    }
    Ok(())
}

/// Parse a JSON bundle and check its version.
pub fn from_json(json: &str) -> VitalsResult<ExportBundle> {
    let bundle: ExportBundle = serde_json::from_str(json)?;
    check_version(&bundle)?;
    Ok(bundle)
}

pub fn to_json(bundle: &ExportBundle) -> VitalsResult<String> {
    Ok(serde_json::to_string_pretty(bundle)?)
}
