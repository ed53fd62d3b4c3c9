use serde::{Deserialize, Serialize};

use super::CheckCategory;
use crate::config::defaults;

/// Persisted engine-wide settings applied when a run request leaves them open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Categories run when a request names none.
    pub enabled_categories: Vec<CheckCategory>,
    /// Execution mode when a request does not specify one.
    pub parallel: bool,
    /// Reports and results older than this are removed by maintenance.
    pub retention_days: u32,
    /// Run repository cleanup as part of runtime maintenance.
    pub auto_cleanup: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enabled_categories: CheckCategory::ALL.to_vec(),
            parallel: defaults::DEFAULT_PARALLEL,
            retention_days: defaults::DEFAULT_RETENTION_DAYS,
            auto_cleanup: true,
        }
    }
}
