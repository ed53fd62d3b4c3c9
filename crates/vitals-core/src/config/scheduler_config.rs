use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Severity;

/// Scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Hard default timeout when neither the run nor the stored config sets one.
    pub default_timeout_ms: u64,
    /// Hard default retry count.
    pub default_retry_count: u32,
    /// Severity for categories with no stored config.
    pub default_severity: Severity,
    /// Retry backoff base; attempt n waits `base * (n + 1)`.
    pub retry_backoff_base_ms: u64,
    /// Execution mode when neither the request nor the global config decides.
    pub parallel: bool,
    /// Cap on concurrently running checks in parallel mode. 0 disables the cap.
    pub max_concurrency: usize,
    /// Buffered progress events per run before slow subscribers lag.
    pub progress_channel_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: defaults::DEFAULT_CHECK_TIMEOUT_MS,
            default_retry_count: defaults::DEFAULT_RETRY_COUNT,
            default_severity: defaults::DEFAULT_SEVERITY,
            retry_backoff_base_ms: defaults::DEFAULT_RETRY_BACKOFF_BASE_MS,
            parallel: defaults::DEFAULT_PARALLEL,
            max_concurrency: defaults::DEFAULT_MAX_CONCURRENCY,
            progress_channel_capacity: defaults::DEFAULT_PROGRESS_CHANNEL_CAPACITY,
        }
    }
}
