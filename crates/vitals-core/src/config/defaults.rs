// Single source of truth for all default values.

use crate::models::Severity;

// --- Scheduler ---
pub const DEFAULT_CHECK_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRY_COUNT: u32 = 1;
pub const DEFAULT_SEVERITY: Severity = Severity::Medium;
pub const DEFAULT_RETRY_BACKOFF_BASE_MS: u64 = 1_000;
pub const DEFAULT_PARALLEL: bool = false;
pub const DEFAULT_MAX_CONCURRENCY: usize = 0; // 0 = unbounded
pub const DEFAULT_PROGRESS_CHANNEL_CAPACITY: usize = 64;

// --- Cache ---
pub const DEFAULT_CACHE_ENABLED: bool = true;
pub const DEFAULT_CACHE_TTL_MS: u64 = 300_000; // 5 minutes
pub const DEFAULT_CACHE_FAILURES: bool = false;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "vitals.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

// --- Analytics ---
pub const DEFAULT_TREND_THRESHOLD: f64 = 5.0;
pub const DEFAULT_OVERALL_DECLINE_PCT: f64 = 10.0;
pub const DEFAULT_SUCCESS_RATE_FLOOR: f64 = 90.0;
pub const DEFAULT_RELIABILITY_FLOOR: f64 = 80.0;
pub const DEFAULT_CATEGORY_DECLINE_PCT: f64 = 15.0;
pub const DEFAULT_CATEGORY_SUCCESS_FLOOR: f64 = 85.0;
pub const DEFAULT_SLOW_RUN_MS: f64 = 120_000.0;
pub const DEFAULT_ANOMALY_Z_THRESHOLD: f64 = 2.5;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
