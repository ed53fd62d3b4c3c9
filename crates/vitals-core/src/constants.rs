/// Vitals engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version tag written into export bundles. Imports reject any other value.
pub const EXPORT_BUNDLE_VERSION: u32 = 1;

/// Metric key treated as the primary per-category value by trend analytics.
pub const PRIMARY_METRIC_KEY: &str = "score";

/// Name of the synthetic result appended when a run fails outside any category.
pub const ORCHESTRATION_CHECK_NAME: &str = "Health check orchestration";

/// Upper bound on results returned by a single repository query when no limit is given.
pub const MAX_QUERY_LIMIT: usize = 10_000;

/// `details` key listing metrics dropped because their value was NaN or infinite.
pub const NON_FINITE_METRICS_KEY: &str = "non_finite_metrics";
