//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log the start of a run.
pub fn run_started(run_id: &str, categories: usize, parallel: bool) {
    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        categories = categories,
        parallel = parallel,
        "health check run started"
    );
}

/// Log a failed attempt that will be retried or has exhausted retries.
pub fn check_attempt_failed(run_id: &str, category: &str, attempt: u32, error: &str) {
    tracing::warn!(
        event = "check_attempt_failed",
        run_id = %run_id,
        category = %category,
        attempt = attempt,
        error = %error,
        "check attempt failed"
    );
}

/// Log an attempt abandoned by the timeout race.
pub fn check_timed_out(run_id: &str, category: &str, attempt: u32, timeout_ms: u64) {
    tracing::warn!(
        event = "check_timed_out",
        run_id = %run_id,
        category = %category,
        attempt = attempt,
        timeout_ms = timeout_ms,
        "check attempt timed out"
    );
}

/// Log the final outcome of a category.
pub fn check_completed(run_id: &str, category: &str, status: &str, attempts: u32, duration_ms: u64) {
    tracing::info!(
        event = "check_completed",
        run_id = %run_id,
        category = %category,
        status = %status,
        attempts = attempts,
        duration_ms = duration_ms,
        "check completed"
    );
}

/// Log run completion with its summary.
pub fn run_completed(run_id: &str, score: u8, overall_status: &str, duration_ms: u64) {
    tracing::info!(
        event = "run_completed",
        run_id = %run_id,
        score = score,
        overall_status = %overall_status,
        duration_ms = duration_ms,
        "health check run completed"
    );
}

/// Log an orchestration-level failure that forced a best-effort report.
pub fn run_failed(run_id: &str, error: &str) {
    tracing::error!(
        event = "run_failed",
        run_id = %run_id,
        error = %error,
        "health check run failed"
    );
}

/// Log a persisted report.
pub fn report_persisted(run_id: &str, results: usize) {
    tracing::debug!(
        event = "report_persisted",
        run_id = %run_id,
        results = results,
        "report persisted"
    );
}

/// Log a repository failure while persisting a report.
pub fn persistence_failed(run_id: &str, error: &str) {
    tracing::error!(
        event = "persistence_failed",
        run_id = %run_id,
        error = %error,
        "report persistence failed"
    );
}

/// Log a cache hit for a category.
pub fn cache_hit(category: &str, key: &str) {
    tracing::debug!(event = "cache_hit", category = %category, key = %key, "result cache hit");
}

/// Log a cache miss for a category.
pub fn cache_miss(category: &str, key: &str) {
    tracing::debug!(event = "cache_miss", category = %category, key = %key, "result cache miss");
}

/// Log a cache sweep.
pub fn cache_swept(removed: usize, remaining: usize) {
    tracing::debug!(
        event = "cache_swept",
        removed = removed,
        remaining = remaining,
        "result cache swept"
    );
}

/// Log repository retention cleanup.
pub fn data_cleaned(retention_days: u32, deleted_results: usize, deleted_reports: usize) {
    tracing::info!(
        event = "data_cleaned",
        retention_days = retention_days,
        deleted_results = deleted_results,
        deleted_reports = deleted_reports,
        "old health check data removed"
    );
}
