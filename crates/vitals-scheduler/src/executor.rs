//! Per-category execution: cache consultation, timeout race, bounded retry.
//!
//! Each attempt runs in its own task under a child [`CancellationToken`].
//! A timed-out attempt has its token cancelled and its task aborted, which
//! drops the check future at its next await point. Blocking work inside a
//! check, or tasks the check spawned itself, keep running unless they
//! observe the token.

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use vitals_cache::{CacheKey, ResultCache};
use vitals_core::errors::CheckError;
use vitals_core::models::{CheckCategory, CheckConfig, CheckResult, CheckStatus};
use vitals_core::traits::ICheckFunction;
use vitals_observability::tracing_setup::events;
use vitals_observability::SchedulerMetrics;

pub const CANCELLED_MESSAGE: &str = "run cancelled";
pub const DISABLED_MESSAGE: &str = "check disabled";

/// Everything an execution needs from its run. Cheap to clone into tasks.
#[derive(Clone)]
pub struct ExecutionContext {
    pub run_id: String,
    pub backoff_base: Duration,
    pub cache: Option<Arc<ResultCache>>,
    pub cache_failures: bool,
    pub metrics: Arc<SchedulerMetrics>,
    /// Run-level token; attempts get children of it.
    pub cancel: CancellationToken,
}

/// Result of one category within a run. Never fails: every error becomes a
/// `Failed` result.
pub async fn execute_category(
    ctx: &ExecutionContext,
    category: CheckCategory,
    check: Option<Arc<dyn ICheckFunction>>,
    config: &CheckConfig,
) -> CheckResult {
    let span = vitals_observability::check_span!(ctx.run_id, category);
    execute_inner(ctx, category, check, config).instrument(span).await
}

/// `Skipped` placeholder for a category the run never reached.
pub fn cancelled_result(category: CheckCategory) -> CheckResult {
    CheckResult::new(
        category,
        category.display_name(),
        CheckStatus::Skipped,
        CANCELLED_MESSAGE,
    )
}

async fn execute_inner(
    ctx: &ExecutionContext,
    category: CheckCategory,
    check: Option<Arc<dyn ICheckFunction>>,
    config: &CheckConfig,
) -> CheckResult {
    let Some(check) = check else {
        let err = CheckError::NotRegistered { category };
        return CheckResult::from_error(category, category.display_name(), &err, 0)
            .with_severity(config.severity);
    };
    if !config.enabled {
        return CheckResult::new(category, check.name(), CheckStatus::Skipped, DISABLED_MESSAGE);
    }
    if ctx.cancel.is_cancelled() {
        return cancelled_result(category);
    }

    let cache_key = cache_key_for(ctx, category, config);
    if let (Some(cache), Some(key)) = (ctx.cache.as_ref(), cache_key.as_ref()) {
        let key_str = key.to_string();
        if let Some(mut hit) = cache.get(key) {
            ctx.metrics.record_cache_hit();
            events::cache_hit(category.as_str(), &key_str);
            // A report owns its results: never share ids across runs.
            hit.id = uuid::Uuid::new_v4().to_string();
            return hit;
        }
        ctx.metrics.record_cache_miss();
        events::cache_miss(category.as_str(), &key_str);
    }

    let started = Instant::now();
    let (result, attempts) = run_with_retry(ctx, category, &check, config).await;
    ctx.metrics.record_check_executed();
    events::check_completed(
        &ctx.run_id,
        category.as_str(),
        result.status.as_str(),
        attempts,
        started.elapsed().as_millis() as u64,
    );

    if let (Some(cache), Some(key)) = (ctx.cache.as_ref(), cache_key) {
        if is_cacheable(&result, ctx.cache_failures) {
            match config.cache_ttl_ms {
                Some(ttl_ms) => cache.set_with_ttl(key, result.clone(), Duration::from_millis(ttl_ms)),
                None => cache.set(key, result.clone()),
            }
        }
    }
    result
}

/// Key derivation errors degrade to "no cache".
fn cache_key_for(ctx: &ExecutionContext, category: CheckCategory, config: &CheckConfig) -> Option<CacheKey> {
    if !config.cache_enabled || ctx.cache.is_none() {
        return None;
    }
    match CacheKey::derive(category, config) {
        Ok(key) => Some(key),
        Err(e) => {
            tracing::warn!(category = %category, error = %e, "cache key derivation failed");
            None
        }
    }
}

fn is_cacheable(result: &CheckResult, cache_failures: bool) -> bool {
    match result.status {
        CheckStatus::Passed | CheckStatus::Warning => true,
        CheckStatus::Failed => {
            cache_failures
                && !matches!(result.error.as_ref(), Some(e) if e.code == "CHECK_CANCELLED")
        }
        _ => false,
    }
}

/// Up to `retry_count + 1` strictly sequential attempts. Errors, timeouts,
/// and returned `Failed` results are all retried; the last attempt's
/// outcome is kept. Returns the result and the number of attempts made.
async fn run_with_retry(
    ctx: &ExecutionContext,
    category: CheckCategory,
    check: &Arc<dyn ICheckFunction>,
    config: &CheckConfig,
) -> (CheckResult, u32) {
    let max_attempts = config.retry_count.saturating_add(1);
    let started = Instant::now();
    let mut last: Option<CheckResult> = None;
    let mut attempts = 0;

    for attempt in 0..max_attempts {
        if attempt > 0 {
            let delay = ctx.backoff_base.saturating_mul(attempt);
            tokio::select! {
                _ = ctx.cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }
        attempts = attempt + 1;
        ctx.metrics.record_attempt(attempt);

        let attempt_started = Instant::now();
        match run_attempt(ctx, category, check, config, attempt).await {
            Ok(mut result) => {
                if result.duration_ms == 0 {
                    result.duration_ms = attempt_started.elapsed().as_millis() as u64;
                }
                if result.status != CheckStatus::Failed {
                    return (result, attempts);
                }
                events::check_attempt_failed(&ctx.run_id, category.as_str(), attempt, &result.message);
                last = Some(result);
            }
            Err(CheckError::Cancelled { .. }) if ctx.cancel.is_cancelled() => break,
            Err(err) => {
                events::check_attempt_failed(&ctx.run_id, category.as_str(), attempt, &err.to_string());
                let elapsed = started.elapsed().as_millis() as u64;
                last = Some(
                    CheckResult::from_error(category, check.name(), &err, elapsed)
                        .with_severity(config.severity),
                );
            }
        }
    }

    if ctx.cancel.is_cancelled() {
        let err = CheckError::Cancelled { category };
        let elapsed = started.elapsed().as_millis() as u64;
        return (
            CheckResult::from_error(category, check.name(), &err, elapsed).with_severity(config.severity),
            attempts,
        );
    }
    let result = last.unwrap_or_else(|| {
        let err = CheckError::failed(category, "no attempt was made");
        CheckResult::from_error(category, check.name(), &err, 0)
    });
    (result, attempts)
}

/// One attempt raced against the timeout and the run's cancellation.
async fn run_attempt(
    ctx: &ExecutionContext,
    category: CheckCategory,
    check: &Arc<dyn ICheckFunction>,
    config: &CheckConfig,
    attempt: u32,
) -> Result<CheckResult, CheckError> {
    let token = ctx.cancel.child_token();
    let mut handle = {
        let check = Arc::clone(check);
        let config = config.clone();
        let token = token.clone();
        tokio::spawn(async move { check.run(&config, token).await })
    };
    let timeout = Duration::from_millis(config.timeout_ms);

    let outcome = tokio::select! {
        joined = tokio::time::timeout(timeout, &mut handle) => joined,
        _ = ctx.cancel.cancelled() => {
            handle.abort();
            return Err(CheckError::Cancelled { category });
        }
    };

    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(CheckError::Panicked {
            category,
            reason: panic_reason(join_err),
        }),
        Err(_elapsed) => {
            token.cancel();
            handle.abort();
            ctx.metrics.record_timeout();
            events::check_timed_out(&ctx.run_id, category.as_str(), attempt, config.timeout_ms);
            Err(CheckError::Timeout {
                category,
                timeout_ms: config.timeout_ms,
            })
        }
    }
}

pub(crate) fn panic_reason(err: JoinError) -> String {
    if err.is_cancelled() {
        return "task was aborted".to_string();
    }
    let payload: Box<dyn Any + Send> = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::stubs::{AlwaysPass, AlwaysThrow, NeverResolves, Panics, ReturnsStatus};

    fn ctx() -> ExecutionContext {
        ExecutionContext {
            run_id: "test-run".to_string(),
            backoff_base: Duration::from_millis(5),
            cache: None,
            cache_failures: false,
            metrics: Arc::new(SchedulerMetrics::new()),
            cancel: CancellationToken::new(),
        }
    }

    fn config(retry_count: u32, timeout_ms: u64) -> CheckConfig {
        CheckConfig {
            retry_count,
            timeout_ms,
            ..CheckConfig::default()
        }
    }

    #[tokio::test]
    async fn throwing_check_is_invoked_retry_plus_one_times() {
        let stub = AlwaysThrow::new(CheckCategory::Security);
        let calls = stub.calls.clone();
        let ctx = ctx();
        let result = execute_category(&ctx, CheckCategory::Security, Some(Arc::new(stub)), &config(2, 1_000)).await;

        assert_eq!(calls.get(), 3);
        assert_eq!(result.status, CheckStatus::Failed);
        assert_eq!(result.error.as_ref().unwrap().code, "CHECK_FAILED");
        let snap = ctx.metrics.snapshot();
        assert_eq!(snap.attempts, 3);
        assert_eq!(snap.retries, 2);
    }

    #[tokio::test]
    async fn returned_failed_status_is_retried() {
        let stub = ReturnsStatus::new(CheckCategory::Performance, CheckStatus::Failed);
        let calls = stub.calls.clone();
        let result = execute_category(&ctx(), CheckCategory::Performance, Some(Arc::new(stub)), &config(1, 1_000)).await;
        assert_eq!(calls.get(), 2);
        assert_eq!(result.status, CheckStatus::Failed);
        // Last attempt's own result is kept, not a synthesized one.
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn hanging_check_times_out_and_sees_cancellation() {
        let stub = NeverResolves::new(CheckCategory::ApiConnectivity);
        let calls = stub.calls.clone();
        let cancellations = stub.cancellations.clone();
        let ctx = ctx();

        let started = Instant::now();
        let result = execute_category(&ctx, CheckCategory::ApiConnectivity, Some(Arc::new(stub)), &config(1, 50)).await;
        let elapsed = started.elapsed();

        assert_eq!(result.status, CheckStatus::Failed);
        assert_eq!(result.error.as_ref().unwrap().code, "CHECK_TIMEOUT");
        assert_eq!(calls.get(), 2);
        assert!(elapsed < Duration::from_millis(1_000), "took {elapsed:?}");
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cancellations.get(), 2);
        assert_eq!(ctx.metrics.snapshot().timeouts, 2);
    }

    #[tokio::test]
    async fn panicking_check_becomes_failed() {
        let result = execute_category(
            &ctx(),
            CheckCategory::UserExperience,
            Some(Arc::new(Panics { category: CheckCategory::UserExperience })),
            &config(0, 1_000),
        )
        .await;
        assert_eq!(result.status, CheckStatus::Failed);
        let error = result.error.unwrap();
        assert_eq!(error.code, "CHECK_PANICKED");
        assert!(error.message.contains("check exploded"));
    }

    #[tokio::test]
    async fn unregistered_and_disabled_are_not_invoked() {
        let missing = execute_category(&ctx(), CheckCategory::Security, None, &config(0, 1_000)).await;
        assert_eq!(missing.status, CheckStatus::Failed);
        assert_eq!(missing.error.unwrap().code, "CHECK_NOT_REGISTERED");

        let stub = AlwaysPass::new(CheckCategory::Security);
        let calls = stub.calls.clone();
        let disabled = CheckConfig {
            enabled: false,
            ..CheckConfig::default()
        };
        let skipped = execute_category(&ctx(), CheckCategory::Security, Some(Arc::new(stub)), &disabled).await;
        assert_eq!(skipped.status, CheckStatus::Skipped);
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn cache_short_circuits_second_execution() {
        let mut ctx = ctx();
        ctx.cache = Some(Arc::new(ResultCache::new(Duration::from_secs(60))));
        let stub = Arc::new(AlwaysPass::new(CheckCategory::OfflineCapability));
        let calls = stub.calls.clone();
        let cached = CheckConfig {
            cache_enabled: true,
            ..CheckConfig::default()
        };

        let first = execute_category(&ctx, CheckCategory::OfflineCapability, Some(stub.clone()), &cached).await;
        let second = execute_category(&ctx, CheckCategory::OfflineCapability, Some(stub), &cached).await;

        assert_eq!(calls.get(), 1);
        assert_eq!(second.status, CheckStatus::Passed);
        assert_ne!(first.id, second.id);
        let snap = ctx.metrics.snapshot();
        assert_eq!((snap.cache_hits, snap.cache_misses), (1, 1));
    }

    #[tokio::test]
    async fn failures_are_not_cached_by_default() {
        let mut ctx = ctx();
        ctx.cache = Some(Arc::new(ResultCache::new(Duration::from_secs(60))));
        let stub = Arc::new(AlwaysThrow::new(CheckCategory::Security));
        let calls = stub.calls.clone();
        let cached = CheckConfig {
            cache_enabled: true,
            retry_count: 0,
            ..CheckConfig::default()
        };
        execute_category(&ctx, CheckCategory::Security, Some(stub.clone()), &cached).await;
        execute_category(&ctx, CheckCategory::Security, Some(stub), &cached).await;
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn cancelled_run_skips_before_invocation() {
        let ctx = ctx();
        ctx.cancel.cancel();
        let stub = AlwaysPass::new(CheckCategory::Security);
        let calls = stub.calls.clone();
        let result = execute_category(&ctx, CheckCategory::Security, Some(Arc::new(stub)), &config(0, 1_000)).await;
        assert_eq!(result.status, CheckStatus::Skipped);
        assert_eq!(result.message, CANCELLED_MESSAGE);
        assert_eq!(calls.get(), 0);
    }
}
