//! Stub check functions with invocation counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use vitals_core::errors::CheckError;
use vitals_core::models::{CheckCategory, CheckConfig, CheckResult, CheckStatus};
use vitals_core::traits::ICheckFunction;

/// Shared invocation counter handed out before the stub moves into a registry.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Always returns `Passed`.
pub struct AlwaysPass {
    pub category: CheckCategory,
    pub calls: CallCounter,
}

impl AlwaysPass {
    pub fn new(category: CheckCategory) -> Self {
        Self {
            category,
            calls: CallCounter::default(),
        }
    }
}

#[async_trait]
impl ICheckFunction for AlwaysPass {
    fn category(&self) -> CheckCategory {
        self.category
    }

    async fn run(&self, _config: &CheckConfig, _cancel: CancellationToken) -> Result<CheckResult, CheckError> {
        self.calls.bump();
        Ok(CheckResult::new(self.category, self.name(), CheckStatus::Passed, "ok"))
    }
}

/// Always errors.
pub struct AlwaysThrow {
    pub category: CheckCategory,
    pub calls: CallCounter,
}

impl AlwaysThrow {
    pub fn new(category: CheckCategory) -> Self {
        Self {
            category,
            calls: CallCounter::default(),
        }
    }
}

#[async_trait]
impl ICheckFunction for AlwaysThrow {
    fn category(&self) -> CheckCategory {
        self.category
    }

    async fn run(&self, _config: &CheckConfig, _cancel: CancellationToken) -> Result<CheckResult, CheckError> {
        self.calls.bump();
        Err(CheckError::failed(self.category, "stub failure"))
    }
}

/// Never completes unless cancelled. Records whether it observed cancellation.
pub struct NeverResolves {
    pub category: CheckCategory,
    pub calls: CallCounter,
    pub cancellations: CallCounter,
}

impl NeverResolves {
    pub fn new(category: CheckCategory) -> Self {
        Self {
            category,
            calls: CallCounter::default(),
            cancellations: CallCounter::default(),
        }
    }
}

#[async_trait]
impl ICheckFunction for NeverResolves {
    fn category(&self) -> CheckCategory {
        self.category
    }

    async fn run(&self, _config: &CheckConfig, cancel: CancellationToken) -> Result<CheckResult, CheckError> {
        self.calls.bump();
        let cancellations = self.cancellations.clone();
        // Detached watcher: outlives the dropped attempt future.
        tokio::spawn(async move {
            cancel.cancelled().await;
            cancellations.bump();
        });
        std::future::pending::<Result<CheckResult, CheckError>>().await
    }
}

/// Sleeps, then returns a fixed status.
pub struct Sleepy {
    pub category: CheckCategory,
    pub delay: Duration,
    pub status: CheckStatus,
    pub calls: CallCounter,
}

impl Sleepy {
    pub fn new(category: CheckCategory, delay: Duration) -> Self {
        Self {
            category,
            delay,
            status: CheckStatus::Passed,
            calls: CallCounter::default(),
        }
    }
}

#[async_trait]
impl ICheckFunction for Sleepy {
    fn category(&self) -> CheckCategory {
        self.category
    }

    async fn run(&self, _config: &CheckConfig, _cancel: CancellationToken) -> Result<CheckResult, CheckError> {
        self.calls.bump();
        tokio::time::sleep(self.delay).await;
        Ok(CheckResult::new(self.category, self.name(), self.status, "slept"))
    }
}

/// Returns a fixed status, with optional suggestions and primary metric.
pub struct ReturnsStatus {
    pub category: CheckCategory,
    pub status: CheckStatus,
    pub suggestions: Vec<String>,
    pub score: Option<f64>,
    pub calls: CallCounter,
}

impl ReturnsStatus {
    pub fn new(category: CheckCategory, status: CheckStatus) -> Self {
        Self {
            category,
            status,
            suggestions: Vec::new(),
            score: None,
            calls: CallCounter::default(),
        }
    }

    pub fn with_suggestions<I: IntoIterator<Item = &'static str>>(mut self, suggestions: I) -> Self {
        self.suggestions = suggestions.into_iter().map(String::from).collect();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

#[async_trait]
impl ICheckFunction for ReturnsStatus {
    fn category(&self) -> CheckCategory {
        self.category
    }

    async fn run(&self, _config: &CheckConfig, _cancel: CancellationToken) -> Result<CheckResult, CheckError> {
        self.calls.bump();
        let mut result = CheckResult::new(self.category, self.name(), self.status, self.status.as_str())
            .with_suggestions(self.suggestions.clone());
        if let Some(score) = self.score {
            result = result.with_metric("score", score);
        }
        Ok(result)
    }
}

/// Panics on every call.
pub struct Panics {
    pub category: CheckCategory,
}

#[async_trait]
impl ICheckFunction for Panics {
    fn category(&self) -> CheckCategory {
        self.category
    }

    async fn run(&self, _config: &CheckConfig, _cancel: CancellationToken) -> Result<CheckResult, CheckError> {
        panic!("check exploded");
    }
}
