//! Category -> check function dispatch table.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use vitals_core::errors::CheckError;
use vitals_core::models::{CheckCategory, CheckConfig, CheckResult};
use vitals_core::traits::ICheckFunction;

/// One check function per category. Registering a category twice replaces
/// the earlier function.
#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: HashMap<CheckCategory, Arc<dyn ICheckFunction>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a check under its own category. Returns the replaced function, if any.
    pub fn register(&mut self, check: Arc<dyn ICheckFunction>) -> Option<Arc<dyn ICheckFunction>> {
        self.checks.insert(check.category(), check)
    }

    pub fn with(mut self, check: impl ICheckFunction + 'static) -> Self {
        self.register(Arc::new(check));
        self
    }

    pub fn get(&self, category: CheckCategory) -> Option<Arc<dyn ICheckFunction>> {
        self.checks.get(&category).cloned()
    }

    pub fn contains(&self, category: CheckCategory) -> bool {
        self.checks.contains_key(&category)
    }

    /// Registered categories in canonical order.
    pub fn categories(&self) -> Vec<CheckCategory> {
        CheckCategory::ALL
            .into_iter()
            .filter(|c| self.checks.contains_key(c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("categories", &self.categories())
            .finish()
    }
}

/// Adapts an async closure into a check function.
pub struct FnCheck<F> {
    category: CheckCategory,
    name: String,
    f: F,
}

impl<F> FnCheck<F> {
    pub fn new(category: CheckCategory, f: F) -> Self {
        Self {
            category,
            name: category.display_name().to_string(),
            f,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl<F, Fut> ICheckFunction for FnCheck<F>
where
    F: Fn(CheckConfig, CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<CheckResult, CheckError>> + Send,
{
    fn category(&self) -> CheckCategory {
        self.category
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(
        &self,
        config: &CheckConfig,
        cancel: CancellationToken,
    ) -> Result<CheckResult, CheckError> {
        (self.f)(config.clone(), cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::stubs::AlwaysPass;
    use vitals_core::models::CheckStatus;

    fn passing(category: CheckCategory) -> AlwaysPass {
        AlwaysPass::new(category)
    }

    #[test]
    fn categories_follow_canonical_order() {
        let registry = CheckRegistry::new()
            .with(passing(CheckCategory::Security))
            .with(passing(CheckCategory::ApiConnectivity));
        assert_eq!(
            registry.categories(),
            vec![CheckCategory::ApiConnectivity, CheckCategory::Security]
        );
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = CheckRegistry::new();
        assert!(registry.register(Arc::new(passing(CheckCategory::Security))).is_none());
        assert!(registry.register(Arc::new(passing(CheckCategory::Security))).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn fn_check_forwards_config() {
        let check = FnCheck::new(
            CheckCategory::Performance,
            |config: CheckConfig, _cancel: CancellationToken| async move {
                Ok::<_, CheckError>(CheckResult::new(
                    CheckCategory::Performance,
                    "fn",
                    CheckStatus::Passed,
                    config.timeout_ms.to_string(),
                ))
            },
        )
        .named("Latency probe");
        let config = CheckConfig {
            timeout_ms: 1234,
            ..CheckConfig::default()
        };
        let result = check.run(&config, CancellationToken::new()).await.unwrap();
        assert_eq!(result.message, "1234");
        assert_eq!(check.name(), "Latency probe");
    }
}
