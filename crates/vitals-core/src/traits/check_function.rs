use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::CheckError;
use crate::models::{CheckCategory, CheckConfig, CheckResult};

/// A category's diagnostic function.
///
/// Implementations decide pass/fail on their own. Returning `Err` and
/// returning a `Failed` result are treated identically by the retry loop.
///
/// `cancel` fires when the attempt times out or the run is cancelled. The
/// scheduler stops polling a timed-out attempt, but anything the check spawned
/// keeps running unless it observes the token.
#[async_trait]
pub trait ICheckFunction: Send + Sync {
    /// Category this function is registered under.
    fn category(&self) -> CheckCategory;

    /// Name recorded on synthesized results.
    fn name(&self) -> &str {
        self.category().display_name()
    }

    async fn run(
        &self,
        config: &CheckConfig,
        cancel: CancellationToken,
    ) -> Result<CheckResult, CheckError>;
}
