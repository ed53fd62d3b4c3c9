use crate::models::CheckCategory;

/// Failure of a single category's check execution.
///
/// Never fatal to a run: the scheduler converts it into a `Failed` result.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckError {
    #[error("{category} check timed out after {timeout_ms}ms")]
    Timeout {
        category: CheckCategory,
        timeout_ms: u64,
    },

    #[error("{category} check failed: {reason}")]
    Failed {
        category: CheckCategory,
        reason: String,
    },

    #[error("{category} check was cancelled")]
    Cancelled { category: CheckCategory },

    #[error("no check function registered for {category}")]
    NotRegistered { category: CheckCategory },

    #[error("{category} check panicked: {reason}")]
    Panicked {
        category: CheckCategory,
        reason: String,
    },
}

impl CheckError {
    /// Convenience constructor for the common "function reported an error" case.
    pub fn failed(category: CheckCategory, reason: impl Into<String>) -> Self {
        Self::Failed {
            category,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code stored in `CheckResult.error.code`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "CHECK_TIMEOUT",
            Self::Failed { .. } => "CHECK_FAILED",
            Self::Cancelled { .. } => "CHECK_CANCELLED",
            Self::NotRegistered { .. } => "CHECK_NOT_REGISTERED",
            Self::Panicked { .. } => "CHECK_PANICKED",
        }
    }

    pub fn category(&self) -> CheckCategory {
        match self {
            Self::Timeout { category, .. }
            | Self::Failed { category, .. }
            | Self::Cancelled { category }
            | Self::NotRegistered { category }
            | Self::Panicked { category, .. } => *category,
        }
    }
}
