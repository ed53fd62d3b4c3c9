use super::{CacheError, CheckError, OrchestrationError, StorageError};

/// Top-level error type for the Vitals engine.
#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    #[error("check error: {0}")]
    CheckError(#[from] CheckError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("cache error: {0}")]
    CacheError(#[from] CacheError),

    #[error("orchestration error: {0}")]
    OrchestrationError(#[from] OrchestrationError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),
}

/// Convenience alias used throughout the workspace.
pub type VitalsResult<T> = Result<T, VitalsError>;
