use crate::models::{CheckCategory, JobState};

/// Errors raised outside any single category's execution.
#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("config resolution failed for {category}: {reason}")]
    ConfigResolution {
        category: CheckCategory,
        reason: String,
    },

    #[error("report assembly failed: {reason}")]
    ReportAssembly { reason: String },

    #[error("task join failed: {reason}")]
    TaskJoin { reason: String },

    #[error("run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("invalid job transition: {from:?} -> {to:?}")]
    InvalidTransition { from: JobState, to: JobState },

    #[error("no async runtime available to spawn the run")]
    NoRuntime,
}
