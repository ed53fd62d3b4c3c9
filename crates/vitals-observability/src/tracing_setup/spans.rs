//! Span definitions for run orchestration and per-category execution.

/// Create a run span.
#[macro_export]
macro_rules! run_span {
    ($run_id:expr, $parallel:expr) => {
        tracing::info_span!("vitals.run", run_id = %$run_id, parallel = $parallel)
    };
}

/// Create a per-category check span.
#[macro_export]
macro_rules! check_span {
    ($run_id:expr, $category:expr) => {
        tracing::info_span!("vitals.check", run_id = %$run_id, category = %$category)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RUN: &str = "vitals.run";
    pub const CHECK: &str = "vitals.check";
}
