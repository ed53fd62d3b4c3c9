//! Seams between the engine and its pluggable collaborators.

pub mod check_function;
pub mod report_repository;

pub use check_function::ICheckFunction;
pub use report_repository::IReportRepository;
pub use tokio_util::sync::CancellationToken;
