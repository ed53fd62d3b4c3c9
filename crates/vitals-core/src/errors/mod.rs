//! Error handling for Vitals.
//! One error enum per subsystem, `thiserror` only, aggregated into [`VitalsError`].

pub mod cache_error;
pub mod check_error;
pub mod orchestration_error;
pub mod storage_error;
pub mod vitals_error;

pub use cache_error::CacheError;
pub use check_error::CheckError;
pub use orchestration_error::OrchestrationError;
pub use storage_error::StorageError;
pub use vitals_error::{VitalsError, VitalsResult};
