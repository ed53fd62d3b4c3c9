//! # vitals-runtime
//!
//! [`VitalsRuntime`] owns every engine of a Vitals deployment: parsed
//! configuration, the report repository, the result cache, the scheduler,
//! and the analytics engine.

pub mod runtime;

pub use runtime::{MaintenanceSummary, RuntimeOptions, VitalsRuntime};
