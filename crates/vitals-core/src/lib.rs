//! # vitals-core
//!
//! Foundation crate for the Vitals health-check engine.
//! Defines the data model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VitalsConfig;
pub use errors::{VitalsError, VitalsResult};
pub use models::{
    CheckCategory, CheckConfig, CheckResult, CheckStatus, HealthCheckReport, Issue,
    Recommendation, Severity,
};
