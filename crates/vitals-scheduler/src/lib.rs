//! # vitals-scheduler
//!
//! Orchestrates health check runs. A run resolves each category's config,
//! executes the registered [`ICheckFunction`]s sequentially or in parallel
//! under a timeout race with bounded retry, assembles the report, and
//! persists it through the repository.
//!
//! Runs are tracked as jobs (`Queued -> Running -> Completed | Failed`) with
//! a polling snapshot and a progress broadcast per run.
//!
//! [`ICheckFunction`]: vitals_core::traits::ICheckFunction

pub mod estimate;
pub mod executor;
pub mod job;
pub mod registry;
pub mod resolver;
pub mod scheduler;

pub use job::{JobTracker, RunJob};
pub use registry::{CheckRegistry, FnCheck};
pub use scheduler::Scheduler;
