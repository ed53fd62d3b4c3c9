//! # vitals-observability
//!
//! Structured tracing with span definitions and typed events, plus lock-free
//! counters describing scheduler activity.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{MetricsSnapshot, SchedulerMetrics};
pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
