//! # vitals-storage
//!
//! Persistence of health check reports, results, and configuration.
//!
//! - [`StorageEngine`]: SQLite with one serialized writer, a round-robin
//!   read pool for file-backed databases, and versioned migrations.
//! - [`InMemoryReportRepository`]: lock-guarded maps with identical
//!   semantics, for tests and ephemeral runtimes.

pub mod bundle;
pub mod engine;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod stats;

pub use engine::StorageEngine;
pub use memory::InMemoryReportRepository;

use chrono::{DateTime, SecondsFormat, Utc};
use vitals_core::errors::{StorageError, VitalsError};

/// Helper to convert any error message into a storage error.
pub(crate) fn to_storage_err(msg: impl Into<String>) -> VitalsError {
    VitalsError::StorageError(StorageError::SqliteError {
        message: msg.into(),
    })
}

/// Fixed-width UTC timestamps so text comparison matches time order.
pub(crate) fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
