//! SQL operations grouped by entity.

pub mod config_ops;
pub mod maintenance;
pub mod report_ops;
pub mod result_ops;
