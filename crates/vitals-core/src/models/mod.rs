//! Data model shared by the scheduler, report builder, analytics, and repository.

pub mod category;
pub mod check_config;
pub mod check_result;
pub mod global_config;
pub mod issue;
pub mod recommendation;
pub mod report;
pub mod run;
pub mod severity;
pub mod statistics;
pub mod status;
pub mod system_info;

pub use category::CheckCategory;
pub use check_config::{CheckConfig, RunOverrides};
pub use check_result::{CheckErrorInfo, CheckResult};
pub use global_config::GlobalConfig;
pub use issue::{Difficulty, Issue, Resolution};
pub use recommendation::{Effort, Implementation, Priority, Recommendation};
pub use report::{HealthCheckReport, ReportMetadata, ReportSummary, RunTrigger};
pub use run::{JobSnapshot, JobState, ProgressEvent, RunRequest, RunTicket};
pub use severity::Severity;
pub use statistics::{CheckResultStatistics, CleanupSummary, ExportBundle, ImportSummary};
pub use status::CheckStatus;
pub use system_info::SystemInfo;
