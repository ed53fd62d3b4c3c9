use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CheckCategory, CheckStatus, RunOverrides, RunTrigger};

/// Trigger-boundary request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunRequest {
    /// `None` runs every enabled category.
    pub categories: Option<Vec<CheckCategory>>,
    pub config: RunOverrides,
    pub trigger: RunTrigger,
}

impl RunRequest {
    pub fn for_categories(categories: impl Into<Vec<CheckCategory>>) -> Self {
        Self {
            categories: Some(categories.into()),
            ..Self::default()
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = Some(parallel);
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn retry_count(mut self, retry_count: u32) -> Self {
        self.config.retry_count = Some(retry_count);
        self
    }
}

/// Returned immediately by a run trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTicket {
    pub run_id: String,
    pub estimated_duration_seconds: u64,
}

/// Per-category progress pushed while a run executes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub run_id: String,
    pub category: CheckCategory,
    pub name: String,
    pub status: CheckStatus,
    /// Share of categories finished, 0-100.
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_remaining_ms: Option<u64>,
}

/// Run job state machine: Queued -> Running -> Completed | Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn can_transition_to(&self, next: JobState) -> bool {
        matches!(
            (self, next),
            (Self::Queued, Self::Running)
                | (Self::Queued, Self::Failed)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Failed)
        )
    }
}

/// Polling view of a run job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub run_id: String,
    pub state: JobState,
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_remaining_ms: Option<u64>,
    pub queued_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobSnapshot {
    pub fn queued(run_id: impl Into<String>, total: usize) -> Self {
        Self {
            run_id: run_id.into(),
            state: JobState::Queued,
            completed: 0,
            total,
            percentage: 0.0,
            estimated_remaining_ms: None,
            queued_at: Utc::now(),
            started_at: None,
            finished_at: None,
            error: None,
        }
    }
}
