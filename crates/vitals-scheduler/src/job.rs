//! Run jobs: state machine, polling snapshot, progress broadcast, cancellation.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use vitals_core::errors::OrchestrationError;
use vitals_core::models::{JobSnapshot, JobState, ProgressEvent};

/// One run's job. The progress channel closes once the job finishes, after
/// its report has been persisted.
pub struct RunJob {
    run_id: String,
    state: watch::Sender<JobSnapshot>,
    progress: Mutex<Option<broadcast::Sender<ProgressEvent>>>,
    cancel: CancellationToken,
}

impl RunJob {
    pub fn new(run_id: impl Into<String>, total: usize, progress_capacity: usize) -> Self {
        let run_id = run_id.into();
        let (state, _) = watch::channel(JobSnapshot::queued(run_id.clone(), total));
        let (progress, _) = broadcast::channel(progress_capacity.max(1));
        Self {
            run_id,
            state,
            progress: Mutex::new(Some(progress)),
            cancel: CancellationToken::new(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn snapshot(&self) -> JobSnapshot {
        self.state.borrow().clone()
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Move to `next`, stamping start/finish times.
    pub fn transition(&self, next: JobState) -> Result<(), OrchestrationError> {
        self.transition_with(next, None)
    }

    /// Finish as `Failed` with a reason.
    pub fn fail(&self, reason: impl Into<String>) -> Result<(), OrchestrationError> {
        self.transition_with(JobState::Failed, Some(reason.into()))
    }

    fn transition_with(&self, next: JobState, error: Option<String>) -> Result<(), OrchestrationError> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|snap| {
            if !snap.state.can_transition_to(next) {
                outcome = Err(OrchestrationError::InvalidTransition {
                    from: snap.state,
                    to: next,
                });
                return false;
            }
            snap.state = next;
            match next {
                JobState::Running => snap.started_at = Some(Utc::now()),
                JobState::Completed | JobState::Failed => {
                    snap.finished_at = Some(Utc::now());
                    snap.estimated_remaining_ms = Some(0);
                }
                JobState::Queued => {}
            }
            if error.is_some() {
                snap.error = error.clone();
            }
            true
        });
        if next.is_finished() && outcome.is_ok() {
            self.close_progress();
        }
        outcome
    }

    /// Record a finished category and push its event to subscribers.
    pub fn record_progress(&self, event: ProgressEvent, completed: usize) {
        self.state.send_modify(|snap| {
            snap.completed = completed;
            snap.percentage = event.percentage;
            snap.estimated_remaining_ms = event.estimated_remaining_ms;
        });
        if let Ok(guard) = self.progress.lock() {
            if let Some(tx) = guard.as_ref() {
                // No subscribers is fine.
                let _ = tx.send(event);
            }
        }
    }

    /// Progress receiver, or `None` once the job has finished.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<ProgressEvent>> {
        self.progress
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(broadcast::Sender::subscribe))
    }

    /// Resolves with the final snapshot once the job is Completed or Failed.
    pub async fn wait(&self) -> JobSnapshot {
        let mut rx = self.state.subscribe();
        let snap = match rx.wait_for(|snap| snap.state.is_finished()).await {
            Ok(snap) => snap.clone(),
            Err(_) => self.snapshot(),
        };
        snap
    }

    fn close_progress(&self) {
        if let Ok(mut guard) = self.progress.lock() {
            guard.take();
        }
    }
}

/// Jobs of one scheduler, keyed by run id.
#[derive(Default)]
pub struct JobTracker {
    jobs: DashMap<String, Arc<RunJob>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, job: RunJob) -> Arc<RunJob> {
        let job = Arc::new(job);
        self.jobs.insert(job.run_id().to_string(), Arc::clone(&job));
        job
    }

    pub fn get(&self, run_id: &str) -> Option<Arc<RunJob>> {
        self.jobs.get(run_id).map(|j| Arc::clone(j.value()))
    }

    /// Snapshots of jobs that have not finished, oldest first.
    pub fn active(&self) -> Vec<JobSnapshot> {
        let mut active: Vec<JobSnapshot> = self
            .jobs
            .iter()
            .map(|j| j.value().snapshot())
            .filter(|s| !s.state.is_finished())
            .collect();
        active.sort_by_key(|s| s.queued_at);
        active
    }

    /// Drop finished jobs. Returns how many were removed.
    pub fn prune_finished(&self) -> usize {
        let before = self.jobs.len();
        self.jobs.retain(|_, job| !job.snapshot().state.is_finished());
        before.saturating_sub(self.jobs.len())
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
