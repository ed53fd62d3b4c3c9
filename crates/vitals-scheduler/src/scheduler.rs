//! [`Scheduler`]: run triggering, execution modes, report assembly, persistence.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::{broadcast, Semaphore};
use tokio::task::JoinSet;
use tracing::Instrument;

use vitals_cache::ResultCache;
use vitals_core::config::{CacheConfig, SchedulerConfig};
use vitals_core::errors::{CheckError, OrchestrationError, VitalsError, VitalsResult};
use vitals_core::models::{
    CheckCategory, CheckConfig, CheckResult, HealthCheckReport, JobSnapshot, JobState,
    ProgressEvent, RunOverrides, RunRequest, RunTicket, RunTrigger, SystemInfo,
};
use vitals_core::traits::IReportRepository;
use vitals_observability::tracing_setup::events;
use vitals_observability::{MetricsSnapshot, SchedulerMetrics};
use vitals_report::ReportBuilder;

use crate::estimate::{estimate_seconds, remaining_ms};
use crate::executor::{cancelled_result, execute_category, panic_reason, ExecutionContext};
use crate::job::{JobTracker, RunJob};
use crate::registry::CheckRegistry;
use crate::resolver;

/// Reason recorded on jobs ended by [`Scheduler::cancel`].
pub const CANCELLED_REASON: &str = "cancelled";

/// A run fixed at trigger time.
struct RunPlan {
    categories: Vec<CheckCategory>,
    overrides: RunOverrides,
    parallel: bool,
    trigger: RunTrigger,
}

/// Explicitly constructed orchestrator. Cloning shares the registry,
/// repository, cache, jobs, and metrics.
#[derive(Clone)]
pub struct Scheduler {
    registry: Arc<CheckRegistry>,
    repository: Arc<dyn IReportRepository>,
    cache: Option<Arc<ResultCache>>,
    cache_failures: bool,
    config: SchedulerConfig,
    jobs: Arc<JobTracker>,
    metrics: Arc<SchedulerMetrics>,
}

impl Scheduler {
    pub fn new(
        registry: CheckRegistry,
        repository: Arc<dyn IReportRepository>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            repository,
            cache: None,
            cache_failures: false,
            config,
            jobs: Arc::new(JobTracker::new()),
            metrics: Arc::new(SchedulerMetrics::new()),
        }
    }

    /// Attach a result cache. Categories still opt in through
    /// `CheckConfig::cache_enabled`; a disabled cache config attaches nothing.
    pub fn with_cache(mut self, cache: Arc<ResultCache>, cache_config: &CacheConfig) -> Self {
        if cache_config.enabled {
            self.cache = Some(cache);
            self.cache_failures = cache_config.cache_failures;
        }
        self
    }

    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    pub fn cache(&self) -> Option<&Arc<ResultCache>> {
        self.cache.as_ref()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Start a run in the background and return its ticket immediately.
    ///
    /// Completion is observable through the repository (a report with
    /// `id == run_id`), [`status`](Self::status), [`subscribe`](Self::subscribe),
    /// and [`wait`](Self::wait).
    pub fn run(&self, request: RunRequest) -> Result<RunTicket, OrchestrationError> {
        let handle =
            tokio::runtime::Handle::try_current().map_err(|_| OrchestrationError::NoRuntime)?;
        let plan = self.plan(request);
        let (job, ticket) = self.enqueue(&plan);

        let scheduler = self.clone();
        handle.spawn(async move {
            // Failures are already logged and recorded on the job.
            let _ = scheduler.drive(job, plan).await;
        });
        Ok(ticket)
    }

    /// Run inline and return the persisted report.
    ///
    /// Errors only when the report could not be persisted at all.
    pub async fn execute(&self, request: RunRequest) -> VitalsResult<HealthCheckReport> {
        let plan = self.plan(request);
        let (job, _) = self.enqueue(&plan);
        self.drive(job, plan).await
    }

    /// Cancel a run. Categories not yet finished resolve to `Skipped` and
    /// the report is still persisted. Returns `false` if the run had already
    /// finished.
    pub fn cancel(&self, run_id: &str) -> Result<bool, OrchestrationError> {
        let job = self.job(run_id)?;
        if job.snapshot().state.is_finished() {
            return Ok(false);
        }
        job.cancel_token().cancel();
        Ok(true)
    }

    pub fn status(&self, run_id: &str) -> Option<JobSnapshot> {
        self.jobs.get(run_id).map(|j| j.snapshot())
    }

    /// Progress events of a run. `None` if the run is unknown or finished.
    pub fn subscribe(&self, run_id: &str) -> Option<broadcast::Receiver<ProgressEvent>> {
        self.jobs.get(run_id).and_then(|j| j.subscribe())
    }

    /// Resolves with the final snapshot of a run.
    pub async fn wait(&self, run_id: &str) -> Result<JobSnapshot, OrchestrationError> {
        let job = self.job(run_id)?;
        Ok(job.wait().await)
    }

    pub fn active_runs(&self) -> Vec<JobSnapshot> {
        self.jobs.active()
    }

    pub fn prune_finished(&self) -> usize {
        self.jobs.prune_finished()
    }

    /// Estimated wall time of a run over `categories`, in whole seconds.
    pub fn estimate(&self, categories: &[CheckCategory], parallel: bool) -> u64 {
        estimate_seconds(categories, parallel)
    }

    fn job(&self, run_id: &str) -> Result<Arc<RunJob>, OrchestrationError> {
        self.jobs
            .get(run_id)
            .ok_or_else(|| OrchestrationError::RunNotFound {
                run_id: run_id.to_string(),
            })
    }

    /// Without explicit categories every registered category runs.
    fn plan(&self, request: RunRequest) -> RunPlan {
        let categories = match request.categories {
            Some(requested) => resolver::select_categories(&requested),
            None => self.registry.categories(),
        };
        RunPlan {
            categories,
            parallel: request.config.parallel.unwrap_or(self.config.parallel),
            overrides: request.config,
            trigger: request.trigger,
        }
    }

    fn enqueue(&self, plan: &RunPlan) -> (Arc<RunJob>, RunTicket) {
        let run_id = uuid::Uuid::new_v4().to_string();
        let job = self.jobs.insert(RunJob::new(
            run_id.clone(),
            plan.categories.len(),
            self.config.progress_channel_capacity,
        ));
        let ticket = RunTicket {
            run_id,
            estimated_duration_seconds: estimate_seconds(&plan.categories, plan.parallel),
        };
        (job, ticket)
    }

    async fn drive(&self, job: Arc<RunJob>, plan: RunPlan) -> VitalsResult<HealthCheckReport> {
        let span = vitals_observability::run_span!(job.run_id(), plan.parallel);
        self.drive_inner(job, plan).instrument(span).await
    }

    async fn drive_inner(&self, job: Arc<RunJob>, plan: RunPlan) -> VitalsResult<HealthCheckReport> {
        let run_id = job.run_id().to_string();
        job.transition(JobState::Running)?;
        self.metrics.record_run_started();
        events::run_started(&run_id, plan.categories.len(), plan.parallel);

        let started_at = Utc::now();
        let clock = Instant::now();

        let (results, configs, orchestration_error) = match self.resolve_configs(&plan).await {
            Ok(configs) => {
                let results = if plan.parallel {
                    self.execute_parallel(&job, &plan.categories, &configs).await
                } else {
                    self.execute_sequential(&job, &plan.categories, &configs, clock).await
                };
                (results, configs, None)
            }
            Err(e) => (Vec::new(), BTreeMap::new(), Some(e.to_string())),
        };

        let builder = || {
            ReportBuilder::new(run_id.clone())
                .trigger(plan.trigger)
                .categories(plan.categories.clone())
                .parallel(plan.parallel)
                .resolved_configs(configs.clone())
                .timestamp(started_at)
                .duration_ms(clock.elapsed().as_millis() as u64)
                .system_info(SystemInfo::collect())
        };
        let report = match &orchestration_error {
            Some(error) => {
                events::run_failed(&run_id, error);
                builder().build_failed(results.clone(), error)
            }
            None => builder().build(results.clone()),
        };

        let report = match self.persist(&report).await {
            Ok(()) => {
                events::report_persisted(&run_id, report.results.len());
                report
            }
            Err(e) => {
                self.metrics.record_persistence_failure();
                events::persistence_failed(&run_id, &e.to_string());
                let reason = format!("report persistence failed: {e}");
                let fallback = builder().build_failed(results, &reason);
                if let Err(e2) = self.persist(&fallback).await {
                    self.metrics.record_persistence_failure();
                    self.metrics.record_run_failed();
                    events::persistence_failed(&run_id, &e2.to_string());
                    job.fail(reason)?;
                    return Err(e2);
                }
                self.metrics.record_run_failed();
                job.fail(reason)?;
                return Ok(fallback);
            }
        };

        if job.is_cancelled() {
            self.metrics.record_run_failed();
            job.fail(CANCELLED_REASON)?;
        } else if let Some(error) = orchestration_error {
            self.metrics.record_run_failed();
            job.fail(error)?;
        } else {
            self.metrics.record_run_completed();
            events::run_completed(
                &run_id,
                report.summary.score,
                report.summary.overall_status.as_str(),
                report.duration_ms,
            );
            job.transition(JobState::Completed)?;
        }
        Ok(report)
    }

    /// Stored configs are read off the async runtime.
    async fn resolve_configs(
        &self,
        plan: &RunPlan,
    ) -> Result<BTreeMap<CheckCategory, CheckConfig>, OrchestrationError> {
        let repository = Arc::clone(&self.repository);
        let categories = plan.categories.clone();
        let stored = tokio::task::spawn_blocking(move || {
            categories
                .into_iter()
                .map(|category| {
                    repository
                        .get_check_config(category)
                        .map(|config| (category, config))
                        .map_err(|e| OrchestrationError::ConfigResolution {
                            category,
                            reason: e.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|e| OrchestrationError::TaskJoin {
            reason: e.to_string(),
        })??;

        Ok(stored
            .into_iter()
            .map(|(category, config)| {
                (category, resolver::resolve(config, &plan.overrides, &self.config))
            })
            .collect())
    }

    async fn persist(&self, report: &HealthCheckReport) -> VitalsResult<()> {
        let repository = Arc::clone(&self.repository);
        let report = report.clone();
        match tokio::task::spawn_blocking(move || repository.save_check_report(&report)).await {
            Ok(saved) => saved,
            Err(e) => Err(VitalsError::from(OrchestrationError::TaskJoin {
                reason: e.to_string(),
            })),
        }
    }

    fn context(&self, job: &RunJob) -> ExecutionContext {
        ExecutionContext {
            run_id: job.run_id().to_string(),
            backoff_base: Duration::from_millis(self.config.retry_backoff_base_ms),
            cache: self.cache.clone(),
            cache_failures: self.cache_failures,
            metrics: Arc::clone(&self.metrics),
            cancel: job.cancel_token().clone(),
        }
    }

    fn config_for(&self, configs: &BTreeMap<CheckCategory, CheckConfig>, category: CheckCategory) -> CheckConfig {
        configs
            .get(&category)
            .cloned()
            .unwrap_or_else(|| resolver::hard_default(&self.config))
    }

    /// One at a time in selection order, with a running remaining-time estimate.
    async fn execute_sequential(
        &self,
        job: &RunJob,
        categories: &[CheckCategory],
        configs: &BTreeMap<CheckCategory, CheckConfig>,
        clock: Instant,
    ) -> Vec<CheckResult> {
        let ctx = self.context(job);
        let total = categories.len();
        let mut results = Vec::with_capacity(total);

        for (index, &category) in categories.iter().enumerate() {
            let result = if job.is_cancelled() {
                cancelled_result(category)
            } else {
                let config = self.config_for(configs, category);
                execute_category(&ctx, category, self.registry.get(category), &config).await
            };
            let completed = index + 1;
            let remaining = remaining_ms(clock.elapsed(), completed, total - completed);
            job.record_progress(progress_event(job, &result, completed, total, remaining), completed);
            results.push(result);
        }
        results
    }

    /// All categories fanned out at once, optionally capped by a semaphore.
    /// Results keep selection order regardless of completion order.
    async fn execute_parallel(
        &self,
        job: &RunJob,
        categories: &[CheckCategory],
        configs: &BTreeMap<CheckCategory, CheckConfig>,
    ) -> Vec<CheckResult> {
        let ctx = self.context(job);
        let total = categories.len();
        let limiter = (self.config.max_concurrency > 0)
            .then(|| Arc::new(Semaphore::new(self.config.max_concurrency)));

        let mut set = JoinSet::new();
        for (index, &category) in categories.iter().enumerate() {
            let ctx = ctx.clone();
            let check = self.registry.get(category);
            let config = self.config_for(configs, category);
            let limiter = limiter.clone();
            set.spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                (index, execute_category(&ctx, category, check, &config).await)
            });
        }

        let mut slots: Vec<Option<CheckResult>> = (0..total).map(|_| None).collect();
        let mut completed = 0;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    completed += 1;
                    job.record_progress(progress_event(job, &result, completed, total, None), completed);
                    slots[index] = Some(result);
                }
                Err(e) => {
                    tracing::error!(run_id = %job.run_id(), error = %panic_reason(e), "category task failed");
                }
            }
        }

        slots
            .into_iter()
            .zip(categories)
            .map(|(slot, &category)| {
                slot.unwrap_or_else(|| {
                    let err = CheckError::Panicked {
                        category,
                        reason: "category task did not complete".to_string(),
                    };
                    CheckResult::from_error(category, category.display_name(), &err, 0)
                })
            })
            .collect()
    }
}

fn progress_event(
    job: &RunJob,
    result: &CheckResult,
    completed: usize,
    total: usize,
    estimated_remaining_ms: Option<u64>,
) -> ProgressEvent {
    let percentage = if total == 0 {
        100.0
    } else {
        completed as f64 / total as f64 * 100.0
    };
    ProgressEvent {
        run_id: job.run_id().to_string(),
        category: result.category,
        name: result.name.clone(),
        status: result.status,
        percentage,
        estimated_remaining_ms,
    }
}
