//! VitalsRuntime: construction, run triggering with global defaults,
//! analytics over stored history, and periodic maintenance.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitals_analytics::{AnalyticsEngine, AnalyticsReport, AnalyticsWindow};
use vitals_cache::ResultCache;
use vitals_core::config::VitalsConfig;
use vitals_core::errors::{OrchestrationError, VitalsResult};
use vitals_core::models::{
    CheckCategory, CheckConfig, CleanupSummary, HealthCheckReport, RunRequest, RunTicket,
};
use vitals_core::traits::IReportRepository;
use vitals_scheduler::{CheckRegistry, Scheduler};
use vitals_storage::{InMemoryReportRepository, StorageEngine};

/// Options for constructing the runtime.
#[derive(Debug, Default)]
pub struct RuntimeOptions {
    /// SQLite database path. `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    /// TOML configuration. `None` uses defaults.
    pub config_toml: Option<String>,
    /// Install the global tracing subscriber from `[observability]`.
    pub init_tracing: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceSummary {
    /// Expired cache entries removed.
    pub cache_swept: usize,
    /// `None` when the global config disables automatic cleanup.
    pub cleanup: Option<CleanupSummary>,
}

pub struct VitalsRuntime {
    config: VitalsConfig,
    repository: Arc<dyn IReportRepository>,
    cache: Arc<ResultCache>,
    scheduler: Scheduler,
    analytics: AnalyticsEngine,
}

impl VitalsRuntime {
    pub fn new(opts: RuntimeOptions, registry: CheckRegistry) -> VitalsResult<Self> {
        let config = match &opts.config_toml {
            Some(toml_str) => VitalsConfig::from_toml(toml_str)?,
            None => VitalsConfig::default(),
        };

        if opts.init_tracing {
            vitals_observability::init_tracing_from_config(&config.observability);
        }

        let repository: Arc<dyn IReportRepository> = match &opts.db_path {
            Some(path) => Arc::new(StorageEngine::open_with_config(path, &config.storage)?),
            None => Arc::new(InMemoryReportRepository::new()),
        };

        let seeded = seed_default_configs(repository.as_ref())?;
        if seeded > 0 {
            tracing::info!(seeded, "seeded default category configs");
        }

        let cache = Arc::new(ResultCache::from_config(&config.cache));
        let scheduler = Scheduler::new(registry, Arc::clone(&repository), config.scheduler.clone())
            .with_cache(Arc::clone(&cache), &config.cache);
        let analytics = AnalyticsEngine::new(config.analytics.clone());

        Ok(Self {
            config,
            repository,
            cache,
            scheduler,
            analytics,
        })
    }

    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<dyn IReportRepository> {
        &self.repository
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Start a background run. Categories and execution mode the request
    /// leaves open come from the stored global config, restricted to the
    /// registered categories.
    pub fn trigger(&self, request: RunRequest) -> VitalsResult<RunTicket> {
        let registered = self.scheduler.registry().categories();
        let request = apply_global_defaults(self.repository.as_ref(), &registered, request)?;
        Ok(self.scheduler.run(request)?)
    }

    /// Run inline with the same defaulting as [`trigger`](Self::trigger).
    pub async fn execute(&self, request: RunRequest) -> VitalsResult<HealthCheckReport> {
        let repository = Arc::clone(&self.repository);
        let registered = self.scheduler.registry().categories();
        let request = tokio::task::spawn_blocking(move || {
            apply_global_defaults(repository.as_ref(), &registered, request)
        })
        .await
        .map_err(|e| OrchestrationError::TaskJoin {
            reason: e.to_string(),
        })??;
        self.scheduler.execute(request).await
    }

    /// Analytics over the stored reports between `start` and `end` inclusive.
    pub fn analytics(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> VitalsResult<AnalyticsReport> {
        let reports = self.repository.get_check_reports_by_date_range(start, end)?;
        Ok(self.analytics.analyze(&reports, AnalyticsWindow::new(start, end)))
    }

    /// Sweep expired cache entries and, unless disabled, drop history older
    /// than the global retention.
    pub fn maintenance(&self) -> VitalsResult<MaintenanceSummary> {
        let cache_swept = self.cache.cleanup();
        let global = self.repository.get_global_config()?;
        let cleanup = if global.auto_cleanup {
            Some(self.repository.cleanup_old_data(global.retention_days)?)
        } else {
            None
        };
        Ok(MaintenanceSummary {
            cache_swept,
            cleanup,
        })
    }
}

/// Store the shipped default config of every category that has none.
/// Returns how many were written.
pub fn seed_default_configs(repository: &dyn IReportRepository) -> VitalsResult<usize> {
    let mut seeded = 0;
    for category in CheckCategory::ALL {
        if repository.get_check_config(category)?.is_none() {
            repository.save_check_config(category, &CheckConfig::default_for(category))?;
            seeded += 1;
        }
    }
    Ok(seeded)
}

fn apply_global_defaults(
    repository: &dyn IReportRepository,
    registered: &[CheckCategory],
    mut request: RunRequest,
) -> VitalsResult<RunRequest> {
    if request.categories.is_some() && request.config.parallel.is_some() {
        return Ok(request);
    }
    let global = repository.get_global_config()?;
    if request.categories.is_none() {
        request.categories = Some(
            global
                .enabled_categories
                .into_iter()
                .filter(|c| registered.contains(c))
                .collect(),
        );
    }
    if request.config.parallel.is_none() {
        request.config.parallel = Some(global.parallel);
    }
    Ok(request)
}
