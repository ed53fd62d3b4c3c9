//! StorageEngine: owns the ConnectionPool, runs migrations on open, and
//! implements IReportRepository over SQLite.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};

use vitals_core::config::StorageConfig;
use vitals_core::errors::VitalsResult;
use vitals_core::models::{
    CheckCategory, CheckConfig, CheckResult, CheckResultStatistics, CheckStatus, CleanupSummary,
    ExportBundle, GlobalConfig, HealthCheckReport, ImportSummary, Severity,
};
use vitals_core::traits::IReportRepository;
use vitals_observability::tracing_setup::events;

use crate::pool::write_connection::with_transaction;
use crate::pool::{pragmas, ConnectionPool};
use crate::queries::result_ops::ResultFilter;
use crate::queries::{config_ops, maintenance, report_ops, result_ops};
use crate::{bundle, migrations, stats};

pub struct StorageEngine {
    pool: ConnectionPool,
    /// False for in-memory databases, whose pool connections would each be
    /// a separate empty database.
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a file-backed engine with default pool settings.
    pub fn open(path: &Path) -> VitalsResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> VitalsResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    pub fn open_in_memory() -> VitalsResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> VitalsResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            let version = migrations::run_migrations(conn)?;
            tracing::debug!(schema_version = version, "storage initialized");
            Ok(())
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn schema_version(&self) -> VitalsResult<u32> {
        self.with_reader(migrations::current_version)
    }

    /// True if the writer connection is in WAL mode. Always false in memory.
    pub fn is_wal_mode(&self) -> VitalsResult<bool> {
        self.pool.writer.with_conn_sync(pragmas::verify_wal_mode)
    }

    pub fn integrity_check(&self) -> VitalsResult<bool> {
        self.pool.writer.with_conn_sync(maintenance::integrity_check)
    }

    pub fn checkpoint(&self) -> VitalsResult<()> {
        self.pool.writer.with_conn_sync(maintenance::wal_checkpoint)
    }

    fn with_reader<F, T>(&self, f: F) -> VitalsResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> VitalsResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    fn results_by(&self, filter: ResultFilter, value: &str, limit: usize) -> VitalsResult<Vec<CheckResult>> {
        self.with_reader(|conn| result_ops::results_by(conn, filter, value, limit))
    }
}

fn days_ago(days: u32) -> DateTime<Utc> {
    Utc::now() - Duration::days(i64::from(days))
}

impl IReportRepository for StorageEngine {
    fn save_check_report(&self, report: &HealthCheckReport) -> VitalsResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            with_transaction(conn, |tx| report_ops::upsert_report(tx, report))
        })
    }

    fn get_check_report(&self, id: &str) -> VitalsResult<Option<HealthCheckReport>> {
        self.with_reader(|conn| report_ops::get_report(conn, id))
    }

    fn get_latest_check_report(&self) -> VitalsResult<Option<HealthCheckReport>> {
        self.with_reader(report_ops::latest_report)
    }

    fn get_check_reports(&self, limit: usize, offset: usize) -> VitalsResult<Vec<HealthCheckReport>> {
        self.with_reader(|conn| report_ops::list_reports(conn, limit, offset))
    }

    fn get_check_reports_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> VitalsResult<Vec<HealthCheckReport>> {
        self.with_reader(|conn| report_ops::reports_in_range(conn, from, to))
    }

    fn save_check_result(&self, result: &CheckResult) -> VitalsResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| result_ops::upsert_result(conn, result, None))
    }

    fn get_check_results_by_category(&self, category: CheckCategory, limit: usize) -> VitalsResult<Vec<CheckResult>> {
        self.results_by(ResultFilter::Category, category.as_str(), limit)
    }

    fn get_check_results_by_status(&self, status: CheckStatus, limit: usize) -> VitalsResult<Vec<CheckResult>> {
        self.results_by(ResultFilter::Status, status.as_str(), limit)
    }

    fn get_check_results_by_severity(&self, severity: Severity, limit: usize) -> VitalsResult<Vec<CheckResult>> {
        self.results_by(ResultFilter::Severity, severity.as_str(), limit)
    }

    fn get_check_result_statistics(&self, days: u32) -> VitalsResult<CheckResultStatistics> {
        let results = self.with_reader(|conn| result_ops::results_since(conn, days_ago(days)))?;
        Ok(stats::compute(&results))
    }

    fn cleanup_old_data(&self, retention_days: u32) -> VitalsResult<CleanupSummary> {
        let cutoff = days_ago(retention_days);
        let summary = self.pool.writer.with_conn_sync(|conn| {
            with_transaction(conn, |tx| maintenance::delete_older_than(tx, cutoff))
        })?;
        events::data_cleaned(retention_days, summary.deleted_results, summary.deleted_reports);
        Ok(summary)
    }

    fn export_data(&self) -> VitalsResult<ExportBundle> {
        self.with_reader(|conn| {
            Ok(bundle::assemble(
                result_ops::standalone_results(conn)?,
                report_ops::all_reports(conn)?,
                config_ops::all_check_configs(conn)?,
                config_ops::get_global_config(conn)?,
            ))
        })
    }

    fn import_data(&self, bundle: &ExportBundle) -> VitalsResult<ImportSummary> {
        bundle::check_version(bundle)?;
        self.pool.writer.with_conn_sync(|conn| {
            with_transaction(conn, |tx| {
                for report in &bundle.reports {
                    report_ops::upsert_report(tx, report)?;
                }
                for result in &bundle.results {
                    result_ops::upsert_result(tx, result, None)?;
                }
                for (category, config) in &bundle.configs {
                    config_ops::save_check_config(tx, *category, config)?;
                }
                if let Some(global) = &bundle.global_config {
                    config_ops::save_global_config(tx, global)?;
                }
                Ok(ImportSummary {
                    imported_results: bundle.results.len(),
                    imported_reports: bundle.reports.len(),
                    imported_configs: bundle.configs.len(),
                })
            })
        })
    }

    fn get_check_config(&self, category: CheckCategory) -> VitalsResult<Option<CheckConfig>> {
        self.with_reader(|conn| config_ops::get_check_config(conn, category))
    }

    fn save_check_config(&self, category: CheckCategory, config: &CheckConfig) -> VitalsResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| config_ops::save_check_config(conn, category, config))
    }

    fn get_global_config(&self) -> VitalsResult<GlobalConfig> {
        Ok(self
            .with_reader(config_ops::get_global_config)?
            .unwrap_or_default())
    }

    fn save_global_config(&self, config: &GlobalConfig) -> VitalsResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| config_ops::save_global_config(conn, config))
    }
}
