//! check_results: upsert and filtered lookups, newest first.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ToSql};

use vitals_core::constants::MAX_QUERY_LIMIT;
use vitals_core::errors::VitalsResult;
use vitals_core::models::CheckResult;

use crate::{fmt_ts, to_storage_err};

/// Indexed column a result lookup filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFilter {
    Category,
    Status,
    Severity,
}

impl ResultFilter {
    fn column(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Status => "status",
            Self::Severity => "severity",
        }
    }
}

pub fn upsert_result(conn: &Connection, result: &CheckResult, report_id: Option<&str>) -> VitalsResult<()> {
    if result.has_non_finite_metrics() {
        let mut finite = result.clone();
        finite.retain_finite_metrics();
        return upsert_result(conn, &finite, report_id);
    }
    let payload = serde_json::to_string(result)?;
    conn.execute(
        "INSERT INTO check_results
            (id, report_id, category, status, severity, duration_ms, timestamp, payload)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
            report_id = excluded.report_id,
            category = excluded.category,
            status = excluded.status,
            severity = excluded.severity,
            duration_ms = excluded.duration_ms,
            timestamp = excluded.timestamp,
            payload = excluded.payload",
        params![
            result.id,
            report_id,
            result.category.as_str(),
            result.status.as_str(),
            result.effective_severity().as_str(),
            result.duration_ms as i64,
            fmt_ts(&result.timestamp),
            payload,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn results_by(
    conn: &Connection,
    filter: ResultFilter,
    value: &str,
    limit: usize,
) -> VitalsResult<Vec<CheckResult>> {
    let sql = format!(
        "SELECT payload FROM check_results WHERE {} = ?1
         ORDER BY timestamp DESC, id DESC LIMIT ?2",
        filter.column()
    );
    let limit = limit.min(MAX_QUERY_LIMIT) as i64;
    query_payloads(conn, &sql, &[&value, &limit])
}

/// Results with `timestamp >= since`, oldest first.
pub fn results_since(conn: &Connection, since: DateTime<Utc>) -> VitalsResult<Vec<CheckResult>> {
    let since = fmt_ts(&since);
    query_payloads(
        conn,
        "SELECT payload FROM check_results WHERE timestamp >= ?1 ORDER BY timestamp ASC, id ASC",
        &[&since],
    )
}

/// Results saved on their own, outside any report.
pub fn standalone_results(conn: &Connection) -> VitalsResult<Vec<CheckResult>> {
    query_payloads(
        conn,
        "SELECT payload FROM check_results WHERE report_id IS NULL ORDER BY timestamp ASC, id ASC",
        &[],
    )
}

fn query_payloads(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> VitalsResult<Vec<CheckResult>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let payload = row.map_err(|e| to_storage_err(e.to_string()))?;
        results.push(serde_json::from_str(&payload)?);
    }
    Ok(results)
}
