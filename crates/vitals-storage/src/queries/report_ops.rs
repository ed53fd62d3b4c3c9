//! check_reports: upsert with owned results, lookups, and range queries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use vitals_core::errors::VitalsResult;
use vitals_core::models::HealthCheckReport;

use super::result_ops;
use crate::{fmt_ts, to_storage_err};

/// Insert or replace a report and its results. Caller provides the transaction.
pub fn upsert_report(conn: &Connection, report: &HealthCheckReport) -> VitalsResult<()> {
    if report.has_non_finite_metrics() {
        let mut finite = report.clone();
        finite.retain_finite_metrics();
        return upsert_report(conn, &finite);
    }
    let payload = serde_json::to_string(report)?;
    conn.execute(
        "INSERT INTO check_reports (id, timestamp, score, overall_status, duration_ms, payload)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
            timestamp = excluded.timestamp,
            score = excluded.score,
            overall_status = excluded.overall_status,
            duration_ms = excluded.duration_ms,
            payload = excluded.payload",
        params![
            report.id,
            fmt_ts(&report.timestamp),
            report.summary.score,
            report.summary.overall_status.as_str(),
            report.duration_ms as i64,
            payload,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute("DELETE FROM check_results WHERE report_id = ?1", params![report.id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    for result in &report.results {
        result_ops::upsert_result(conn, result, Some(&report.id))?;
    }
    Ok(())
}

pub fn get_report(conn: &Connection, id: &str) -> VitalsResult<Option<HealthCheckReport>> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM check_reports WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    payload.map(|p| decode(&p)).transpose()
}

pub fn latest_report(conn: &Connection) -> VitalsResult<Option<HealthCheckReport>> {
    Ok(list_reports(conn, 1, 0)?.into_iter().next())
}

/// Newest first.
pub fn list_reports(conn: &Connection, limit: usize, offset: usize) -> VitalsResult<Vec<HealthCheckReport>> {
    query_payloads(
        conn,
        "SELECT payload FROM check_reports ORDER BY timestamp DESC, id DESC LIMIT ?1 OFFSET ?2",
        params![limit as i64, offset as i64],
    )
}

/// Oldest first, bounds inclusive.
pub fn reports_in_range(
    conn: &Connection,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> VitalsResult<Vec<HealthCheckReport>> {
    query_payloads(
        conn,
        "SELECT payload FROM check_reports
         WHERE timestamp >= ?1 AND timestamp <= ?2
         ORDER BY timestamp ASC, id ASC",
        params![fmt_ts(&from), fmt_ts(&to)],
    )
}

pub fn all_reports(conn: &Connection) -> VitalsResult<Vec<HealthCheckReport>> {
    query_payloads(
        conn,
        "SELECT payload FROM check_reports ORDER BY timestamp ASC, id ASC",
        [],
    )
}

fn query_payloads<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> VitalsResult<Vec<HealthCheckReport>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut reports = Vec::new();
    for row in rows {
        let payload = row.map_err(|e| to_storage_err(e.to_string()))?;
        reports.push(decode(&payload)?);
    }
    Ok(reports)
}

fn decode(payload: &str) -> VitalsResult<HealthCheckReport> {
    Ok(serde_json::from_str(payload)?)
}
