//! Retention cleanup, WAL checkpoint, integrity check.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use vitals_core::errors::VitalsResult;
use vitals_core::models::CleanupSummary;

use crate::{fmt_ts, to_storage_err};

/// Delete reports older than `cutoff` together with their results, and
/// standalone results older than `cutoff`. A result owned by a report is
/// aged by its report, never by its own timestamp.
pub fn delete_older_than(conn: &Connection, cutoff: DateTime<Utc>) -> VitalsResult<CleanupSummary> {
    let cutoff = fmt_ts(&cutoff);
    let deleted_results = conn
        .execute(
            "DELETE FROM check_results
             WHERE (report_id IS NULL AND timestamp < ?1)
                OR report_id IN (SELECT id FROM check_reports WHERE timestamp < ?1)",
            params![cutoff],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let deleted_reports = conn
        .execute("DELETE FROM check_reports WHERE timestamp < ?1", params![cutoff])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(CleanupSummary {
        deleted_results,
        deleted_reports,
    })
}

pub fn wal_checkpoint(conn: &Connection) -> VitalsResult<()> {
    // Returns (busy, log frames, checkpointed frames); only success matters.
    conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// True if SQLite reports the database as intact.
pub fn integrity_check(conn: &Connection) -> VitalsResult<bool> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(result == "ok")
}
