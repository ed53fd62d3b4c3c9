//! Versioned schema migrations, recorded in `schema_version`.

pub mod v001_initial;

use rusqlite::Connection;

use vitals_core::errors::{StorageError, VitalsResult};

use crate::to_storage_err;

/// `(version, sql)` in ascending order.
const MIGRATIONS: &[(u32, &str)] = &[(1, v001_initial::MIGRATION_SQL)];

pub const LATEST_VERSION: u32 = 1;

/// Apply every migration newer than the recorded version.
pub fn run_migrations(conn: &Connection) -> VitalsResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        apply(conn, version, sql).map_err(|reason| StorageError::MigrationFailed { version, reason })?;
        tracing::info!(version = version, "applied storage migration");
    }
    current_version(conn)
}

pub fn current_version(conn: &Connection) -> VitalsResult<u32> {
    conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| {
        row.get(0)
    })
    .map_err(|e| to_storage_err(e.to_string()))
}

fn apply(conn: &Connection, version: u32, sql: &str) -> Result<(), String> {
    let tx = conn.unchecked_transaction().map_err(|e| e.to_string())?;
    tx.execute_batch(sql).map_err(|e| e.to_string())?;
    tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| e.to_string())?;
    tx.commit().map_err(|e| e.to_string())
}
