//! The single serialized write connection.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use vitals_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS;
use vitals_core::errors::{StorageError, VitalsResult};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> VitalsResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> VitalsResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, DEFAULT_BUSY_TIMEOUT_MS)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the writer. Called from blocking
    /// contexts only.
    pub fn with_conn_sync<F, T>(&self, f: F) -> VitalsResult<T>
    where
        F: FnOnce(&Connection) -> VitalsResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| StorageError::LockPoisoned {
            reason: format!("write connection: {e}"),
        })?;
        f(&guard)
    }
}

/// Run `f` inside a transaction on `conn`; rolled back if `f` fails.
pub fn with_transaction<F, T>(conn: &Connection, f: F) -> VitalsResult<T>
where
    F: FnOnce(&rusqlite::Transaction<'_>) -> VitalsResult<T>,
{
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("failed to begin transaction: {e}")))?;
    let result = f(&tx)?;
    tx.commit()
        .map_err(|e| to_storage_err(format!("failed to commit: {e}")))?;
    Ok(result)
}
