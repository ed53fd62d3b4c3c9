/// Storage-layer errors for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("unsupported export bundle version: expected {expected}, got {actual}")]
    UnsupportedBundleVersion { expected: u32, actual: u32 },

    #[error("repository lock poisoned: {reason}")]
    LockPoisoned { reason: String },
}
