/// Result cache errors. Callers treat every variant as a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache key derivation failed: {reason}")]
    KeyDerivation { reason: String },
}
