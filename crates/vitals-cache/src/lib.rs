//! # vitals-cache
//!
//! Short-lived, invalidation-only store of check results keyed by
//! `(category, config hash)`. Entries carry their own TTL, expire lazily on
//! read, and are swept explicitly by [`ResultCache::cleanup`].
//!
//! The cache never references persisted reports.

pub mod entry;
pub mod key;
pub mod result_cache;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use result_cache::{CacheEntryStats, CacheStats, ResultCache};
