//! [`ResultCache`]: concurrent TTL store over `DashMap`.
//!
//! Per-key upserts are atomic; there are no cross-key transactions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use vitals_core::config::CacheConfig;
use vitals_core::models::{CheckCategory, CheckResult};
use vitals_observability::tracing_setup::events;

use crate::entry::CacheEntry;
use crate::key::CacheKey;

/// Per-entry view returned by [`ResultCache::stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryStats {
    pub key: String,
    pub category: CheckCategory,
    pub remaining_ttl_ms: u64,
    pub expired: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub entries: Vec<CacheEntryStats>,
}

pub struct ResultCache {
    entries: DashMap<CacheKey, CacheEntry>,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_millis(config.default_ttl_ms))
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Cached result if still valid. An expired entry is evicted and reported as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<CheckResult> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.result.clone());
            }
        }
        // Only evict if a concurrent `set` has not replaced the stale entry.
        self.entries.remove_if(key, |_, e| e.is_expired(now));
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Insert with the default TTL.
    pub fn set(&self, key: CacheKey, result: CheckResult) {
        self.set_with_ttl(key, result, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: CacheKey, result: CheckResult, ttl: Duration) {
        self.entries.insert(key, CacheEntry::new(result, ttl));
    }

    /// Remove one entry. Returns whether it existed.
    pub fn delete(&self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry of a category, whatever its config hash.
    pub fn invalidate_category(&self, category: CheckCategory) -> usize {
        let mut removed = 0;
        self.entries.retain(|k, _| {
            let keep = k.category() != category;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Sweep expired entries and return how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.entries.retain(|_, e| {
            let keep = !e.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        events::cache_swept(removed, self.entries.len());
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let mut entries: Vec<CacheEntryStats> = self
            .entries
            .iter()
            .map(|e| CacheEntryStats {
                key: e.key().to_string(),
                category: e.key().category(),
                remaining_ttl_ms: e.value().remaining(now).as_millis() as u64,
                expired: e.value().is_expired(now),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        CacheStats {
            size: entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::models::{CheckConfig, CheckStatus};

    fn key(category: CheckCategory) -> CacheKey {
        CacheKey::derive(category, &CheckConfig::default()).unwrap()
    }

    fn result(category: CheckCategory) -> CheckResult {
        CheckResult::new(category, "ping", CheckStatus::Passed, "ok")
    }

    #[test]
    fn miss_returns_none_and_counts() {
        let cache = ResultCache::default();
        assert!(cache.get(&key(CheckCategory::Security)).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn delete_reports_presence() {
        let cache = ResultCache::default();
        let k = key(CheckCategory::Security);
        cache.set(k.clone(), result(CheckCategory::Security));
        assert!(cache.delete(&k));
        assert!(!cache.delete(&k));
    }

    #[test]
    fn invalidate_category_leaves_others() {
        let cache = ResultCache::default();
        cache.set(key(CheckCategory::Security), result(CheckCategory::Security));
        cache.set(key(CheckCategory::Performance), result(CheckCategory::Performance));
        assert_eq!(cache.invalidate_category(CheckCategory::Security), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key(CheckCategory::Performance)).is_some());
    }

    #[test]
    fn clear_empties_cache() {
        let cache = ResultCache::default();
        cache.set(key(CheckCategory::Security), result(CheckCategory::Security));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn stats_report_remaining_ttl() {
        let cache = ResultCache::new(Duration::from_secs(60));
        cache.set(key(CheckCategory::Security), result(CheckCategory::Security));
        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        let entry = &stats.entries[0];
        assert_eq!(entry.category, CheckCategory::Security);
        assert!(!entry.expired);
        assert!(entry.remaining_ttl_ms > 59_000 && entry.remaining_ttl_ms <= 60_000);
    }
}
