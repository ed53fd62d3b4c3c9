use std::time::{Duration, Instant};

use vitals_core::models::CheckResult;

/// A cached result with its own validity window.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub result: CheckResult,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(result: CheckResult, ttl: Duration) -> Self {
        Self {
            result,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Valid while `now <= created_at + ttl`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) > self.ttl
    }

    /// Time left before expiry; zero once expired.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.ttl
            .saturating_sub(now.saturating_duration_since(self.created_at))
    }
}
