//! Cache Statistics Module
//!
//! Tracks hits, misses and the number of stored keys.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of the cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups (key absent or expired)
    pub misses: u64,
    /// Number of stored entries, including expired ones not yet swept
    pub number_of_keys: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Counter ==
/// Live counters owned by the store.
///
/// Hits and misses are atomic so lookups can count while holding only a shared
/// lock. The key count changes only alongside map mutations, which already
/// hold the lock exclusively.
#[derive(Debug, Default)]
pub struct StatsCounter {
    hits: AtomicU64,
    misses: AtomicU64,
    number_of_keys: usize,
}

impl StatsCounter {
    // == Constructor ==
    /// Creates a counter with everything at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a newly inserted key.
    pub fn key_added(&mut self) {
        self.number_of_keys += 1;
    }

    /// Uncounts `count` removed keys.
    pub fn keys_removed(&mut self, count: usize) {
        self.number_of_keys = self.number_of_keys.saturating_sub(count);
    }

    /// Zeroes the key count, leaving hits and misses alone.
    pub fn clear_keys(&mut self) {
        self.number_of_keys = 0;
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self.hits.get_mut() = 0;
        *self.misses.get_mut() = 0;
        self.number_of_keys = 0;
    }

    /// Current key count.
    pub fn number_of_keys(&self) -> usize {
        self.number_of_keys
    }

    // == Snapshot ==
    /// Copies the current values out.
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            number_of_keys: self.number_of_keys,
        }
    }
}
