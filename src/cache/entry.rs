//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Expiry ==
/// Absolute expiration point of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// The entry never expires
    Never,
    /// The entry expires once this instant is reached
    At(Instant),
}

impl Expiry {
    /// Computes the expiry for a TTL starting at `now`.
    ///
    /// A zero TTL means "never expire". A deadline that does not fit in an
    /// `Instant` is treated the same way.
    pub fn from_ttl(ttl: Duration, now: Instant) -> Self {
        if ttl.is_zero() {
            return Expiry::Never;
        }
        now.checked_add(ttl).map_or(Expiry::Never, Expiry::At)
    }
}

// == Ttl ==
/// Remaining lifetime of a live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// The entry never expires
    Infinite,
    /// Time left before the entry expires
    Remaining(Duration),
}

// == Cache Entry ==
/// Represents a single cache entry with value and expiration.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry stops being readable
    pub expires_at: Expiry,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry whose TTL starts at `now`.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: Expiry::from_ttl(ttl, now),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// An entry is expired once `now` reaches its deadline, so a TTL is
    /// readable for strictly less than its full duration.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Expiry::At(deadline) => deadline <= now,
            Expiry::Never => false,
        }
    }

    // == Reset TTL ==
    /// Recomputes the expiration from a new TTL starting at `now`.
    pub fn reset_ttl(&mut self, ttl: Duration, now: Instant) {
        self.expires_at = Expiry::from_ttl(ttl, now);
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or `None` once expired.
    pub fn ttl_remaining(&self, now: Instant) -> Option<Ttl> {
        match self.expires_at {
            Expiry::Never => Some(Ttl::Infinite),
            Expiry::At(deadline) if deadline > now => Some(Ttl::Remaining(deadline - now)),
            Expiry::At(_) => None,
        }
    }
}
