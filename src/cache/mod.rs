//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL and background expiration.

use std::time::Duration;

mod entry;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::{CacheEntry, Expiry, Ttl};
pub use stats::CacheStats;
pub(crate) use stats::StatsCounter;
pub use store::CacheStore;
pub use ttl_cache::TtlCache;

// == Public Constants ==
/// TTL value meaning "never expire"
pub const INFINITE_TTL: Duration = Duration::ZERO;

/// Sweep period used when none is configured
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(600);
