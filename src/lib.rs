//! TTL Cache - A thread-safe in-memory key-value cache
//!
//! Entries carry a per-entry time-to-live and are evicted by a periodic
//! background sweep.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, CacheStore, Expiry, Ttl, TtlCache, INFINITE_TTL};
pub use config::Config;
pub use error::{CacheError, Result};
