//! Thread-safe cache façade
//!
//! Wraps a `CacheStore` in a single reader-writer lock and owns the background
//! sweeper for the store's lifetime.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, Ttl, DEFAULT_CHECK_INTERVAL, INFINITE_TTL};
use crate::config::Config;
use crate::error::Result;
use crate::tasks::Sweeper;

// == TTL Cache ==
/// In-memory key-value cache with per-entry TTL and periodic expiration sweeps.
///
/// Lookups (`get`, `keys`, `stats`, ...) share the lock; every mutation takes
/// it exclusively. Statistics live behind the same lock as the entries, so a
/// counter update is always atomic with the change it describes.
///
/// Expired entries read as misses immediately but stay stored, and counted in
/// `number_of_keys`, until a sweep or an explicit removal reaches them.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use ttl_cache::TtlCache;
///
/// let cache = TtlCache::new(Duration::from_secs(10), Duration::from_secs(60))?;
/// cache.set("a", 1, None);
/// assert_eq!(cache.get("a"), Some(1));
/// # Ok::<(), ttl_cache::CacheError>(())
/// ```
#[derive(Debug)]
pub struct TtlCache<K, V> {
    // Declared first so the sweeper is stopped before the store is released
    sweeper: Sweeper,
    store: Arc<RwLock<CacheStore<K, V>>>,
    check_interval: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache and starts its sweeper.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL for `set` calls without one; zero = never expire
    /// * `check_interval` - Period between sweeps; must be non-zero
    pub fn new(default_ttl: Duration, check_interval: Duration) -> Result<Self> {
        let store = Arc::new(RwLock::new(CacheStore::new(default_ttl)));
        let sweeper = Sweeper::spawn(Arc::downgrade(&store), check_interval)?;

        Ok(Self {
            sweeper,
            store,
            check_interval,
        })
    }

    /// Creates a cache whose entries never expire by default, swept every
    /// 600 seconds.
    pub fn with_defaults() -> Result<Self> {
        Self::new(INFINITE_TTL, DEFAULT_CHECK_INTERVAL)
    }

    /// Creates a cache from a `Config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.default_ttl, config.check_interval)
    }

    /// The TTL applied when `set` gets none.
    pub fn default_ttl(&self) -> Duration {
        self.store.read().default_ttl()
    }

    /// The sweep period the cache was built with.
    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    // == Writes ==
    /// Inserts or updates `key`. `ttl` of `None` uses the default TTL.
    pub fn set(&self, key: K, value: V, ttl: Option<Duration>) {
        self.store.write().set(key, value, ttl);
    }

    /// Removes `key` if present. Returns whether anything was removed.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.write().remove(key)
    }

    /// Removes every listed key that is present, under one lock acquisition.
    pub fn remove_many<'a, Q, I>(&self, keys: I) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        self.store.write().remove_many(keys)
    }

    /// Drops every entry. Hits and misses are kept.
    pub fn remove_all(&self) {
        self.store.write().remove_all();
        debug!("Removed all cache entries");
    }

    /// Restarts the lifetime of a live entry. False if absent or expired.
    pub fn set_ttl<Q>(&self, key: &Q, ttl: Duration) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.write().set_ttl(key, ttl)
    }

    /// Drops every entry and zeroes all statistics.
    pub fn flush(&self) {
        self.store.write().flush();
        debug!("Cache flushed");
    }

    /// Runs one sweep now. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.store.write().purge_expired()
    }

    // == Reads ==
    /// Returns a clone of the value under `key` if present and unexpired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.store.read().get(key)
    }

    /// Like `get`, but runs `f` on the value while the shared lock is held.
    pub fn get_with<Q, R, F>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        self.store.read().get_with(key, f)
    }

    /// Snapshot of every stored key, expired-but-unswept ones included.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.store.read().keys()
    }

    /// True if `key` is present and unexpired. Not counted as a lookup.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.read().contains_key(key)
    }

    /// Remaining lifetime of a live entry. Not counted as a lookup.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Ttl>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.read().ttl_remaining(key)
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }

    /// Number of stored entries, expired-but-unswept ones included.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    // == Sweeper Control ==
    /// Restarts the sweeper with a new period.
    ///
    /// `check_interval` keeps reporting the construction value.
    pub fn reschedule_sweeper(&self, period: Duration) -> Result<()> {
        self.sweeper.reschedule(period)
    }

    /// Pauses background sweeps until `resume_sweeper`.
    pub fn suspend_sweeper(&self) {
        self.sweeper.suspend();
    }

    /// Resumes background sweeps with the last period.
    pub fn resume_sweeper(&self) {
        self.sweeper.resume();
    }
}
