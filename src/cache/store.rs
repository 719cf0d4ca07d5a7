//! Cache Store Module
//!
//! The entry store: a HashMap of keyed entries with TTL expiration and the
//! statistics describing it. Not synchronised on its own; `TtlCache` wraps it
//! in a reader-writer lock.

use std::borrow::Borrow;
use std::collections::hash_map::{Entry, HashMap};
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, StatsCounter, Ttl};

// == Cache Store ==
/// Keyed entry storage with TTL support.
///
/// Methods taking `&self` are the read operations; they only ever touch the
/// atomic hit/miss counters.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Performance statistics
    stats: StatsCounter,
    /// TTL for entries set without one; zero = never expire
    default_ttl: Duration,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL applied when `set` gets none; zero means never expire
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: StatsCounter::new(),
            default_ttl,
        }
    }

    /// The TTL applied when `set` gets none.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// If the key already exists its entry is updated in place: new value,
    /// expiration recomputed from the TTL. Only new keys bump the key count.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses default_ttl if None, zero = never expire)
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let now = Instant::now();

        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.value = value;
                entry.reset_ttl(ttl, now);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry::new(value, ttl, now));
                self.stats.key_added();
            }
        }
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Expired entries count as misses but are left in place for the sweeper.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Like `get`, but hands a reference to `f` instead of cloning.
    pub fn get_with<Q, R, F>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        match self.live_entry(key, Instant::now()) {
            Some(entry) => {
                self.stats.record_hit();
                Some(f(&entry.value))
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.keys_removed(1);
        }
        removed
    }

    /// Removes every listed key that is present. Returns how many were removed.
    pub fn remove_many<'a, Q, I>(&mut self, keys: I) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        keys.into_iter().filter(|key| self.remove(*key)).count()
    }

    /// Drops every entry. Hits and misses are kept.
    pub fn remove_all(&mut self) {
        self.entries.clear();
        self.stats.clear_keys();
    }

    // == Set TTL ==
    /// Restarts the lifetime of a live entry with a new TTL.
    ///
    /// Returns false, changing nothing, when the key is absent or expired.
    pub fn set_ttl<Q>(&mut self, key: &Q, ttl: Duration) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.reset_ttl(ttl, now);
                true
            }
            _ => false,
        }
    }

    // == Keys ==
    /// Snapshot of every stored key, expired-but-unswept ones included.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.entries.keys().cloned().collect()
    }

    // == Flush ==
    /// Drops every entry and zeroes all statistics.
    pub fn flush(&mut self) {
        self.entries.clear();
        self.stats.reset();
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub(crate) fn purge_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));

        let removed = before - self.entries.len();
        self.stats.keys_removed(removed);
        removed
    }

    /// True if `key` is present and unexpired. Does not count as a lookup.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.live_entry(key, Instant::now()).is_some()
    }

    /// Remaining lifetime of a live entry. Does not count as a lookup.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Ttl>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        self.entries
            .get(key)
            .and_then(|entry| entry.ttl_remaining(now))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn live_entry<Q>(&self, key: &Q, now: Instant) -> Option<&CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).filter(|entry| !entry.is_expired(now))
    }
}
