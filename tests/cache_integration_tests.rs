//! Integration Tests for the cache
//!
//! Drives full scenarios through the public `TtlCache` API, including the
//! background sweeper and multi-threaded access.

use std::sync::Arc;
use std::thread::{self, sleep};
use std::time::{Duration, Instant};

use ttl_cache::{CacheError, CacheStats, Config, Ttl, TtlCache};

// == Helper Functions ==

/// Cache that never sweeps during a test
fn create_test_cache<V>() -> TtlCache<&'static str, V>
where
    V: Send + Sync + 'static,
{
    TtlCache::new(Duration::ZERO, Duration::from_secs(600)).unwrap()
}

// == Basic Operation Scenario ==

#[test]
fn test_basic_operation_scenario() {
    let cache = create_test_cache();

    cache.set("a", "X", None);
    cache.set("b", "Y", None);
    cache.set("c", "Z", None);
    assert_eq!(cache.stats().number_of_keys, 3);

    assert_eq!(cache.get("b"), Some("Y"));
    assert_eq!(cache.stats().hits, 1);

    assert!(cache.remove("c"));
    assert_eq!(cache.stats().number_of_keys, 2);
    assert_eq!(cache.get("c"), None);
    assert_eq!(cache.stats().misses, 1);

    cache.remove_all();
    let stats = cache.stats();
    assert_eq!(stats.number_of_keys, 0);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);

    cache.set("d", "W", None);
    cache.flush();
    assert_eq!(cache.stats(), CacheStats::default());
    assert!(cache.keys().is_empty());
}

#[test]
fn test_overwrite_keeps_key_count() {
    let cache = create_test_cache();

    cache.set("k", 1, None);
    let after_first = cache.stats().number_of_keys;
    cache.set("k", 2, None);

    assert_eq!(cache.get("k"), Some(2));
    assert_eq!(cache.stats().number_of_keys, after_first);
}

#[test]
fn test_miss_and_hit_accounting() {
    let cache = create_test_cache();
    cache.set("present", 1, None);

    assert_eq!(cache.get("absent"), None);
    assert_eq!(cache.stats().hits, 0);
    assert_eq!(cache.stats().misses, 1);

    assert_eq!(cache.get("present"), Some(1));
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.stats().misses, 1);
}

#[test]
fn test_remove_absent_and_remove_many() {
    let cache = create_test_cache();
    cache.set("a", 1, None);
    cache.set("b", 2, None);

    assert!(!cache.remove("nope"));
    assert_eq!(cache.remove_many(["a", "nope", "b"]), 2);
    assert!(cache.is_empty());
    assert_eq!(cache.stats().number_of_keys, 0);
}

// == TTL Scenarios ==

#[test]
fn test_default_ttl_scenario_with_sweeps() {
    // default TTL 1s, sweep every 400ms
    let cache: TtlCache<&str, u32> =
        TtlCache::new(Duration::from_millis(1000), Duration::from_millis(400)).unwrap();

    cache.set("a", 1, None);
    cache.set("b", 2, None);
    cache.set("c", 3, None);

    sleep(Duration::from_millis(700));
    assert_eq!(cache.keys().len(), 3);
    assert_eq!(cache.get("a"), Some(1));

    sleep(Duration::from_millis(700));
    assert!(cache.keys().is_empty(), "entries should have been swept");
    assert_eq!(cache.stats().number_of_keys, 0);
}

#[test]
fn test_sweep_reclaims_within_two_intervals() {
    let interval = Duration::from_millis(200);
    let cache: TtlCache<&str, u32> = TtlCache::new(Duration::ZERO, interval).unwrap();

    cache.set("short", 1, Some(Duration::from_millis(100)));
    cache.set("forever", 2, None);

    sleep(interval * 2);

    assert_eq!(cache.keys(), vec!["forever"]);
    assert_eq!(cache.stats().number_of_keys, 1);
}

#[test]
fn test_expired_entry_lingers_until_swept() {
    let cache = create_test_cache();
    cache.set("k", 1, Some(Duration::from_millis(30)));
    sleep(Duration::from_millis(80));

    assert_eq!(cache.get("k"), None);
    assert_eq!(cache.stats().misses, 1);
    // Still stored and counted until a sweep visits it
    assert_eq!(cache.keys(), vec!["k"]);
    assert_eq!(cache.stats().number_of_keys, 1);

    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.stats().number_of_keys, 0);
}

#[test]
fn test_infinite_ttl_never_expires() {
    let cache: TtlCache<&str, u32> =
        TtlCache::new(Duration::ZERO, Duration::from_millis(50)).unwrap();

    cache.set("default", 1, None);
    cache.set("explicit", 2, Some(Duration::ZERO));
    sleep(Duration::from_millis(200));

    assert_eq!(cache.get("default"), Some(1));
    assert_eq!(cache.get("explicit"), Some(2));
    assert_eq!(cache.ttl_remaining("default"), Some(Ttl::Infinite));
}

#[test]
fn test_set_ttl_scenarios() {
    let cache = create_test_cache();

    assert!(!cache.set_ttl("absent", Duration::from_secs(5)));
    assert!(cache.keys().is_empty());

    cache.set("live", 1, Some(Duration::from_millis(50)));
    assert!(cache.set_ttl("live", Duration::ZERO));
    sleep(Duration::from_millis(100));
    assert_eq!(cache.get("live"), Some(1));

    cache.set("dead", 2, Some(Duration::from_millis(20)));
    sleep(Duration::from_millis(60));
    assert!(!cache.set_ttl("dead", Duration::from_secs(5)));
    assert_eq!(cache.get("dead"), None);
    assert_eq!(cache.keys().len(), 2);
}

// == Lifecycle ==

#[test]
fn test_config_rejects_zero_interval() {
    let config = Config::new(Duration::from_secs(1), Duration::ZERO);
    let result: Result<TtlCache<String, u32>, _> = TtlCache::from_config(&config);
    assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
}

#[test]
fn test_drop_does_not_wait_for_next_sweep() {
    let cache: TtlCache<String, u32> =
        TtlCache::new(Duration::ZERO, Duration::from_secs(600)).unwrap();
    cache.set("k".to_string(), 1, None);

    let started = Instant::now();
    drop(cache);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_suspend_and_resume_sweeper() {
    let cache: TtlCache<&str, u32> =
        TtlCache::new(Duration::ZERO, Duration::from_millis(50)).unwrap();
    cache.suspend_sweeper();

    cache.set("k", 1, Some(Duration::from_millis(20)));
    sleep(Duration::from_millis(200));
    assert_eq!(cache.len(), 1);

    cache.resume_sweeper();
    sleep(Duration::from_millis(200));
    assert!(cache.is_empty());
}

// == Concurrency ==

#[test]
fn test_concurrent_set_get_from_threads() {
    let cache: Arc<TtlCache<u64, u64>> =
        Arc::new(TtlCache::new(Duration::ZERO, Duration::from_millis(20)).unwrap());

    let writers: Vec<_> = (0..4u64)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..250u64 {
                    cache.set(worker * 1000 + i, i, None);
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..250u64 {
                    if let Some(value) = cache.get(&i) {
                        assert_eq!(value, i);
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.number_of_keys, 1000);
    assert_eq!(stats.hits + stats.misses, 1000);
}

#[tokio::test]
async fn test_cache_inside_async_runtime() {
    let cache: TtlCache<String, String> =
        TtlCache::new(Duration::from_millis(50), Duration::from_millis(50)).unwrap();

    cache.set("k".to_string(), "v".to_string(), None);
    assert_eq!(cache.get("k").as_deref(), Some("v"));

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(cache.is_empty());
}
