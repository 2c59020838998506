//! Freshness cache behaviour tests
//!
//! Drives the cache through a counting stand-in feed so the tests observe
//! how many times upstream was actually consulted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::cache::{Clock, FreshnessCache};

/// Hand-driven clock
struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    fn starting_at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Counting stand-in for an upstream feed
#[derive(Default)]
struct CountingFeed {
    calls: AtomicUsize,
}

impl CountingFeed {
    fn fetch(&self, key: i64) -> Vec<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        vec![key as f64]
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// The cache-then-fetch composition the services use
fn fetch_through(
    cache: &FreshnessCache<i64, Vec<f64>>,
    feed: &CountingFeed,
    key: i64,
) -> Vec<f64> {
    if let Some(values) = cache.get(&key) {
        return values;
    }
    let values = feed.fetch(key);
    cache.insert(key, values.clone());
    values
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 5, 21, 0, 0).unwrap()
}

#[test]
fn test_repeat_within_validity_hits_cache() {
    let clock = ManualClock::starting_at(start());
    let cache = FreshnessCache::with_clock(Duration::seconds(300), clock.clone());
    let feed = CountingFeed::default();

    let first = fetch_through(&cache, &feed, 42);
    clock.advance(Duration::seconds(299));
    let second = fetch_through(&cache, &feed, 42);

    assert_eq!(first, second);
    assert_eq!(feed.calls(), 1);
}

#[test]
fn test_expiry_goes_back_upstream() {
    let clock = ManualClock::starting_at(start());
    let cache = FreshnessCache::with_clock(Duration::seconds(300), clock.clone());
    let feed = CountingFeed::default();

    fetch_through(&cache, &feed, 42);
    clock.advance(Duration::seconds(301));
    fetch_through(&cache, &feed, 42);

    assert_eq!(feed.calls(), 2);
}

#[test]
fn test_exact_expiry_instant_refetches() {
    let clock = ManualClock::starting_at(start());
    let cache = FreshnessCache::with_clock(Duration::seconds(300), clock.clone());
    let feed = CountingFeed::default();

    fetch_through(&cache, &feed, 42);
    clock.advance(Duration::seconds(300));
    fetch_through(&cache, &feed, 42);

    assert_eq!(feed.calls(), 2);
}

#[test]
fn test_distinct_keys_fetch_separately() {
    let clock = ManualClock::starting_at(start());
    let cache = FreshnessCache::with_clock(Duration::seconds(300), clock.clone());
    let feed = CountingFeed::default();

    assert_eq!(fetch_through(&cache, &feed, 1), vec![1.0]);
    assert_eq!(fetch_through(&cache, &feed, 2), vec![2.0]);
    assert_eq!(feed.calls(), 2);

    // Both stay warm independently.
    fetch_through(&cache, &feed, 1);
    fetch_through(&cache, &feed, 2);
    assert_eq!(feed.calls(), 2);
}

#[test]
fn test_refetch_restarts_the_validity_window() {
    let clock = ManualClock::starting_at(start());
    let cache = FreshnessCache::with_clock(Duration::seconds(300), clock.clone());
    let feed = CountingFeed::default();

    fetch_through(&cache, &feed, 42);
    clock.advance(Duration::seconds(301));
    fetch_through(&cache, &feed, 42);
    assert_eq!(feed.calls(), 2);

    // The refetch re-armed the entry, so a prompt third call is served
    // from cache.
    clock.advance(Duration::seconds(299));
    fetch_through(&cache, &feed, 42);
    assert_eq!(feed.calls(), 2);
}

#[test]
fn test_expired_entries_are_kept_but_never_served() {
    let clock = ManualClock::starting_at(start());
    let cache: FreshnessCache<i64, Vec<f64>> =
        FreshnessCache::with_clock(Duration::seconds(60), clock.clone());

    cache.insert(7, vec![7.0]);
    clock.advance(Duration::hours(2));

    assert_eq!(cache.len(), 1);
    assert!(cache.get(&7).is_none());
}
