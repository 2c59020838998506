//! Freshness cache for upstream fetch results
//!
//! TTL memoization keyed by the full call-argument tuple. An entry is a
//! complete (value, expiry) pair written under one lock, so readers never
//! observe a partial update. There is no eviction beyond expiry: realistic
//! key spaces stay small (rounded coordinates, a handful of window sizes).

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

/// Time source used for expiry checks, injectable for tests
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// TTL cache in front of one fetch operation
pub struct FreshnessCache<K, V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<K, (V, DateTime<Utc>)>>,
}

impl<K, V> FreshnessCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Cache with the given validity window on the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Cache with an injected time source
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the stored value if its validity window has not elapsed.
    ///
    /// An entry is stale once the full TTL has passed: a lookup at exactly
    /// the expiry instant misses.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let entries = self.lock_entries();
        entries
            .get(key)
            .filter(|(_, expires_at)| now < *expires_at)
            .map(|(value, _)| value.clone())
    }

    /// Store a value with a fresh expiry, replacing any previous entry
    pub fn insert(&self, key: K, value: V) {
        let expires_at = self.clock.now() + self.ttl;
        self.lock_entries().insert(key, (value, expires_at));
    }

    /// Number of entries held, live and expired
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<K, (V, DateTime<Utc>)>> {
        // Entries are always complete pairs, so a poisoned lock is safe to
        // recover.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
