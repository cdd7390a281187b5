// crates/db/src/cache.rs
//! Time-to-live cache in front of read queries.
//!
//! Pure in-memory map; operations never suspend and never fail. A problem
//! at this layer degrades to a cache miss, not an error. Expiry happens on
//! lookup only; there is no background sweep. Every successful write to any
//! collection clears the whole cache (correctness over precision).

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Default TTL for list and singleton reads.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
/// Short TTL for query-specific, low-reuse search results.
pub const SEARCH_TTL: Duration = Duration::from_secs(60);
/// Long TTL for aggregate analytics.
pub const ANALYTICS_TTL: Duration = Duration::from_secs(10 * 60);

/// Injectable time source so tests can drive expiry deterministically.
pub type Clock = Arc<dyn Fn() -> Instant + Send + Sync>;

/// The wall clock. Production constructors use this.
pub fn system_clock() -> Clock {
    Arc::new(Instant::now)
}

struct Slot {
    value: Arc<dyn Any + Send + Sync>,
    stored_at: Instant,
    ttl: Duration,
}

struct Inner {
    slots: Mutex<HashMap<String, Slot>>,
    clock: Clock,
}

/// Keyed TTL cache. Cloning shares the underlying map.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            inner: Arc::new(Inner {
                slots: Mutex::new(HashMap::new()),
                clock,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still a valid cache.
        match self.inner.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Fetch a cached value if it is still within its TTL. An expired entry
    /// is evicted and reported absent. A type mismatch behaves as a miss.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let now = (self.inner.clock)();
        let mut slots = self.lock();
        match slots.get(key) {
            Some(slot) if now.duration_since(slot.stored_at) <= slot.ttl => {
                slot.value.downcast_ref::<T>().cloned()
            }
            Some(_) => {
                slots.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value under the default TTL.
    pub fn set<T>(&self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.set_with_ttl(key, value, DEFAULT_TTL);
    }

    /// Store a value with an explicit TTL.
    pub fn set_with_ttl<T>(&self, key: impl Into<String>, value: T, ttl: Duration)
    where
        T: Send + Sync + 'static,
    {
        let stored_at = (self.inner.clock)();
        self.lock().insert(
            key.into(),
            Slot {
                value: Arc::new(value),
                stored_at,
                ttl,
            },
        );
    }

    /// Evict a single key.
    pub fn delete(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Evict everything. Called after every successful write.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of live-or-expired slots currently held (expired entries
    /// linger until looked up).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock that tests can advance manually.
    fn manual_clock() -> (Clock, Arc<AtomicU64>) {
        let offset = Arc::new(AtomicU64::new(0));
        let base = Instant::now();
        let handle = Arc::clone(&offset);
        let clock: Clock =
            Arc::new(move || base + Duration::from_secs(handle.load(Ordering::SeqCst)));
        (clock, offset)
    }

    #[test]
    fn test_get_within_ttl() {
        let (clock, time) = manual_clock();
        let cache = QueryCache::with_clock(clock);
        cache.set_with_ttl("k", 42_i64, Duration::from_secs(60));

        time.store(59, Ordering::SeqCst);
        assert_eq!(cache.get::<i64>("k"), Some(42));
    }

    #[test]
    fn test_expired_entry_is_evicted_on_lookup() {
        let (clock, time) = manual_clock();
        let cache = QueryCache::with_clock(clock);
        cache.set_with_ttl("k", 42_i64, Duration::from_secs(60));

        time.store(61, Ordering::SeqCst);
        assert_eq!(cache.get::<i64>("k"), None);
        // The key is gone, not just hidden
        assert!(cache.is_empty());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // now - stored <= ttl keeps the entry
        let (clock, time) = manual_clock();
        let cache = QueryCache::with_clock(clock);
        cache.set_with_ttl("k", "v".to_string(), Duration::from_secs(60));

        time.store(60, Ordering::SeqCst);
        assert_eq!(cache.get::<String>("k"), Some("v".to_string()));
    }

    #[test]
    fn test_delete_removes_single_key() {
        let cache = QueryCache::new();
        cache.set("a", 1_i64);
        cache.set("b", 2_i64);
        cache.delete("a");
        assert_eq!(cache.get::<i64>("a"), None);
        assert_eq!(cache.get::<i64>("b"), Some(2));
    }

    #[test]
    fn test_clear_evicts_everything() {
        let cache = QueryCache::new();
        cache.set("a", 1_i64);
        cache.set("b", 2_i64);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_type_mismatch_degrades_to_miss() {
        let cache = QueryCache::new();
        cache.set("k", 42_i64);
        assert_eq!(cache.get::<String>("k"), None);
    }

    #[test]
    fn test_set_overwrites_and_resets_ttl() {
        let (clock, time) = manual_clock();
        let cache = QueryCache::with_clock(clock);
        cache.set_with_ttl("k", 1_i64, Duration::from_secs(10));

        time.store(8, Ordering::SeqCst);
        cache.set_with_ttl("k", 2_i64, Duration::from_secs(10));

        time.store(15, Ordering::SeqCst);
        assert_eq!(cache.get::<i64>("k"), Some(2));
    }
}
