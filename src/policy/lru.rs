//! # Least Recently Used (LRU) Cache Implementation
//!
//! Bounded key-value cache with O(1) `get`/`put` and true LRU eviction.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId> (index into the list arena)            │   │
//!   │   │                                                              │   │
//!   │   │  ┌─────────┬────────────────────────────────────────────┐    │   │
//!   │   │  │   Key   │  SlotId                                    │    │   │
//!   │   │  ├─────────┼────────────────────────────────────────────┤    │   │
//!   │   │  │  "a"    │  ────────────────────────────────────────┐ │    │   │
//!   │   │  │  "b"    │  ──────────────────────────────────┐     │ │    │   │
//!   │   │  │  "c"    │  ────────────────────────────┐     │     │ │    │   │
//!   │   │  └─────────┴──────────────────────────────┼─────┼─────┼─┘    │   │
//!   │   └───────────────────────────────────────────┼─────┼─────┼──────┘   │
//!   │                                               │     │     │          │
//!   │   ┌───────────────────────────────────────────┼─────┼─────┼──────┐   │
//!   │   │  SentinelList<Entry<K, V>> (recency order)▼     ▼     ▼      │   │
//!   │   │                                                              │   │
//!   │   │  [head] ◄──► [c: C] ◄──► [b: B] ◄──► [a: A] ◄──► [tail]      │   │
//!   │   │               (MRU)                   (LRU)                  │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list owns every entry; the map only holds `SlotId` handles into the
//! list's arena. Moving or evicting an entry is a relink by handle, so no
//! reference into the list ever outlives the node it points at.
//!
//! ## Operations Flow
//!
//! ```text
//!   PUT new key, cache full (capacity = 3)
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     1. pop_back → C, drop C's map entry
//!     2. push_front D, map D → slot
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   GET existing key
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     get(B): map lookup O(1), move_to_front O(1)
//!     head ──► [B] ◄──► [A] ◄──► [C] ◄── tail
//! ```
//!
//! ## Methods
//!
//! | Method              | Complexity | Description                              |
//! |---------------------|------------|------------------------------------------|
//! | `try_new(capacity)` | O(1)       | Create cache, `ConfigError` on zero      |
//! | `put(k, v)`         | O(1)*      | Insert or update, may evict LRU          |
//! | `get(&k)`           | O(1)       | Get value, moves to MRU position         |
//! | `peek(&k)`          | O(1)       | Get value without affecting LRU order    |
//! | `contains(&k)`      | O(1)       | Check if key exists                      |
//! | `peek_lru()`        | O(1)       | Peek at LRU entry                        |
//! | `touch(&k)`         | O(1)       | Move to MRU without returning value      |
//! | `recency_rank(&k)`  | O(n)       | Position in recency order (0 = MRU)      |
//! | `iter()`            | O(n)       | Entries from MRU to LRU                  |
//!
//! ## Thread Safety
//!
//! `LruCache` is single-threaded. `get` reorders entries, so any shared use
//! needs one exclusive lock around the whole cache.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", "A");
//! cache.put("b", "B");
//! assert_eq!(cache.get(&"b"), Some(&"B"));
//! assert_eq!(cache.get(&"a"), Some(&"A"));
//! assert_eq!(cache.get(&"c"), None);
//!
//! cache.put("d", "D"); // evicts "b"
//! assert_eq!(cache.get(&"b"), None);
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{SentinelList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait};

// Storage beyond this grows on demand.
const MAX_PREALLOC_ENTRIES: usize = 1 << 16;

/// List payload: the key travels with the value so eviction can clean the map.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Bounded LRU cache.
///
/// Front of the recency list is the most recently used entry, back is the
/// least recently used one. The map and the list always hold the same set of
/// entries and `len() <= capacity()`.
pub struct LruCache<K, V> {
    map: FxHashMap<K, SlotId>,
    list: SentinelList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::try_new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(LruCache::<u32, String>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        tracing::trace!(capacity, "created lru cache");
        let prealloc = capacity.min(MAX_PREALLOC_ENTRIES);
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            list: SentinelList::with_capacity(prealloc),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A missing key is a normal outcome and yields `None`.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.map.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Inserts or updates `key` and marks it most recently used.
    ///
    /// Updating an existing key keeps the size unchanged and returns the old
    /// value. Inserting a new key into a full cache first evicts exactly one
    /// entry, the least recently used one.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
            self.list.move_to_front(id);
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            self.evict_lru();
        }

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.map.insert(key, id);
        None
    }

    /// Returns the value for `key` without changing the recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let &id = self.map.get(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is cached. Does not change the recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the least recently used entry without changing the order.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();

        let entry = self.list.back()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    /// Marks `key` most recently used; returns `false` if it is not cached.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.map.get(key) else {
            return false;
        };
        self.list.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Returns the position of `key` in recency order (0 = most recent).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        let &target = self.map.get(key)?;
        let rank = self.list.iter_ids().position(|id| {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();
            id == target
        })?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_found();

        Some(rank)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Verifies the map/list bijection, the capacity bound and list links.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "map holds {} keys, list holds {} entries",
                self.map.len(),
                self.list.len()
            )));
        }
        for id in self.list.iter_ids() {
            let entry = self.list.get(id).ok_or_else(|| {
                InvariantError::new(format!("list slot {} has no entry", id.index()))
            })?;
            if self.map.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "list slot {} is not indexed by its key",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    fn evict_lru(&mut self) {
        if let Ok(entry) = self.list.pop_back() {
            self.map.remove(&entry.key);

            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();

            tracing::debug!(
                capacity = self.capacity,
                len = self.map.len(),
                "evicted least recently used entry"
            );
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Returns a point-in-time copy of the cache's counters.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        LruCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Renders entries from MRU to LRU as `key: value => key: value`.
impl<K, V> fmt::Display for LruCache<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.list.iter().enumerate() {
            if i > 0 {
                f.write_str(" => ")?;
            }
            write!(f, "{}: {}", entry.key, entry.value)?;
        }
        Ok(())
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<K: Clone + Eq + Hash, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    // ==============================================
    // CORRECTNESS TESTS MODULE
    // ==============================================
    mod correctness {
        use super::*;

        mod basic_behavior {
            use super::*;

            #[test]
            fn test_new_cache_creation() {
                let cache: LruCache<i32, i32> = LruCache::new(10);
                assert_eq!(cache.capacity(), 10);
                assert_eq!(cache.len(), 0);
                assert!(cache.is_empty());

                let cache: LruCache<i32, i32> = LruCache::default();
                assert_eq!(cache.capacity(), 16);
            }

            #[test]
            fn test_zero_capacity_rejected() {
                let err = LruCache::<i32, i32>::try_new(0).unwrap_err();
                assert!(err.message().contains("capacity"));
            }

            #[test]
            #[should_panic(expected = "capacity")]
            fn test_new_zero_capacity_panics() {
                let _cache: LruCache<i32, i32> = LruCache::new(0);
            }

            #[test]
            fn test_huge_capacity_accepted_without_preallocating() {
                let mut cache = LruCache::<u8, u8>::try_new(usize::MAX).unwrap();
                assert_eq!(cache.capacity(), usize::MAX);
                assert_eq!(cache.put(1, 10), None);
                assert_eq!(cache.get(&1), Some(&10));
                cache.check_invariants().unwrap();

                let cache = LruCache::<u64, u64>::try_new(1 << 40).unwrap();
                assert!(cache.is_empty());
            }

            #[test]
            fn test_put_and_get() {
                let mut cache = LruCache::new(5);
                assert_eq!(cache.put(1, 100), None);
                assert_eq!(cache.len(), 1);
                assert!(cache.contains(&1));
                assert_eq!(cache.get(&1), Some(&100));
                assert_eq!(cache.get(&2), None);
            }

            #[test]
            fn test_put_existing_updates_value_in_place() {
                let mut cache = LruCache::new(3);
                cache.put("a", 1);
                cache.put("b", 2);

                assert_eq!(cache.put("a", 10), Some(1));
                assert_eq!(cache.len(), 2);
                assert_eq!(cache.peek(&"a"), Some(&10));
                assert_eq!(keys(&cache), vec!["a", "b"]);
            }

            #[test]
            fn test_reference_scenario_capacity_two() {
                let mut cache = LruCache::new(2);
                cache.put('a', "A");
                cache.put('b', "B");
                assert_eq!(cache.get(&'b'), Some(&"B"));
                assert_eq!(cache.get(&'a'), Some(&"A"));
                assert_eq!(cache.get(&'c'), None);

                cache.put('d', "D");
                assert_eq!(cache.get(&'b'), None);
                assert_eq!(cache.get(&'a'), Some(&"A"));
                assert_eq!(cache.get(&'d'), Some(&"D"));
                cache.check_invariants().unwrap();
            }

            #[test]
            fn test_display_lists_mru_first() {
                let mut cache = LruCache::new(3);
                cache.put("a", 1);
                cache.put("b", 2);
                cache.put("c", 3);
                cache.get(&"a");
                assert_eq!(cache.to_string(), "a: 1 => c: 3 => b: 2");
            }

            #[test]
            fn test_debug_is_non_exhaustive() {
                let mut cache = LruCache::new(4);
                cache.put(1, 1);
                let dbg = format!("{:?}", cache);
                assert!(dbg.contains("len: 1"));
                assert!(dbg.contains("capacity: 4"));
            }
        }

        mod eviction {
            use super::*;

            #[test]
            fn test_evicts_oldest_untouched_entry() {
                let mut cache = LruCache::new(3);
                cache.put(1, "one");
                cache.put(2, "two");
                cache.put(3, "three");

                cache.put(4, "four");
                assert!(!cache.contains(&1));
                assert_eq!(cache.len(), 3);
                assert_eq!(keys(&cache), vec![4, 3, 2]);
            }

            #[test]
            fn test_get_protects_entry_from_eviction() {
                let mut cache = LruCache::new(3);
                cache.put(1, ());
                cache.put(2, ());
                cache.put(3, ());

                cache.get(&1);
                cache.put(4, ());
                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
            }

            #[test]
            fn test_update_protects_entry_from_eviction() {
                let mut cache = LruCache::new(2);
                cache.put(1, 1);
                cache.put(2, 2);
                cache.put(1, 11);
                cache.put(3, 3);
                assert_eq!(cache.peek(&1), Some(&11));
                assert!(!cache.contains(&2));
            }

            #[test]
            fn test_exactly_one_eviction_per_overflow() {
                let mut cache = LruCache::new(4);
                for i in 0..4 {
                    cache.put(i, i);
                }
                for i in 4..20 {
                    let before = cache.len();
                    cache.put(i, i);
                    assert_eq!(cache.len(), before);
                    assert!(!cache.contains(&(i - 4)));
                    cache.check_invariants().unwrap();
                }
            }

            #[test]
            fn test_capacity_one() {
                let mut cache = LruCache::new(1);
                cache.put("x", 1);
                cache.put("y", 2);
                assert_eq!(cache.get(&"x"), None);
                assert_eq!(cache.get(&"y"), Some(&2));
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn test_slots_are_reused_after_eviction() {
                let mut cache = LruCache::new(2);
                for i in 0..100 {
                    cache.put(i, i);
                }
                // two sentinels plus two live entries, never more
                assert_eq!(cache.list.arena_slots(), 4);
                cache.check_invariants().unwrap();
            }
        }

        mod recency {
            use super::*;

            #[test]
            fn test_peek_does_not_promote() {
                let mut cache = LruCache::new(2);
                cache.put(1, "a");
                cache.put(2, "b");
                assert_eq!(cache.peek(&1), Some(&"a"));
                cache.put(3, "c");
                assert!(!cache.contains(&1));
            }

            #[test]
            fn test_peek_lru_and_touch() {
                let mut cache = LruCache::new(3);
                assert_eq!(cache.peek_lru(), None);
                cache.put(1, "a");
                cache.put(2, "b");
                assert_eq!(cache.peek_lru(), Some((&1, &"a")));
                assert!(cache.touch(&1));
                assert_eq!(cache.peek_lru(), Some((&2, &"b")));
                assert!(!cache.touch(&99));
            }

            #[test]
            fn test_recency_rank() {
                let mut cache = LruCache::new(5);
                cache.put(1, ());
                cache.put(2, ());
                cache.put(3, ());
                assert_eq!(cache.recency_rank(&3), Some(0));
                assert_eq!(cache.recency_rank(&1), Some(2));
                cache.get(&1);
                assert_eq!(cache.recency_rank(&1), Some(0));
                assert_eq!(cache.recency_rank(&3), Some(1));
                assert_eq!(cache.recency_rank(&9), None);
            }

            #[test]
            fn test_iter_runs_mru_to_lru() {
                let mut cache = LruCache::new(4);
                cache.extend([(1, 'a'), (2, 'b'), (3, 'c')]);
                cache.get(&2);
                assert_eq!(keys(&cache), vec![2, 3, 1]);
                let lru_first: Vec<_> = cache.iter().rev().map(|(k, _)| *k).collect();
                assert_eq!(lru_first, vec![1, 3, 2]);
                assert_eq!(cache.iter().len(), 3);
            }

            #[test]
            fn test_trait_objects_share_behavior() {
                fn fill<C: CoreCache<u8, u8>>(cache: &mut C) {
                    for i in 0..5 {
                        cache.put(i, i);
                    }
                }
                let mut cache = LruCache::new(3);
                fill(&mut cache);
                assert_eq!(CoreCache::len(&cache), 3);
                assert_eq!(LruCacheTrait::peek_lru(&cache), Some((&2, &2)));
            }
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn test_metrics_track_hits_misses_and_evictions() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(1, 10);
            cache.put(3, 3);
            cache.get(&1);
            cache.get(&2);
            cache.peek(&3);

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.insert_calls, 4);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.insert_new, 3);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.peek_found, 1);
            assert_eq!(snap.cache_len, 2);
            assert_eq!(snap.capacity, 2);
            assert_eq!(MetricsSnapshotProvider::snapshot(&cache), snap);
        }
    }
}
