//! # Cache Traits
//!
//! Seams between cache callers and the LRU implementation.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  put(&mut, K, V) → Option<V>            │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) / is_empty(&) / capacity(&)     │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  peek_lru(&) → (&K, &V)                 │
//!   │  touch(&mut, &K) → bool                 │
//!   │  recency_rank(&, &K) → usize            │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! Neither trait exposes removal: entries leave an LRU cache only through
//! capacity eviction.
//!
//! ## Example
//!
//! ```
//! use lrukit::traits::CoreCache;
//! use lrukit::policy::lru::LruCache;
//!
//! fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
//!     for (key, value) in data {
//!         cache.put(*key, value.clone());
//!     }
//! }
//!
//! let mut cache = LruCache::new(100);
//! warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
//! assert_eq!(cache.len(), 2);
//! ```

/// Operations every bounded key-value cache supports.
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the value it replaced.
    ///
    /// A new key in a full cache first evicts one entry according to the
    /// cache's policy. The evicted value is not returned.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::traits::CoreCache;
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// assert_eq!(cache.put(1, "first"), None);
    /// assert_eq!(cache.put(1, "second"), Some("first"));
    /// ```
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// This is a mutating read: it refreshes the entry's position in the
    /// eviction order. Use [`contains`](Self::contains) to test presence
    /// without touching the order. A missing key is `None`, not an error.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;
}

/// Recency-order operations of an LRU cache.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, LruCacheTrait};
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.put(1, "one");
/// cache.put(2, "two");
/// cache.put(3, "three");
///
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
/// assert!(cache.touch(&1));
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// ```
pub trait LruCacheTrait<K, V>: CoreCache<K, V> {
    /// Peeks at the least recently used entry without changing the order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as most recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found.
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent). O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Vec-backed reference LRU, front = MRU.
    struct MockLru {
        data: Vec<(i32, String)>,
        capacity: usize,
    }

    impl CoreCache<i32, String> for MockLru {
        fn put(&mut self, key: i32, value: String) -> Option<String> {
            if let Some(pos) = self.data.iter().position(|(k, _)| *k == key) {
                let (_, old) = self.data.remove(pos);
                self.data.insert(0, (key, value));
                return Some(old);
            }
            if self.data.len() >= self.capacity {
                self.data.pop();
            }
            self.data.insert(0, (key, value));
            None
        }

        fn get(&mut self, key: &i32) -> Option<&String> {
            let pos = self.data.iter().position(|(k, _)| k == key)?;
            let entry = self.data.remove(pos);
            self.data.insert(0, entry);
            self.data.first().map(|(_, v)| v)
        }

        fn contains(&self, key: &i32) -> bool {
            self.data.iter().any(|(k, _)| k == key)
        }

        fn len(&self) -> usize {
            self.data.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }
    }

    impl LruCacheTrait<i32, String> for MockLru {
        fn peek_lru(&self) -> Option<(&i32, &String)> {
            self.data.last().map(|(k, v)| (k, v))
        }

        fn touch(&mut self, key: &i32) -> bool {
            self.get(key).is_some()
        }

        fn recency_rank(&self, key: &i32) -> Option<usize> {
            self.data.iter().position(|(k, _)| k == key)
        }
    }

    #[test]
    fn test_lru_trait_design() {
        let mut cache = MockLru {
            data: Vec::new(),
            capacity: 2,
        };

        cache.put(1, "first".to_string());
        cache.put(2, "second".to_string());
        assert_eq!(cache.len(), 2);
        assert!(!cache.is_empty());

        assert_eq!(cache.peek_lru(), Some((&1, &"first".to_string())));
        assert!(cache.touch(&1));
        assert_eq!(cache.recency_rank(&1), Some(0));

        cache.put(3, "third".to_string());
        assert!(!cache.contains(&2));
    }

    #[test]
    fn test_core_cache_put_returns_previous_value() {
        let mut cache = MockLru {
            data: Vec::new(),
            capacity: 2,
        };

        assert_eq!(cache.put(1, "first".to_string()), None);
        assert_eq!(cache.put(1, "second".to_string()), Some("first".to_string()));
        assert_eq!(cache.get(&1), Some(&"second".to_string()));
    }
}
