#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// The first byte picks the capacity; the rest is (op, key) pairs over a
// small key space so hits, updates and evictions all occur.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);

    for (step, pair) in rest.chunks_exact(2).enumerate() {
        let key = pair[1] % 32;
        match pair[0] % 5 {
            0 => {
                let was_full = cache.len() == capacity;
                let existed = cache.contains(&key);
                let lru = cache.peek_lru().map(|(k, _)| *k);
                cache.put(key, step as u32);
                assert_eq!(cache.recency_rank(&key), Some(0));
                if was_full && !existed {
                    // exactly the LRU entry goes
                    assert!(!cache.contains(&lru.unwrap()));
                    assert_eq!(cache.len(), capacity);
                }
            }
            1 => {
                if cache.get(&key).is_some() {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            }
            2 => {
                let rank = cache.recency_rank(&key);
                let _ = cache.peek(&key);
                assert_eq!(cache.recency_rank(&key), rank);
            }
            3 => {
                assert_eq!(cache.touch(&key), cache.contains(&key));
            }
            4 => {
                let n = cache.iter().count();
                assert_eq!(n, cache.len());
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }
});
