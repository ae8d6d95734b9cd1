use lrukit::ds::SentinelList;
use lrukit::policy::lru::LruCache;

fn main() {
    let mut cache: LruCache<u32, String> = LruCache::new(2);

    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    cache.put(3, "three".to_string());

    println!("contains 2? {}", cache.contains(&2));
    println!("cache: {}", cache);

    let mut list: SentinelList<i32> = (1..=4).collect();
    list.rotate(1).ok();
    println!("rotated: {}", list);
    list.reverse();
    println!("reversed: {}", list);
}

// Expected output:
// hit 1: one
// contains 2? false
// cache: 3: three => 1: one
// rotated: 2 => 3 => 4 => 1
// reversed: 1 => 4 => 3 => 2
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Putting key 3 evicts key 2. The cache prints most to least recent.
