//! lrukit: an arena-backed sentinel linked list and an O(1) LRU cache built on it.
//!
//! - [`ds::SentinelList`]: doubly linked list with permanent head/tail
//!   sentinels, addressed by generational [`ds::SlotId`] handles.
//! - [`policy::lru::LruCache`]: bounded key-value cache pairing a key index
//!   with a `SentinelList` recency order.
//!
//! The cache keeps its map and list in one-to-one correspondence and never
//! holds more than `capacity` entries; the list's front is the most recently
//! used entry. Both types expose `check_invariants` for tests and fuzzing.
//! The per-module docs in [`ds::sentinel_list`] and [`policy::lru`] describe
//! the node layout and the operation flows.

pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
