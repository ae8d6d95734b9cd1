//! Operation counters for the LRU cache (feature `metrics`).
//!
//! Recording, snapshotting and reading are split into small traits so the
//! cache only ever writes counters and callers only ever read snapshots.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::LruMetrics;
pub use snapshot::LruMetricsSnapshot;
pub use traits::MetricsSnapshotProvider;
