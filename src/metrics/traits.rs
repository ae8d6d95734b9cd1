//! # Metrics Traits
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │   &mut self: get/insert/evict counters
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │     LruMetricsRecorder      │   &mut self: touch
//!   └─────────────────────────────┘
//!
//!   ┌─────────────────────────────┐
//!   │   LruMetricsReadRecorder    │   &self: peek / peek_lru / recency_rank
//!   └─────────────────────────────┘
//!
//!   ┌─────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>  │   consumers read plain snapshots
//!   └─────────────────────────────┘
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only LRU metrics for &self methods (uses interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Produces a point-in-time snapshot of counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
