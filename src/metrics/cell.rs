use std::cell::Cell;

/// Counter that can be bumped through `&self`.
///
/// Lets read-only cache methods (`peek`, `peek_lru`, `recency_rank`) record
/// calls without taking `&mut self`. The cache is single-threaded, so the
/// cell is deliberately neither `Sync` nor shared across threads.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}
