pub mod sentinel_list;
pub mod slot_arena;

pub use sentinel_list::{IdIter, Iter, SentinelList};
pub use slot_arena::{SlotArena, SlotId};
