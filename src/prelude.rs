pub use crate::ds::{SentinelList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError, ListError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait};
