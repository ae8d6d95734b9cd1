//! Error types for the lrukit library.
//!
//! ## Key Components
//!
//! - [`ListError`]: Returned by fallible [`SentinelList`](crate::ds::SentinelList)
//!   operations (popping an empty list, missing values, bad handles).
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. zero capacity).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   links or bookkeeping disagree.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::ds::SentinelList;
//! use lrukit::error::{ConfigError, ListError};
//! use lrukit::policy::lru::LruCache;
//!
//! let mut list: SentinelList<i32> = SentinelList::new();
//! assert_eq!(list.pop_back(), Err(ListError::Empty));
//!
//! let bad: Result<LruCache<u32, u32>, ConfigError> = LruCache::try_new(0);
//! assert!(bad.is_err());
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// ListError
// ---------------------------------------------------------------------------

/// Error returned by fallible list operations.
///
/// A failed call never leaves the list partially relinked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The list holds no data nodes.
    #[error("list is empty")]
    Empty,
    /// No element matched the requested value (within the requested range).
    #[error("value not found in list")]
    NotFound,
    /// The call was made with an argument the list cannot act on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ListError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LruCache::try_new`](crate::policy::lru::LruCache::try_new).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by [`SentinelList::check_invariants`](crate::ds::SentinelList::check_invariants)
/// and [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ListError --------------------------------------------------------

    #[test]
    fn list_error_display() {
        assert_eq!(ListError::Empty.to_string(), "list is empty");
        assert_eq!(ListError::NotFound.to_string(), "value not found in list");
        assert_eq!(
            ListError::invalid("rotate on empty list").to_string(),
            "invalid argument: rotate on empty list"
        );
    }

    #[test]
    fn list_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ListError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
        assert_eq!(err.message(), "capacity must be > 0");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("length mismatch");
        assert_eq!(err.to_string(), "length mismatch");
        assert!(format!("{:?}", err).contains("length mismatch"));
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
