//! Error types.
//!
//! Construction problems surface as [`ConfigError`], diagnostic lookups of
//! absent keys as [`LookupError`], and failed self-checks as
//! [`InvariantError`]. Nothing in the cache API panics on bad input.
//!
//! ```
//! use cachesim::error::ConfigError;
//! use cachesim::policy::lru::LruCache;
//!
//! let err = LruCache::<u32>::new(0).unwrap_err();
//! assert_eq!(err, ConfigError::ZeroCapacity { policy: "LRU" });
//! ```

use thiserror::Error;

/// Invalid parameters passed to a cache or wrapper constructor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Every policy except the null cache needs room for at least one key.
    #[error("{policy} cache capacity must be greater than zero")]
    ZeroCapacity { policy: &'static str },

    /// Insertion probability was NaN or outside `[0, 1]`.
    #[error("insertion probability must be in [0.0, 1.0], got {0}")]
    InvalidProbability(f64),

    /// A key-value wrapper was given a cache that already holds keys.
    #[error("cannot attach values to a cache already holding {len} keys")]
    NonEmptyInner { len: usize },
}

/// A diagnostic lookup targeted a key that is not cached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key {key} is not in the cache")]
pub struct LookupError {
    key: String,
}

impl LookupError {
    pub fn missing<K: std::fmt::Debug>(key: &K) -> Self {
        Self {
            key: format!("{:?}", key),
        }
    }

    /// `Debug` rendering of the key that was looked up.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Internal bookkeeping disagreed with itself; reported by `check_invariants`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cache invariant violated: {0}")]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Describes which invariant failed.
    pub fn detail(&self) -> &str {
        &self.0
    }
}
