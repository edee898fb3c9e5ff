//! Unified cache builder for all replacement policies.
//!
//! Maps a [`CachePolicy`] and a capacity to a boxed [`Cache`], so callers
//! that pick the policy at run time hold a single type.
//!
//! ## Example
//!
//! ```rust
//! use cachesim::builder::{CacheBuilder, CachePolicy};
//! use cachesim::traits::Cache;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64>(CachePolicy::Lru).unwrap();
//! cache.put(1);
//! assert!(cache.get(&1));
//! ```

use std::fmt;
use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::null::NullCache;
use crate::policy::random::RandCache;
use crate::traits::Cache;

/// Available cache replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Stores nothing; capacity is always 0.
    Null,
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction, ties to the oldest insertion.
    Lfu,
    /// First In, First Out eviction.
    Fifo,
    /// Uniform random eviction, optionally seeded.
    Rand { seed: Option<u64> },
}

impl CachePolicy {
    /// Returns the conventional short identifier of the policy.
    pub fn name(&self) -> &'static str {
        match self {
            CachePolicy::Null => "NULL",
            CachePolicy::Lru => "LRU",
            CachePolicy::Lfu => "LFU",
            CachePolicy::Fifo => "FIFO",
            CachePolicy::Rand { .. } => "RAND",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// The capacity is ignored for [`CachePolicy::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero for any other policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cachesim::builder::{CacheBuilder, CachePolicy};
    /// use cachesim::traits::Cache;
    ///
    /// let lfu = CacheBuilder::new(10).build::<u32>(CachePolicy::Lfu).unwrap();
    /// assert_eq!(lfu.capacity(), 10);
    ///
    /// let null = CacheBuilder::new(10).build::<u32>(CachePolicy::Null).unwrap();
    /// assert_eq!(null.capacity(), 0);
    ///
    /// assert!(CacheBuilder::new(0).build::<u32>(CachePolicy::Fifo).is_err());
    /// ```
    pub fn build<K>(self, policy: CachePolicy) -> Result<Box<dyn Cache<K>>, ConfigError>
    where
        K: Clone + Eq + Hash + 'static,
    {
        let cache: Box<dyn Cache<K>> = match policy {
            CachePolicy::Null => Box::new(NullCache::with_capacity(self.capacity)),
            CachePolicy::Lru => Box::new(LruCache::new(self.capacity)?),
            CachePolicy::Lfu => Box::new(LfuCache::new(self.capacity)?),
            CachePolicy::Fifo => Box::new(FifoCache::new(self.capacity)?),
            CachePolicy::Rand { seed: Some(seed) } => {
                Box::new(RandCache::with_seed(self.capacity, seed)?)
            },
            CachePolicy::Rand { seed: None } => Box::new(RandCache::new(self.capacity)?),
        };
        Ok(cache)
    }
}
