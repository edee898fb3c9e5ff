//! Null cache: stores nothing.
//!
//! Behaves like a cache of capacity zero. Useful as the "no caching" arm of
//! a simulation without special-casing the caller.

use std::marker::PhantomData;

use crate::traits::Cache;

/// A cache that never stores anything.
///
/// # Example
///
/// ```
/// use cachesim::policy::null::NullCache;
/// use cachesim::traits::Cache;
///
/// let mut cache = NullCache::new();
/// assert_eq!(cache.put("a"), None);
/// assert!(!cache.get(&"a"));
/// assert_eq!(cache.capacity(), 0);
/// ```
#[derive(Debug)]
pub struct NullCache<K> {
    _marker: PhantomData<fn(K)>,
}

impl<K> NullCache<K> {
    /// Creates a null cache.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Creates a null cache, ignoring the requested capacity.
    pub fn with_capacity(_capacity: usize) -> Self {
        Self::new()
    }
}

impl<K> Default for NullCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for NullCache<K> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<K: 'static> Cache<K> for NullCache<K> {
    #[inline]
    fn len(&self) -> usize {
        0
    }

    #[inline]
    fn capacity(&self) -> usize {
        0
    }

    #[inline]
    fn contains(&self, _key: &K) -> bool {
        false
    }

    #[inline]
    fn get(&mut self, _key: &K) -> bool {
        false
    }

    #[inline]
    fn put(&mut self, _key: K) -> Option<K> {
        None
    }

    fn dump(&self) -> Vec<K> {
        Vec::new()
    }

    fn clear(&mut self) {}

    fn clone_box(&self) -> Box<dyn Cache<K>> {
        Box::new(self.clone())
    }
}
