//! # Cache Trait
//!
//! Every replacement policy and every wrapper in this crate implements
//! [`Cache`], so a simulator can hold "some cache" without knowing which
//! policy sits behind it.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌─────────────────────────────────────────┐
//!                 │               Cache<K>                  │
//!                 │                                         │
//!                 │  len(&) → usize                         │
//!                 │  capacity(&) → usize                    │
//!                 │  contains(&, &K) → bool    (pure)       │
//!                 │  get(&mut, &K) → bool      (may touch)  │
//!                 │  put(&mut, K) → Option<K>  (evicted)    │
//!                 │  dump(&) → Vec<K>                       │
//!                 │  clear(&mut)                            │
//!                 │  clone_box(&) → Box<dyn Cache<K>>       │
//!                 └──────────────────┬──────────────────────┘
//!                                    │
//!     ┌──────────┬──────────┬────────┴─┬──────────┬─────────────────┐
//!     ▼          ▼          ▼          ▼          ▼                 ▼
//!  NullCache  LruCache   LfuCache  FifoCache  RandCache   RandInsertCache
//!                                                         (wraps Box<dyn Cache>)
//! ```
//!
//! `KeyValCache` also wraps a `Box<dyn Cache<K>>` but exposes a value-carrying
//! API of its own instead of implementing [`Cache`].
//!
//! ## Cloning
//!
//! Wrappers take an independent copy of the cache they wrap. The copy is made
//! through [`Cache::clone_box`], which works through a trait object, so a
//! `Box<dyn Cache<K>>` is itself `Clone`.
//!
//! ## Thread Safety
//!
//! No implementation is thread-safe. Serialize access externally or give
//! each worker its own instance.

/// Operations shared by all cache replacement policies.
///
/// # Example
///
/// ```
/// use cachesim::traits::Cache;
/// use cachesim::policy::lru::LruCache;
///
/// fn warm<C: Cache<u64> + ?Sized>(cache: &mut C, keys: &[u64]) {
///     for &key in keys {
///         cache.put(key);
///     }
/// }
///
/// let mut cache = LruCache::new(2).unwrap();
/// warm(&mut cache, &[1, 2, 3]);
/// assert_eq!(cache.len(), 2);
/// assert_eq!(cache.dump(), vec![3, 2]);
/// ```
pub trait Cache<K> {
    /// Returns the number of keys currently cached.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of keys the cache can hold.
    fn capacity(&self) -> usize;

    /// Checks if a key is cached without updating any policy state.
    ///
    /// Unlike [`get`](Self::get), this never reorders entries or bumps
    /// counters.
    fn contains(&self, key: &K) -> bool;

    /// Looks up a key, returning `true` on a hit.
    ///
    /// Depending on the policy a hit may update internal state (promotion
    /// for LRU, frequency increment for LFU).
    fn get(&mut self, key: &K) -> bool;

    /// Inserts a key if it is not already cached.
    ///
    /// Returns the evicted key when the insertion pushed the cache over
    /// capacity, `None` otherwise. Re-inserting a cached key never evicts
    /// but may update policy state.
    fn put(&mut self, key: K) -> Option<K>;

    /// Returns every cached key, ordered according to the policy.
    fn dump(&self) -> Vec<K>;

    /// Removes all keys and resets per-instance counters.
    fn clear(&mut self);

    /// Returns an independent boxed copy of this cache, full state included.
    fn clone_box(&self) -> Box<dyn Cache<K>>;
}

impl<K> Cache<K> for Box<dyn Cache<K>> {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        (**self).contains(key)
    }

    #[inline]
    fn get(&mut self, key: &K) -> bool {
        (**self).get(key)
    }

    #[inline]
    fn put(&mut self, key: K) -> Option<K> {
        (**self).put(key)
    }

    fn dump(&self) -> Vec<K> {
        (**self).dump()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn clone_box(&self) -> Box<dyn Cache<K>> {
        (**self).clone_box()
    }
}

impl<K> Clone for Box<dyn Cache<K>> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}
