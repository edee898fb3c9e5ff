//! Key-value caching on top of any key-only policy.
//!
//! [`KeyValCache`] keeps the policy's eviction decisions and stores a value
//! next to every resident key. The value map always mirrors the inner
//! cache's key set: whenever the policy evicts a key (or declines to store
//! one), its value is dropped as well.
//!
//! ```text
//!   put(k, v):
//!     values[k] = v
//!     evicted = inner.put(k)
//!     evicted == Some(e)  ──► return (e, values.remove(e))
//!     k not resident      ──► values.remove(k)
//! ```

use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError};
use crate::traits::Cache;

/// Cache wrapper that associates a value with every cached key.
///
/// # Example
///
/// ```
/// use cachesim::policy::lru::LruCache;
/// use cachesim::wrapper::keyval::KeyValCache;
///
/// let lru = LruCache::new(2).unwrap();
/// let mut cache = KeyValCache::new(&lru).unwrap();
///
/// cache.put("a", 1);
/// cache.put("b", 2);
/// assert_eq!(cache.get(&"a"), Some(&1));
///
/// // "b" is least recently used
/// assert_eq!(cache.put("c", 3), Some(("b", 2)));
/// assert_eq!(cache.dump(), vec![("c", 3), ("a", 1)]);
/// ```
pub struct KeyValCache<K, V> {
    inner: Box<dyn Cache<K>>,
    values: FxHashMap<K, V>,
}

impl<K, V> KeyValCache<K, V>
where
    K: Clone + Eq + Hash + 'static,
{
    /// Wraps an independent copy of `cache`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `cache` already holds keys: they would
    /// have no values to pair with.
    pub fn new<C>(cache: &C) -> Result<Self, ConfigError>
    where
        C: Cache<K> + ?Sized,
    {
        Self::from_boxed(cache.clone_box())
    }

    /// Wraps an already boxed cache, taking ownership without copying.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `inner` is not empty.
    pub fn from_boxed(inner: Box<dyn Cache<K>>) -> Result<Self, ConfigError> {
        if !inner.is_empty() {
            tracing::debug!(len = inner.len(), "rejected non-empty cache for key-value wrapping");
            return Err(ConfigError::NonEmptyInner { len: inner.len() });
        }
        let values = FxHashMap::with_capacity_and_hasher(inner.capacity(), Default::default());
        Ok(Self { inner, values })
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no entries are cached.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the capacity of the inner cache.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Checks whether `key` is cached without touching policy state.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    /// Returns the value for `key` without touching policy state.
    pub fn peek(&self, key: &K) -> Option<&V> {
        if self.inner.contains(key) {
            self.values.get(key)
        } else {
            None
        }
    }

    /// Looks up `key` through the policy and returns its value on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.inner.get(key) {
            self.values.get(key)
        } else {
            None
        }
    }

    /// Stores `value` under `key` and inserts `key` into the inner cache.
    ///
    /// An existing value for `key` is overwritten. Returns the evicted key
    /// and its value when the policy made room.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.values.insert(key.clone(), value);
        let evicted = self
            .inner
            .put(key.clone())
            .and_then(|evicted| self.values.remove(&evicted).map(|value| (evicted, value)));

        // The policy may decline the key (null cache, dropped insertion,
        // LFU evicting the newcomer); its value must not linger.
        if !self.inner.contains(&key) {
            self.values.remove(&key);
        }
        evicted
    }

    /// Returns the cached `(key, value)` pairs in the inner policy's order.
    pub fn dump(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .dump()
            .into_iter()
            .filter_map(|key| self.values.get(&key).cloned().map(|value| (key, value)))
            .collect()
    }

    /// Empties both the inner cache and the value map.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.values.clear();
    }

    /// Returns the wrapped cache.
    pub fn inner(&self) -> &dyn Cache<K> {
        self.inner.as_ref()
    }

    /// Checks that the value map holds exactly the inner cache's keys.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: Debug,
    {
        let keys = self.inner.dump();
        if keys.len() != self.values.len() {
            return Err(InvariantError::new(format!(
                "inner cache holds {} keys but value map holds {}",
                keys.len(),
                self.values.len()
            )));
        }
        if let Some(key) = keys.iter().find(|k| !self.values.contains_key(*k)) {
            return Err(InvariantError::new(format!("key {:?} has no stored value", key)));
        }
        Ok(())
    }
}

impl<K, V> Clone for KeyValCache<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_box(),
            values: self.values.clone(),
        }
    }
}

impl<K, V> fmt::Debug for KeyValCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValCache")
            .field("len", &self.inner.len())
            .field("capacity", &self.inner.capacity())
            .finish_non_exhaustive()
    }
}
