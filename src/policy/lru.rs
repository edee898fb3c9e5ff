//! Least Recently Used (LRU) replacement policy.
//!
//! When a new key must be inserted into a full cache, the key requested least
//! recently is evicted. Both lookup and replacement run in O(1), which is why
//! LRU is the policy of choice for line-speed operation. It performs well
//! under temporal locality but is suboptimal under the Independent Reference
//! Model, where LFU does better.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         LruCache<K> Layout                          │
//! │                                                                     │
//! │   map: FxHashMap<K, SlotId>          list: IntrusiveList<K>         │
//! │   ┌──────────┬─────────┐                                            │
//! │   │   Key    │ SlotId  │     top (MRU)                bottom (LRU)  │
//! │   ├──────────┼─────────┤        │                          │        │
//! │   │  "a"     │  id_0   │────┐   ▼                          ▼        │
//! │   │  "b"     │  id_1   │────┼─► [c] ◄──► [a] ◄──► [b] ◄──► [d]     │
//! │   │  "c"     │  id_2   │────┘                                       │
//! │   └──────────┴─────────┘                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The map holds handles into the list's arena, never owning references.
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                                      |
//! |------------|------|--------------------------------------------|
//! | `get`      | O(1) | Hit promotes the key to the top            |
//! | `put`      | O(1) | Present key is promoted; may evict bottom  |
//! | `contains` | O(1) | No reordering                              |
//! | `dump`     | O(n) | Top to bottom                              |
//! | `position` | O(n) | Diagnostic only                            |
//!
//! ## Example Usage
//!
//! ```
//! use cachesim::policy::lru::LruCache;
//! use cachesim::traits::Cache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("a");
//! cache.put("b");
//! cache.get(&"a");
//!
//! // "b" is now least recently used
//! assert_eq!(cache.put("c"), Some("b"));
//! assert_eq!(cache.dump(), vec!["c", "a"]);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError, LookupError};
use crate::policy::check_capacity;
use crate::traits::Cache;

/// LRU cache over keys.
#[derive(Debug, Clone)]
pub struct LruCache<K> {
    map: FxHashMap<K, SlotId>,
    list: IntrusiveList<K>,
    capacity: usize,
}

impl<K> LruCache<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LRU cache holding at most `capacity` keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity("LRU", capacity)?;
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
            capacity,
        })
    }

    /// Returns the most recently used key.
    pub fn peek_mru(&self) -> Option<&K> {
        self.list.top()
    }

    /// Returns the least recently used key, i.e. the next eviction victim.
    pub fn peek_lru(&self) -> Option<&K> {
        self.list.bottom()
    }

    /// Returns the rank of `key` counted from the top (0 = most recent).
    ///
    /// Does not change the recency order. Linear in the cache size.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if `key` is not cached.
    ///
    /// # Example
    ///
    /// ```
    /// use cachesim::policy::lru::LruCache;
    /// use cachesim::traits::Cache;
    ///
    /// let mut cache = LruCache::new(3).unwrap();
    /// cache.put(1);
    /// cache.put(2);
    /// assert_eq!(cache.position(&2), Ok(0));
    /// assert_eq!(cache.position(&1), Ok(1));
    /// assert!(cache.position(&9).is_err());
    /// ```
    pub fn position(&self, key: &K) -> Result<usize, LookupError>
    where
        K: Debug,
    {
        if !self.map.contains_key(key) {
            return Err(LookupError::missing(key));
        }
        self.list
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| LookupError::missing(key))
    }

    /// Checks that the index and the recency list agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: Debug,
    {
        self.list.check_invariants()?;
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "map holds {} keys but list holds {}",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.map {
            match self.list.get(id) {
                Some(k) if k == key => {},
                other => {
                    return Err(InvariantError::new(format!(
                        "key {:?} maps to {:?} holding {:?}",
                        key, id, other
                    )));
                },
            }
        }
        Ok(())
    }
}

impl<K> Cache<K> for LruCache<K>
where
    K: Clone + Eq + Hash + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn get(&mut self, key: &K) -> bool {
        match self.map.get(key) {
            Some(&id) => self.list.raise(id),
            None => false,
        }
    }

    fn put(&mut self, key: K) -> Option<K> {
        // A hit already promoted the key
        if self.get(&key) {
            return None;
        }

        let id = self.list.push_top(key.clone());
        self.map.insert(key, id);

        if self.map.len() <= self.capacity {
            return None;
        }

        let evicted = self.list.pop_bottom()?;
        self.map.remove(&evicted);
        tracing::trace!(policy = "LRU", capacity = self.capacity, "evicted least recently used key");
        Some(evicted)
    }

    fn dump(&self) -> Vec<K> {
        self.list.iter().cloned().collect()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    fn clone_box(&self) -> Box<dyn Cache<K>> {
        Box::new(self.clone())
    }
}
