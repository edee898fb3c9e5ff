//! First In, First Out (FIFO) replacement policy.
//!
//! The evicted key is always the one inserted earliest. FIFO differs from LRU
//! only on hits: a requested key is never moved, so hits do not protect it
//! from eviction. Simpler than LRU, usually with a lower hit ratio.
//!
//! ## Architecture
//!
//! ```text
//!   members: FxHashSet<K>        queue: VecDeque<K>
//!
//!     oldest                              newest
//!       │                                   │
//!       ▼                                   ▼
//!     [ A ] ─ [ B ] ─ [ C ] ─ [ D ] ─ [ E ]
//!       ▲                                   ▲
//!   pop_front on eviction             push_back on insert
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                           |
//! |------------|------|---------------------------------|
//! | `get`      | O(1) | Membership only, never reorders |
//! | `put`      | O(1) | Present key: no-op              |
//! | `dump`     | O(n) | Newest first                    |
//! | `position` | O(n) | Diagnostic, 0 = newest          |

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::error::{ConfigError, InvariantError, LookupError};
use crate::policy::check_capacity;
use crate::traits::Cache;

/// FIFO cache over keys.
///
/// # Example
///
/// ```
/// use cachesim::policy::fifo::FifoCache;
/// use cachesim::traits::Cache;
///
/// let mut cache = FifoCache::new(2).unwrap();
/// cache.put("A");
/// cache.put("B");
/// cache.get(&"A"); // does not protect "A"
///
/// assert_eq!(cache.put("C"), Some("A"));
/// assert_eq!(cache.dump(), vec!["C", "B"]);
/// ```
#[derive(Debug, Clone)]
pub struct FifoCache<K> {
    members: FxHashSet<K>,
    queue: VecDeque<K>,
    capacity: usize,
}

impl<K> FifoCache<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates a FIFO cache holding at most `capacity` keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity("FIFO", capacity)?;
        Ok(Self {
            members: FxHashSet::with_capacity_and_hasher(capacity + 1, Default::default()),
            queue: VecDeque::with_capacity(capacity + 1),
            capacity,
        })
    }

    /// Returns the oldest key, i.e. the next eviction victim.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.queue.front()
    }

    /// Returns the rank of `key` counted from the newest insertion (0 = newest).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if `key` is not cached.
    pub fn position(&self, key: &K) -> Result<usize, LookupError>
    where
        K: Debug,
    {
        self.queue
            .iter()
            .rev()
            .position(|k| k == key)
            .ok_or_else(|| LookupError::missing(key))
    }

    /// Checks that the membership set and the queue hold the same keys.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: Debug,
    {
        if self.members.len() != self.queue.len() {
            return Err(InvariantError::new(format!(
                "set holds {} keys but queue holds {}",
                self.members.len(),
                self.queue.len()
            )));
        }
        if self.queue.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.queue.len(),
                self.capacity
            )));
        }
        if let Some(stray) = self.queue.iter().find(|k| !self.members.contains(*k)) {
            return Err(InvariantError::new(format!(
                "queued key {:?} missing from membership set",
                stray
            )));
        }
        Ok(())
    }
}

impl<K> Cache<K> for FifoCache<K>
where
    K: Clone + Eq + Hash + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    #[inline]
    fn get(&mut self, key: &K) -> bool {
        self.members.contains(key)
    }

    fn put(&mut self, key: K) -> Option<K> {
        if self.members.contains(&key) {
            return None;
        }
        self.members.insert(key.clone());
        self.queue.push_back(key);

        if self.members.len() <= self.capacity {
            return None;
        }

        let evicted = self.queue.pop_front()?;
        self.members.remove(&evicted);
        tracing::trace!(policy = "FIFO", capacity = self.capacity, "evicted oldest key");
        Some(evicted)
    }

    fn dump(&self) -> Vec<K> {
        self.queue.iter().rev().cloned().collect()
    }

    fn clear(&mut self) {
        self.members.clear();
        self.queue.clear();
    }

    fn clone_box(&self) -> Box<dyn Cache<K>> {
        Box::new(self.clone())
    }
}
