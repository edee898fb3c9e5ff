//! Least Frequently Used (LFU) replacement policy.
//!
//! Each cached key carries a hit counter and the sequence number it was
//! inserted with. When the cache overflows, the key with the smallest
//! `(frequency, sequence)` pair is evicted: the least requested key, ties
//! going to the oldest insertion.
//!
//! LFU is optimal under the Independent Reference Model but cannot do both
//! lookup and replacement in O(1); eviction here scans all entries.
//!
//! ## Architecture
//!
//! ```text
//!   entries: FxHashMap<K, Entry>          next_seq: u64
//!   ┌──────┬─────────────────────┐
//!   │ Key  │ Entry { freq, seq } │        victim = min (freq, seq)
//!   ├──────┼─────────────────────┤
//!   │ "a"  │ { 2, 1 }            │        dump   = descending (freq, seq)
//!   │ "b"  │ { 1, 2 }  ◄── victim│
//!   │ "c"  │ { 1, 3 }            │
//!   └──────┴─────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time       | Notes                                  |
//! |------------|------------|----------------------------------------|
//! | `get`      | O(1)       | Hit increments frequency               |
//! | `put`      | O(1) / O(n)| O(n) scan only when an eviction occurs |
//! | `contains` | O(1)       | No counter update                      |
//! | `dump`     | O(n log n) | Sorted most valuable first             |
//!
//! ## Example Usage
//!
//! ```
//! use cachesim::policy::lfu::LfuCache;
//! use cachesim::traits::Cache;
//!
//! let mut cache = LfuCache::new(2).unwrap();
//! cache.put("a");
//! cache.put("b");
//! cache.get(&"a");
//!
//! // "b" has the lower frequency
//! assert_eq!(cache.put("c"), Some("b"));
//! assert_eq!(cache.dump(), vec!["a", "c"]);
//! ```

use std::cmp::Reverse;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError};
use crate::policy::check_capacity;
use crate::traits::Cache;

/// Per-key ranking data. Field order makes the derived `Ord` compare
/// frequency first, then insertion sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    freq: u64,
    seq: u64,
}

/// LFU cache over keys.
#[derive(Debug, Clone)]
pub struct LfuCache<K> {
    entries: FxHashMap<K, Entry>,
    next_seq: u64,
    capacity: usize,
}

impl<K> LfuCache<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LFU cache holding at most `capacity` keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity("LFU", capacity)?;
        Ok(Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity + 1, Default::default()),
            next_seq: 0,
            capacity,
        })
    }

    /// Returns the hit count of `key`, or `None` if it is not cached.
    ///
    /// A freshly inserted key has frequency 1.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.freq)
    }

    fn victim(&self) -> Option<K> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| **entry)
            .map(|(key, _)| key.clone())
    }

    /// Checks frequencies, sequence uniqueness and the capacity bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: Debug,
    {
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        let mut seqs: Vec<u64> = Vec::with_capacity(self.entries.len());
        for (key, entry) in &self.entries {
            if entry.freq == 0 {
                return Err(InvariantError::new(format!("key {:?} has zero frequency", key)));
            }
            if entry.seq == 0 || entry.seq > self.next_seq {
                return Err(InvariantError::new(format!(
                    "key {:?} has sequence {} outside 1..={}",
                    key, entry.seq, self.next_seq
                )));
            }
            seqs.push(entry.seq);
        }
        seqs.sort_unstable();
        if seqs.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(InvariantError::new("duplicate insertion sequence numbers"));
        }
        Ok(())
    }
}

impl<K> Cache<K> for LfuCache<K>
where
    K: Clone + Eq + Hash + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    fn get(&mut self, key: &K) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.freq += 1;
                true
            },
            None => false,
        }
    }

    /// Inserting a cached key is a no-op: it does not bump its frequency.
    fn put(&mut self, key: K) -> Option<K> {
        if self.entries.contains_key(&key) {
            return None;
        }

        self.next_seq += 1;
        self.entries.insert(
            key,
            Entry {
                freq: 1,
                seq: self.next_seq,
            },
        );

        if self.entries.len() <= self.capacity {
            return None;
        }

        let evicted = self.victim()?;
        self.entries.remove(&evicted);
        tracing::trace!(policy = "LFU", capacity = self.capacity, "evicted least frequently used key");
        Some(evicted)
    }

    fn dump(&self) -> Vec<K> {
        let mut ranked: Vec<(&K, Entry)> = self.entries.iter().map(|(k, e)| (k, *e)).collect();
        ranked.sort_unstable_by_key(|(_, entry)| Reverse(*entry));
        ranked.into_iter().map(|(key, _)| key.clone()).collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.next_seq = 0;
    }

    fn clone_box(&self) -> Box<dyn Cache<K>> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Basic LFU Behavior Tests
    mod basic_behavior {
        use super::*;

        #[test]
        fn test_zero_capacity_is_rejected() {
            assert!(LfuCache::<u32>::new(0).is_err());
        }

        #[test]
        fn test_frequency_starts_at_one_and_increments_on_get() {
            let mut cache = LfuCache::new(3).unwrap();
            cache.put("key1");
            assert_eq!(cache.frequency(&"key1"), Some(1));

            assert!(cache.get(&"key1"));
            assert!(cache.get(&"key1"));
            assert_eq!(cache.frequency(&"key1"), Some(3));

            assert!(!cache.get(&"missing"));
            assert_eq!(cache.frequency(&"missing"), None);
        }

        #[test]
        fn test_put_existing_does_not_bump_frequency() {
            let mut cache = LfuCache::new(3).unwrap();
            cache.put(1);
            assert_eq!(cache.put(1), None);
            assert_eq!(cache.frequency(&1), Some(1));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn test_contains_does_not_bump_frequency() {
            let mut cache = LfuCache::new(3).unwrap();
            cache.put(1);
            assert!(cache.contains(&1));
            assert_eq!(cache.frequency(&1), Some(1));
        }
    }

    // Eviction Order Tests
    mod eviction_order {
        use super::*;

        #[test]
        fn test_evicts_lower_frequency() {
            let mut cache = LfuCache::new(2).unwrap();
            assert_eq!(cache.put("A"), None);
            assert_eq!(cache.put("B"), None);
            assert!(cache.get(&"A"));
            assert_eq!(cache.put("C"), Some("B"));
            assert_eq!(cache.dump(), vec!["A", "C"]);
        }

        #[test]
        fn test_ties_evict_oldest_insertion() {
            let mut cache = LfuCache::new(3).unwrap();
            cache.put(10);
            cache.put(20);
            cache.put(30);
            // All at frequency 1: the first inserted goes
            assert_eq!(cache.put(40), Some(10));
            // 20 is now the oldest among frequency-1 keys
            assert_eq!(cache.put(50), Some(20));
        }

        #[test]
        fn test_new_key_can_be_its_own_victim() {
            let mut cache = LfuCache::new(2).unwrap();
            cache.put(1);
            cache.put(2);
            cache.get(&1);
            cache.get(&2);
            // Both residents have frequency 2; the newcomer has frequency 1
            assert_eq!(cache.put(3), Some(3));
            assert!(!cache.contains(&3));
            assert_eq!(cache.len(), 2);
        }

        #[test]
        fn test_frequency_outranks_age() {
            let mut cache = LfuCache::new(3).unwrap();
            cache.put("old");
            cache.put("mid");
            cache.put("new");
            cache.get(&"old");
            cache.get(&"old");
            cache.get(&"new");
            assert_eq!(cache.put("x"), Some("mid"));
        }
    }

    // Dump / Clear Tests
    mod dump_and_clear {
        use super::*;

        #[test]
        fn test_dump_orders_by_descending_frequency_then_sequence() {
            let mut cache = LfuCache::new(4).unwrap();
            cache.put('a');
            cache.put('b');
            cache.put('c');
            cache.put('d');
            cache.get(&'b');
            cache.get(&'b');
            cache.get(&'a');
            // b:(3,2) a:(2,1) d:(1,4) c:(1,3)
            assert_eq!(cache.dump(), vec!['b', 'a', 'd', 'c']);
        }

        #[test]
        fn test_clear_resets_sequence_counter() {
            let mut cache = LfuCache::new(2).unwrap();
            cache.put(1);
            cache.put(2);
            cache.clear();
            assert!(cache.is_empty());
            cache.put(3);
            assert_eq!(cache.next_seq, 1);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_clone_keeps_counters() {
            let mut cache = LfuCache::new(2).unwrap();
            cache.put(1);
            cache.get(&1);
            let mut copy = cache.clone();
            copy.get(&1);
            assert_eq!(cache.frequency(&1), Some(2));
            assert_eq!(copy.frequency(&1), Some(3));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// len() never exceeds capacity and invariants hold after every op.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_invariants_after_ops(
                capacity in 1usize..20,
                ops in prop::collection::vec((any::<bool>(), 0u32..40), 0..200)
            ) {
                let mut cache = LfuCache::new(capacity).unwrap();
                for (is_put, key) in ops {
                    if is_put {
                        cache.put(key);
                    } else {
                        cache.get(&key);
                    }
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                }
            }

            /// The evicted key always held the minimum (frequency, sequence).
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_eviction_removes_minimum(
                capacity in 1usize..10,
                ops in prop::collection::vec((any::<bool>(), 0u32..20), 0..200)
            ) {
                let mut cache = LfuCache::new(capacity).unwrap();
                for (is_put, key) in ops {
                    if !is_put {
                        let before = cache.frequency(&key);
                        cache.get(&key);
                        if let Some(freq) = before {
                            prop_assert_eq!(cache.frequency(&key), Some(freq + 1));
                        }
                        continue;
                    }
                    let snapshot = cache.entries.clone();
                    if let Some(evicted) = cache.put(key) {
                        let newcomer = Entry { freq: 1, seq: cache.next_seq };
                        let min = snapshot.values().copied().min().map_or(newcomer, |m| m.min(newcomer));
                        let evicted_entry = snapshot.get(&evicted).copied().unwrap_or(newcomer);
                        prop_assert_eq!(evicted_entry, min);
                    }
                }
            }
        }
    }
}
