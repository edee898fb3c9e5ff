//! Random replacement policy.
//!
//! When a new key arrives at a full cache, the victim is drawn uniformly at
//! random from the current occupants. Hit ratios are generally poor; the
//! policy exists as a baseline.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        RandCache<K> Layout                          │
//! │                                                                     │
//! │   members: FxHashSet<K>        slots: Vec<K>  (len ≤ capacity)      │
//! │                                                                     │
//! │                                ┌─────┬─────┬─────┬─────┐            │
//! │                                │  0  │  1  │  2  │  3  │            │
//! │                                ├─────┼─────┼─────┼─────┤            │
//! │                                │ p1  │ p2  │ p3  │ p4  │            │
//! │                                └─────┴─────┴─────┴─────┘            │
//! │                                                                     │
//! │   rng: SmallRng (owned, optionally seeded)                          │
//! └─────────────────────────────────────────────────────────────────────┘
//!
//!   put(k), not full:  slots.push(k)
//!   put(k), full:      i = rng in [0, capacity); victim = slots[i]; slots[i] = k
//! ```
//!
//! Every occupant sits in exactly one slot, so drawing a slot index gives an
//! exactly uniform victim in O(1).
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                           |
//! |------------|------|---------------------------------|
//! | `get`      | O(1) | Membership only                 |
//! | `put`      | O(1) | One RNG draw when full          |
//! | `dump`     | O(n) | Slot order, not meaningful      |
//!
//! ## Reproducibility
//!
//! Each cache owns its generator. Use [`RandCache::with_seed`] for
//! repeatable runs; cloning a cache clones the generator state too.

use std::fmt::Debug;
use std::hash::Hash;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::error::{ConfigError, InvariantError};
use crate::policy::check_capacity;
use crate::traits::Cache;

/// Random eviction cache over keys.
///
/// # Example
///
/// ```
/// use cachesim::policy::random::RandCache;
/// use cachesim::traits::Cache;
///
/// let mut cache = RandCache::with_seed(3, 7).unwrap();
/// for key in 0..3 {
///     assert_eq!(cache.put(key), None);
/// }
///
/// // Full: some resident key makes room
/// let evicted = cache.put(3).unwrap();
/// assert!(evicted < 3);
/// assert_eq!(cache.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RandCache<K> {
    members: FxHashSet<K>,
    slots: Vec<K>,
    capacity: usize,
    rng: SmallRng,
}

impl<K> RandCache<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates a random eviction cache seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_rng(capacity, SmallRng::from_os_rng())
    }

    /// Creates a random eviction cache with a fixed seed.
    ///
    /// Two caches built with the same seed and fed the same keys evict the
    /// same victims.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn with_seed(capacity: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(capacity, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, rng: SmallRng) -> Result<Self, ConfigError> {
        check_capacity("RAND", capacity)?;
        Ok(Self {
            members: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            slots: Vec::with_capacity(capacity),
            capacity,
            rng,
        })
    }

    /// Checks that the occupied slots hold exactly the member keys.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: Debug,
    {
        if self.slots.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} occupied slots exceed capacity {}",
                self.slots.len(),
                self.capacity
            )));
        }
        if self.members.len() != self.slots.len() {
            return Err(InvariantError::new(format!(
                "set holds {} keys but {} slots are occupied",
                self.members.len(),
                self.slots.len()
            )));
        }
        // Equal sizes plus every slot being a member rules out duplicates
        if let Some(stray) = self.slots.iter().find(|k| !self.members.contains(*k)) {
            return Err(InvariantError::new(format!(
                "slot key {:?} missing from membership set",
                stray
            )));
        }
        Ok(())
    }
}

impl<K> Cache<K> for RandCache<K>
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

        if self.slots.len() < self.capacity {
            self.slots.push(key);
            return None;
        }

        let idx = self.rng.random_range(0..self.capacity);
        let evicted = std::mem::replace(&mut self.slots[idx], key);
        self.members.remove(&evicted);
        tracing::trace!(policy = "RAND", slot = idx, capacity = self.capacity, "evicted random key");
        Some(evicted)
    }

    fn dump(&self) -> Vec<K> {
        self.slots.clone()
    }

    /// Empties the cache. The generator is not reseeded.
    fn clear(&mut self) {
        self.members.clear();
        self.slots.clear();
    }

    fn clone_box(&self) -> Box<dyn Cache<K>> {
        Box::new(self.clone())
    }
}
