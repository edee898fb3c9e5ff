//! Probabilistic insertion.
//!
//! [`RandInsertCache`] forwards every operation to the wrapped cache except
//! `put`, which is admitted only with probability `p`. A rejected insertion
//! leaves the inner cache untouched and reports no eviction.
//!
//! ```text
//!   put(k) ──► draw u ∈ [0, 1) ──┬── u < p ──► inner.put(k) ──► evicted?
//!                                └── u ≥ p ──► None (dropped)
//! ```
//!
//! With `p = 0` nothing is ever inserted; with `p = 1` every draw admits and
//! the wrapper behaves exactly like the inner cache.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::ConfigError;
use crate::traits::Cache;

/// Cache wrapper that admits insertions with a fixed probability.
///
/// # Example
///
/// ```
/// use cachesim::policy::lru::LruCache;
/// use cachesim::traits::Cache;
/// use cachesim::wrapper::rand_insert::RandInsertCache;
///
/// let lru = LruCache::new(10).unwrap();
/// let mut cache = RandInsertCache::new(&lru, 0.0, Some(1)).unwrap();
///
/// for key in 0..100 {
///     assert_eq!(cache.put(key), None);
/// }
/// assert!(cache.is_empty());
/// ```
pub struct RandInsertCache<K> {
    inner: Box<dyn Cache<K>>,
    p: f64,
    rng: SmallRng,
}

impl<K: 'static> RandInsertCache<K> {
    /// Wraps an independent copy of `cache`, admitting insertions with
    /// probability `p`.
    ///
    /// With `seed` set the admission draws are reproducible; otherwise the
    /// generator is seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `p` is not a number in `[0, 1]`.
    pub fn new<C>(cache: &C, p: f64, seed: Option<u64>) -> Result<Self, ConfigError>
    where
        C: Cache<K> + ?Sized,
    {
        Self::from_boxed(cache.clone_box(), p, seed)
    }

    /// Wraps an already boxed cache, taking ownership without copying.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `p` is not a number in `[0, 1]`.
    pub fn from_boxed(
        inner: Box<dyn Cache<K>>,
        p: f64,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            tracing::debug!(p, "rejected insertion probability");
            return Err(ConfigError::InvalidProbability(p));
        }
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        tracing::debug!(p, seeded = seed.is_some(), "wrapped cache with probabilistic insertion");
        Ok(Self { inner, p, rng })
    }

    /// Returns the insertion probability.
    pub fn probability(&self) -> f64 {
        self.p
    }

    /// Returns the wrapped cache.
    pub fn inner(&self) -> &dyn Cache<K> {
        self.inner.as_ref()
    }

    /// Unwraps into the inner cache.
    pub fn into_inner(self) -> Box<dyn Cache<K>> {
        self.inner
    }
}

impl<K> Clone for RandInsertCache<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_box(),
            p: self.p,
            rng: self.rng.clone(),
        }
    }
}

impl<K> fmt::Debug for RandInsertCache<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandInsertCache")
            .field("p", &self.p)
            .field("len", &self.inner.len())
            .field("capacity", &self.inner.capacity())
            .finish_non_exhaustive()
    }
}

impl<K: 'static> Cache<K> for RandInsertCache<K> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    #[inline]
    fn get(&mut self, key: &K) -> bool {
        self.inner.get(key)
    }

    fn put(&mut self, key: K) -> Option<K> {
        if self.rng.random::<f64>() < self.p {
            self.inner.put(key)
        } else {
            None
        }
    }

    fn dump(&self) -> Vec<K> {
        self.inner.dump()
    }

    fn clear(&mut self) {
        self.inner.clear()
    }

    fn clone_box(&self) -> Box<dyn Cache<K>> {
        Box::new(self.clone())
    }
}
