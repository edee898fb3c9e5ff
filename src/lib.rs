//! cachesim: fixed-capacity cache replacement policies for simulation.
//!
//! Four eviction strategies (LRU, LFU, FIFO, random) plus a null cache share
//! the [`traits::Cache`] interface. Two wrappers change how insertions are
//! handled without touching the policy underneath: probabilistic admission
//! ([`wrapper::rand_insert::RandInsertCache`]) and per-key values
//! ([`wrapper::keyval::KeyValCache`]).
//!
//! ```
//! use cachesim::prelude::*;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("A");
//! cache.put("B");
//! cache.get(&"A");
//! assert_eq!(cache.put("C"), Some("B"));
//! assert_eq!(cache.dump(), vec!["C", "A"]);
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
pub mod wrapper;
