//! Wrappers that change how a cache accepts insertions without touching the
//! policy underneath.
//!
//! Both wrappers own an independent copy of the cache they wrap (taken with
//! [`Cache::clone_box`](crate::traits::Cache::clone_box)); the original stays
//! usable and the two evolve separately.
//!
//! - [`RandInsertCache`](rand_insert::RandInsertCache): admits each new
//!   insertion with probability `p`.
//! - [`KeyValCache`](keyval::KeyValCache): stores a value alongside every
//!   cached key.

pub mod keyval;
pub mod rand_insert;
