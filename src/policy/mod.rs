//! Cache replacement policies.
//!
//! | Policy | Eviction basis | `get` side effect | `dump` order |
//! |--------|----------------|-------------------|--------------|
//! | NULL   | never stores   | none              | empty        |
//! | LRU    | last access    | promote to top    | most recent first |
//! | LFU    | access count, then age | frequency += 1 | most valuable first |
//! | FIFO   | insertion order | none             | newest first |
//! | RAND   | uniform random slot | none         | unordered    |

pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod null;
pub mod random;

use crate::error::ConfigError;

/// Rejects a zero capacity for the named policy.
pub(crate) fn check_capacity(policy: &'static str, capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        tracing::debug!(policy, "rejected cache construction with zero capacity");
        return Err(ConfigError::ZeroCapacity { policy });
    }
    tracing::debug!(policy, capacity, "constructed cache");
    Ok(())
}
