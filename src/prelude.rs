pub use crate::builder::{CacheBuilder, CachePolicy};
pub use crate::error::{ConfigError, InvariantError, LookupError};
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::null::NullCache;
pub use crate::policy::random::RandCache;
pub use crate::traits::Cache;
pub use crate::wrapper::keyval::KeyValCache;
pub use crate::wrapper::rand_insert::RandInsertCache;
