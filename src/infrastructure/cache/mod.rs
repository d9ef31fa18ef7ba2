//! Caching layer for search responses.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`MemoryCache`] - In-process `moka` cache, the default
//! - [`RedisCache`] - Redis-backed cache shared between instances
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! On top of the backend sit [`CacheKey`] derivation, the fire-and-forget
//! [`CacheWriter`] and the typed read-through [`ResponseCache`].

mod key;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod response_cache;
mod service;
mod writer;

pub use key::CacheKey;
pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use response_cache::ResponseCache;
pub use service::{CacheEntry, CacheError, CacheResult, CacheService};
pub use writer::{CacheWrite, CacheWriter};
