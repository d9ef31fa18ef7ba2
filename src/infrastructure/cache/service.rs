//! Cache service trait, entry and error types.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A serialized response envelope together with its freshness window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub body: String,
    pub stored_at: DateTime<Utc>,
    pub ttl_seconds: u64,
}

impl CacheEntry {
    pub fn new(body: String, ttl: Duration) -> Self {
        Self {
            body,
            stored_at: Utc::now(),
            ttl_seconds: ttl.as_secs(),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Whether the entry is past its TTL at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.stored_at);
        age.num_seconds() >= i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX)
    }
}

/// Storage backend for cached response envelopes.
///
/// Implementations must be thread-safe and fail open: a broken backend is
/// reported as a miss, never as a request failure.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with per-entry TTL
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a live entry.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(entry))` on cache hit
    /// - `Ok(None)` on miss, expiry, or backend error (fail-open behavior)
    async fn get(&self, key: &str) -> CacheResult<Option<CacheEntry>>;

    /// Stores an entry, replacing any previous value. The entry's TTL applies.
    ///
    /// # Errors
    ///
    /// Should not propagate backend errors; implementations log them and
    /// return `Ok(())`.
    async fn put(&self, key: &str, entry: CacheEntry) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for health output and logs.
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_expiry() {
        let entry = CacheEntry::new("{}".to_string(), Duration::from_secs(300));

        assert!(!entry.is_expired_at(entry.stored_at));
        assert!(!entry.is_expired_at(entry.stored_at + chrono::Duration::seconds(299)));
        assert!(entry.is_expired_at(entry.stored_at + chrono::Duration::seconds(300)));
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let entry = CacheEntry::new("{}".to_string(), Duration::from_secs(u64::MAX));

        assert!(!entry.is_expired_at(entry.stored_at));
        assert!(!entry.is_expired_at(entry.stored_at + chrono::Duration::days(365 * 100)));
    }

    #[test]
    fn test_entry_roundtrips_through_json() {
        let entry = CacheEntry::new(r#"{"success":true}"#.to_string(), Duration::from_secs(5));
        let json = serde_json::to_string(&entry).unwrap();
        let back: CacheEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
