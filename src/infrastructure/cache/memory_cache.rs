//! In-process cache backed by `moka`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use super::service::{CacheEntry, CacheResult, CacheService};

/// Expires each entry after its own TTL, restarting the clock on overwrite.
struct EntryTtl;

impl Expiry<String, CacheEntry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl())
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl())
    }
}

/// Bounded in-memory cache. Default backend when Redis is not configured.
///
/// Shared by all requests without a single-flight guard: concurrent misses
/// for the same key each go upstream and the last write wins.
pub struct MemoryCache {
    entries: Cache<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new(max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(EntryTtl)
            .name("partners_responses")
            .build();

        Self { entries }
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<CacheEntry>> {
        match self.entries.get(key).await {
            // moka expiry is lazy and coarse; the entry's own clock is authoritative
            Some(entry) if entry.is_expired_at(Utc::now()) => {
                self.entries.invalidate(key).await;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, entry: CacheEntry) -> CacheResult<()> {
        debug!("Cache SET: {} (TTL: {}s)", key, entry.ttl_seconds);
        self.entries.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = MemoryCache::new(100);
        let entry = CacheEntry::new(r#"{"success":true}"#.into(), Duration::from_secs(300));

        cache.put("search:laptop:2:", entry.clone()).await.unwrap();

        assert_eq!(cache.get("search:laptop:2:").await.unwrap(), Some(entry));
    }

    #[tokio::test]
    async fn test_unknown_key_misses() {
        let cache = MemoryCache::new(100);
        assert!(cache.get("search:never:1:").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite_last_write_wins() {
        let cache = MemoryCache::new(100);
        cache
            .put("k", CacheEntry::new("first".into(), Duration::from_secs(60)))
            .await
            .unwrap();
        cache
            .put("k", CacheEntry::new("second".into(), Duration::from_secs(60)))
            .await
            .unwrap();

        assert_eq!(cache.get("k").await.unwrap().unwrap().body, "second");
    }

    #[tokio::test]
    async fn test_expired_entry_misses() {
        let cache = MemoryCache::new(100);
        let mut entry = CacheEntry::new("old".into(), Duration::from_secs(300));
        entry.stored_at = Utc::now() - chrono::Duration::seconds(301);

        cache.put("k", entry).await.unwrap();

        assert!(cache.get("k").await.unwrap().is_none());
    }
}
