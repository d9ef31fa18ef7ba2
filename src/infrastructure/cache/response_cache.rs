//! Read-through cache for response envelopes.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::key::CacheKey;
use super::service::{CacheEntry, CacheService};
use super::writer::{CacheWrite, CacheWriter};
use crate::metrics_defs::{CACHE_HITS, CACHE_MISSES};

/// Typed front of a [`CacheService`]: hit/miss bookkeeping on reads,
/// fire-and-forget writes through the [`CacheWriter`].
///
/// Stored bodies are never modified. A hit deserializes a fresh value and
/// the caller adjusts that copy.
pub struct ResponseCache {
    backend: Arc<dyn CacheService>,
    writer: CacheWriter,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(backend: Arc<dyn CacheService>, writer: CacheWriter, ttl: Duration) -> Self {
        Self {
            backend,
            writer,
            ttl,
        }
    }

    /// Looks up and decodes an envelope. Backend errors and undecodable
    /// entries count as misses.
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let entry = match self.backend.get(key.as_str()).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                counter!(CACHE_MISSES).increment(1);
                return None;
            }
            Err(e) => {
                error!("Cache error for {}: {}", key, e);
                counter!(CACHE_MISSES).increment(1);
                return None;
            }
        };

        match serde_json::from_str(&entry.body) {
            Ok(value) => {
                debug!("Cache HIT: {}", key);
                counter!(CACHE_HITS).increment(1);
                Some(value)
            }
            Err(e) => {
                warn!("Ignoring undecodable cache entry {}: {}", key, e);
                counter!(CACHE_MISSES).increment(1);
                None
            }
        }
    }

    /// Serializes and queues an envelope for storage with the configured TTL.
    /// Returns before the write happens.
    pub fn put<T: Serialize>(&self, key: CacheKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(body) => self.writer.submit(CacheWrite {
                key: key.as_str().to_string(),
                entry: CacheEntry::new(body, self.ttl),
            }),
            Err(e) => warn!("Not caching {}: {}", key, e),
        }
    }

    /// Waits until all queued writes have reached the backend.
    pub async fn wait_for_pending_writes(&self) {
        self.writer.wait_idle().await;
    }

    pub async fn health_check(&self) -> bool {
        self.backend.health_check().await
    }

    pub fn backend(&self) -> &'static str {
        self.backend.backend()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
