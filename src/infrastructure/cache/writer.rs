//! Background cache writer.
//!
//! Responses are returned before their cache write happens. Writes are
//! queued to a single worker task and counted until they finish, so
//! shutdown can wait for every accepted write instead of dropping it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use metrics::counter;
use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::service::{CacheEntry, CacheService};
use crate::metrics_defs::CACHE_WRITES;

/// A pending cache write.
#[derive(Debug, Clone)]
pub struct CacheWrite {
    pub key: String,
    pub entry: CacheEntry,
}

/// Counts writes that were accepted but have not finished.
#[derive(Default)]
struct WriteTracker {
    pending: AtomicUsize,
    idle: Notify,
}

impl WriteTracker {
    fn begin(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    fn complete(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }

    async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.pending.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Handle for submitting cache writes without awaiting them.
#[derive(Clone)]
pub struct CacheWriter {
    tx: mpsc::Sender<CacheWrite>,
    tracker: Arc<WriteTracker>,
}

impl CacheWriter {
    /// Starts the worker task and returns a handle to it.
    pub fn spawn(cache: Arc<dyn CacheService>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let tracker = Arc::new(WriteTracker::default());
        let handle = tokio::spawn(run_cache_writer(rx, cache, tracker.clone()));

        (Self { tx, tracker }, handle)
    }

    /// Queues a write. Never blocks the caller.
    ///
    /// When the queue is full the write is handed to a detached task that
    /// waits for room; it stays counted until the worker finishes it.
    pub fn submit(&self, write: CacheWrite) {
        self.tracker.begin();

        match self.tx.try_send(write) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(write)) => {
                debug!("Cache write queue full, deferring {}", write.key);
                let tx = self.tx.clone();
                let tracker = self.tracker.clone();
                tokio::spawn(async move {
                    if let Err(e) = tx.send(write).await {
                        warn!("Cache writer stopped, dropping {}", e.0.key);
                        counter!(CACHE_WRITES, "outcome" => "dropped").increment(1);
                        tracker.complete();
                    }
                });
            }
            Err(mpsc::error::TrySendError::Closed(write)) => {
                warn!("Cache writer stopped, dropping {}", write.key);
                counter!(CACHE_WRITES, "outcome" => "dropped").increment(1);
                self.tracker.complete();
            }
        }
    }

    /// Number of accepted writes not yet finished.
    pub fn pending(&self) -> usize {
        self.tracker.pending.load(Ordering::SeqCst)
    }

    /// Resolves once every accepted write has finished.
    pub async fn wait_idle(&self) {
        self.tracker.wait_idle().await;
    }
}

async fn run_cache_writer(
    mut rx: mpsc::Receiver<CacheWrite>,
    cache: Arc<dyn CacheService>,
    tracker: Arc<WriteTracker>,
) {
    while let Some(write) = rx.recv().await {
        match cache.put(&write.key, write.entry).await {
            Ok(()) => {
                counter!(CACHE_WRITES, "outcome" => "ok").increment(1);
            }
            Err(e) => {
                warn!("Failed to cache {}: {}", write.key, e);
                counter!(CACHE_WRITES, "outcome" => "error").increment(1);
            }
        }
        tracker.complete();
    }

    debug!("Cache writer exiting");
}
