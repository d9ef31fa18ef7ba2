//! HTTP server initialization and runtime setup.
//!
//! Handles cache setup, the cache writer, the partner client and the Axum
//! server lifecycle.

use crate::application::services::{CatalogService, LinkResolver};
use crate::config::Config;
use crate::domain::{AffiliateApi, LinkTemplate};
use crate::infrastructure::cache::{
    CacheService, CacheWriter, MemoryCache, NullCache, RedisCache, ResponseCache,
};
use crate::infrastructure::upstream::{PartnersClient, Signer};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on waiting for queued cache writes at shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Cache backend (Redis, memory, or none)
/// - Background cache writer
/// - Signed partner API client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let backend = select_cache(&config).await;
    let (writer, _writer_task) = CacheWriter::spawn(backend.clone(), config.cache_write_queue_capacity);
    tracing::info!("Cache writer started");

    let response_cache = Arc::new(ResponseCache::new(
        backend,
        writer,
        Duration::from_secs(config.cache_ttl_seconds),
    ));

    let client = PartnersClient::new(
        config.upstream_base_url.clone(),
        Duration::from_secs(config.upstream_timeout_secs),
        Signer::new(config.signed_date_format),
    )
    .context("Failed to build partner API client")?;
    let api: Arc<dyn AffiliateApi> = Arc::new(client);

    let resolver = Arc::new(LinkResolver::new(
        api.clone(),
        LinkTemplate::new(config.link_base_url.clone()),
        config.link_mode,
    ));
    let catalog_service = Arc::new(CatalogService::new(api, resolver));

    let state = AppState::new(
        catalog_service,
        response_cache.clone(),
        config.credentials.clone(),
        config.is_development(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Draining cache writes");
    if tokio::time::timeout(DRAIN_TIMEOUT, response_cache.wait_for_pending_writes())
        .await
        .is_err()
    {
        tracing::warn!(
            "Cache writes still pending after {}s, exiting anyway",
            DRAIN_TIMEOUT.as_secs()
        );
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Picks the cache backend: none when disabled, Redis when configured and
/// reachable, process memory otherwise.
async fn select_cache(config: &Config) -> Arc<dyn CacheService> {
    if !config.cache_enabled {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    }

    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using MemoryCache.", e);
            }
        }
    }

    tracing::info!("Cache enabled (memory, max {} entries)", config.cache_max_entries);
    Arc::new(MemoryCache::new(config.cache_max_entries))
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
