//! Handler for the service descriptor endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CacheStatus, Endpoints, HealthResponse};
use crate::state::AppState;

/// Describes the service and reports cache health.
///
/// # Endpoint
///
/// `GET /` and `GET /health`
///
/// # Response
///
/// Always **200 OK**. The cache fails open, so an unreachable backend only
/// turns `status` into `"degraded"`.
///
/// ```json
/// {
///   "status": "ok",
///   "service": "partners-gateway",
///   "version": "0.1.0",
///   "endpoints": {
///     "search": "/api/search?keyword=<keyword>&limit=<1-100>&subId=<optional>",
///     "deeplink": "/api/deeplink?url=<url>&subId=<optional>"
///   },
///   "cache": { "backend": "memory", "status": "ok" }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache_ok = state.response_cache.health_check().await;

    Json(HealthResponse {
        status: if cache_ok { "ok" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: Endpoints {
            search: "/api/search?keyword=<keyword>&limit=<1-100>&subId=<optional>".to_string(),
            deeplink: "/api/deeplink?url=<url>&subId=<optional>".to_string(),
        },
        cache: CacheStatus {
            backend: state.response_cache.backend().to_string(),
            status: if cache_ok { "ok" } else { "error" }.to_string(),
        },
    })
}
