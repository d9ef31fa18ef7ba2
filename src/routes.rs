//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /`, `GET /health` - Service descriptor
//! - `/api/*`              - Search and deeplink API
//! - anything else         - JSON 404
//!
//! # Middleware (outermost first)
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Preflight answers and headers on every response
//! - **Error trace** - Error chains in 500 bodies, development only

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::{cors, error_trace, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// Only `GET` is routed; other methods on known paths get `405`, while
/// `OPTIONS` is answered by the CORS layer before routing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(not_found_handler)
        .layer(middleware::map_response_with_state(
            state.clone(),
            error_trace::layer,
        ))
        .layer(middleware::from_fn(cors::layer))
        .with_state(state)
        .layer(tracing::layer())
}
