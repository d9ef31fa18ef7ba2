//! API route configuration.

use crate::api::handlers::{deeplink_handler, search_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET /search`   - Product search with trackable links (cached)
/// - `GET /deeplink` - Trackable link for a single product URL
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_handler))
        .route("/deeplink", get(deeplink_handler))
}
