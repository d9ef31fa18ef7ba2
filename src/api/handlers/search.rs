//! Handler for the product search endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::debug;

use crate::api::dto::search::{SearchParams, SearchQuery, SearchResponse};
use crate::domain::entities::Credentials;
use crate::error::AppError;
use crate::infrastructure::cache::CacheKey;
use crate::state::AppState;

/// Searches partner products and attaches trackable links.
///
/// # Endpoint
///
/// `GET /api/search?keyword=<string>&limit=<1..100>&subId=<optional>`
///
/// # Caching
///
/// Read-through: a hit returns the stored envelope with `cached: true`.
/// A miss runs the search and the cache write on a detached task, so a
/// client disconnect neither aborts the upstream call nor loses its result.
/// The response does not wait for the write itself.
///
/// # Errors
///
/// - **400** blank `keyword`, out-of-range `limit`
/// - **500** missing credentials, upstream failure
pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(params) = params.map_err(|e| AppError::bad_request(e.body_text()))?;
    let query = params.into_query()?;
    let credentials = state.credentials()?.clone();

    let key = CacheKey::search(&query.keyword, query.limit, query.sub_id.as_deref());

    if let Some(mut hit) = state.response_cache.get::<SearchResponse>(&key).await {
        hit.cached = true;
        return Ok(Json(hit));
    }

    let response = tokio::spawn(fetch_and_store(state, credentials, query, key))
        .await
        .map_err(|e| AppError::internal(format!("Search task failed: {e}")))??;

    Ok(Json(response))
}

/// Runs the upstream search and queues the envelope for caching.
///
/// Runs detached from the request, so the result is cached even when the
/// handler future is dropped.
async fn fetch_and_store(
    state: AppState,
    credentials: Credentials,
    query: SearchQuery,
    key: CacheKey,
) -> Result<SearchResponse, AppError> {
    let products = state
        .catalog_service
        .search(
            &credentials,
            &query.keyword,
            query.limit,
            query.sub_id.as_deref().unwrap_or_default(),
        )
        .await?;

    debug!(keyword = %query.keyword, count = products.len(), "Search completed");

    let response = SearchResponse::new(query.keyword, products);
    state.response_cache.put(key, &response);

    Ok(response)
}
