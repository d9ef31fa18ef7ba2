//! Handler for the single-URL deeplink endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::deeplink::{DeeplinkParams, DeeplinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Converts one product URL into a trackable link.
///
/// # Endpoint
///
/// `GET /api/deeplink?url=<string>&subId=<optional>`
///
/// Partner failures are absorbed by the resolver, so once the input is
/// valid and credentials exist the response is always 200 with a
/// non-empty `partnerLink`.
pub async fn deeplink_handler(
    State(state): State<AppState>,
    params: Result<Query<DeeplinkParams>, QueryRejection>,
) -> Result<Json<DeeplinkResponse>, AppError> {
    let Query(params) = params.map_err(|e| AppError::bad_request(e.body_text()))?;
    let query = params.into_query()?;
    let credentials = state.credentials()?;

    let partner_link = state
        .catalog_service
        .deeplink(
            credentials,
            &query.url,
            query.sub_id.as_deref().unwrap_or_default(),
        )
        .await;

    Ok(Json(DeeplinkResponse {
        success: true,
        original_url: query.url,
        partner_link,
        sub_id: query.sub_id,
    }))
}
