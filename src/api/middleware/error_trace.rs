//! Development-only error detail.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::error::ErrorTrace;
use crate::state::AppState;

/// Moves the [`ErrorTrace`] extension of a failed response into its body
/// as `stack` when the service runs in development mode.
///
/// In production the extension is dropped and the body is left untouched.
pub async fn layer(State(state): State<AppState>, mut response: Response) -> Response {
    let Some(trace) = response.extensions_mut().remove::<ErrorTrace>() else {
        return response;
    };

    if !state.expose_error_details {
        return response;
    }

    let status = response.status();
    let mut body = trace.body;
    body.stack = Some(trace.stack);
    (status, Json(body)).into_response()
}
