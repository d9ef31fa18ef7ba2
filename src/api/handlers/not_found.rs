//! Fallback for unknown paths.

use axum::http::Uri;

use crate::error::AppError;

/// Renders `404 {"success":false,"error":"Not Found","path":...}`.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found(uri.path())
}
