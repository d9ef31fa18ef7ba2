//! Error types shared across the gateway.
//!
//! [`UpstreamError`] describes failures talking to the partner API, and
//! [`AppError`] is the request-boundary error rendered as a JSON envelope.

use std::error::Error as _;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Failures of a single partner API call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The partner API answered with a non-success HTTP status.
    #[error("Partner API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// HTTP 2xx, but the result code in the payload is not the OK code.
    #[error("Partner API rejected the request: {body}")]
    Rejected { body: String },

    /// Connection, TLS or timeout failure.
    #[error("Partner API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The access key or signature cannot be sent as an HTTP header.
    #[error("Partner credentials contain characters not allowed in HTTP headers")]
    InvalidCredential,

    /// A 2xx response whose body is not the JSON we expect.
    #[error("Partner API returned an unreadable body: {0}")]
    Decode(String),
}

/// JSON error envelope returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Diagnostic detail attached to 500 responses as a response extension.
///
/// [`crate::api::middleware::error_trace`] copies it into the body when the
/// service runs in development mode.
#[derive(Debug, Clone)]
pub struct ErrorTrace {
    pub body: ErrorBody,
    pub stack: String,
}

/// Request-boundary error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Not Found")]
    NotFound { path: String },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Configuration(_) | AppError::Upstream(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Formats the error and its source chain for development responses.
    ///
    /// Only unexpected failures carry a trace; client mistakes and missing
    /// configuration are fully described by their message.
    fn trace(&self) -> Option<String> {
        match self {
            AppError::Upstream(_) | AppError::Internal(_) => {
                let mut lines = vec![format!("{self:?}")];
                let mut source = self.source();
                while let Some(err) = source {
                    lines.push(format!("caused by: {err}"));
                    source = err.source();
                }
                Some(lines.join("\n"))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        }

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            path: match &self {
                AppError::NotFound { path } => Some(path.clone()),
                _ => None,
            },
            stack: None,
        };

        let trace = self.trace().map(|stack| ErrorTrace {
            body: body.clone(),
            stack,
        });

        let mut response = (status, Json(body)).into_response();
        if let Some(trace) = trace {
            response.extensions_mut().insert(trace);
        }
        response
    }
}
