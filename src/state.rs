//! Shared application state.

use std::sync::Arc;

use crate::application::services::CatalogService;
use crate::domain::entities::Credentials;
use crate::error::AppError;
use crate::infrastructure::cache::ResponseCache;

/// State injected into every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService>,
    pub response_cache: Arc<ResponseCache>,
    /// `None` when keys are not configured; requests needing them fail with 500.
    pub credentials: Option<Credentials>,
    /// Whether 500 bodies carry the error chain (`ENVIRONMENT=development`).
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(
        catalog_service: Arc<CatalogService>,
        response_cache: Arc<ResponseCache>,
        credentials: Option<Credentials>,
        expose_error_details: bool,
    ) -> Self {
        Self {
            catalog_service,
            response_cache,
            credentials,
            expose_error_details,
        }
    }

    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] when either key is missing.
    pub fn credentials(&self) -> Result<&Credentials, AppError> {
        self.credentials
            .as_ref()
            .ok_or_else(|| AppError::configuration("API keys not configured"))
    }
}
