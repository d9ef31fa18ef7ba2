//! Port to the partner affiliate API.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::entities::{Credentials, ProductRecord};
use crate::error::UpstreamError;

/// Operations the gateway needs from the partner API.
///
/// Every call is signed with the supplied credentials; implementations must
/// not cache or reuse signatures across calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::PartnersClient`] - HTTP client for the live API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AffiliateApi: Send + Sync {
    /// Searches products by keyword.
    ///
    /// An unrecognized or empty listing yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure or a non-success status.
    async fn search_products(
        &self,
        credentials: &Credentials,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, UpstreamError>;

    /// Converts product URLs into trackable links in one batch call.
    ///
    /// `sub_id` is an attribution tag; an empty string means none.
    ///
    /// # Returns
    ///
    /// Mapping from original URL to trackable link. URLs the partner could not
    /// convert are absent.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure, a non-success status, or
    /// a result code other than OK.
    async fn convert_links(
        &self,
        credentials: &Credentials,
        urls: &[String],
        sub_id: &str,
    ) -> Result<HashMap<String, String>, UpstreamError>;
}
