//! Product search and deeplink orchestration.

use std::sync::Arc;

use crate::application::services::LinkResolver;
use crate::domain::AffiliateApi;
use crate::domain::entities::{Credentials, ProductRecord};
use crate::error::AppError;

/// Runs a partner search and attaches trackable links to the results.
pub struct CatalogService {
    api: Arc<dyn AffiliateApi>,
    resolver: Arc<LinkResolver>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn AffiliateApi>, resolver: Arc<LinkResolver>) -> Self {
        Self { api, resolver }
    }

    /// Searches and resolves links for every product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the search call fails. Link
    /// resolution cannot fail the search.
    pub async fn search(
        &self,
        credentials: &Credentials,
        keyword: &str,
        limit: u32,
        sub_id: &str,
    ) -> Result<Vec<ProductRecord>, AppError> {
        let products = self.api.search_products(credentials, keyword, limit).await?;

        let urls: Vec<String> = products
            .iter()
            .map(|p| p.canonical_url.clone())
            .filter(|url| !url.is_empty())
            .collect();

        let links = self.resolver.resolve(credentials, &urls, sub_id).await;

        Ok(products
            .into_iter()
            .map(|p| p.with_trackable_link(&links))
            .collect())
    }

    /// Produces a trackable link for a single URL. Never fails.
    ///
    /// Uses the local template when the partner mapping lacks the URL, so the
    /// result is never empty.
    pub async fn deeplink(&self, credentials: &Credentials, url: &str, sub_id: &str) -> String {
        let urls = [url.to_string()];
        let mut links = self.resolver.resolve(credentials, &urls, sub_id).await;

        links
            .remove(url)
            .filter(|link| !link.is_empty())
            .unwrap_or_else(|| self.resolver.local_link(credentials, url, sub_id))
    }
}
