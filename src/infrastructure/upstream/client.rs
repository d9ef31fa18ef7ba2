//! Signed HTTP client for the partner API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, trace, warn};

use super::protocol::{
    DEEPLINK_PATH, DeeplinkRequest, DeeplinkResponse, SEARCH_PATH, SearchListing,
};
use super::signer::Signer;
use crate::domain::AffiliateApi;
use crate::domain::entities::{Credentials, ProductRecord};
use crate::error::UpstreamError;
use crate::metrics_defs::UPSTREAM_REQUESTS;

/// Production host of the partner API.
pub const DEFAULT_BASE_URL: &str = "https://api-gateway.coupang.com";

const JSON_UTF8: &str = "application/json;charset=UTF-8";

/// HTTP implementation of [`AffiliateApi`].
///
/// Signs every call with a fresh timestamp. There is no retry: a failed call
/// surfaces immediately.
#[derive(Debug, Clone)]
pub struct PartnersClient {
    http: reqwest::Client,
    base_url: String,
    signer: Signer,
}

impl PartnersClient {
    /// Creates a client with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        signer: Signer,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            signer,
        })
    }

    fn signed_headers(
        &self,
        method: &str,
        path: &str,
        query: Option<&str>,
        credentials: &Credentials,
    ) -> Result<HeaderMap, UpstreamError> {
        let credential = self.signer.sign(method, path, query, credentials);
        trace!(authorization = %credential.redacted(), "Signed {} {}", method, path);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&credential.authorization)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
        headers.insert("x-requested-by", header_value(&credentials.access_key)?);
        Ok(headers)
    }

    /// Reads the body and fails on a non-success status.
    async fn read_body(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<String, UpstreamError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), operation, "Partner API returned an error");
            counter!(UPSTREAM_REQUESTS, "operation" => operation, "outcome" => "http_error")
                .increment(1);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl AffiliateApi for PartnersClient {
    async fn search_products(
        &self,
        credentials: &Credentials,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, UpstreamError> {
        let query = format!("keyword={}&limit={}", urlencoding::encode(keyword), limit);
        let headers = self.signed_headers("GET", SEARCH_PATH, Some(&query), credentials)?;
        let url = format!("{}{}?{}", self.base_url, SEARCH_PATH, query);

        debug!(keyword, limit, "Searching partner products");

        let response = self.http.get(&url).headers(headers).send().await?;
        let body = Self::read_body(response, "search").await?;

        let listing = SearchListing::from_body(&body)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        if matches!(listing, SearchListing::Absent) {
            debug!(keyword, "Search response has no product list");
        }

        counter!(UPSTREAM_REQUESTS, "operation" => "search", "outcome" => "ok").increment(1);
        Ok(listing.into_records())
    }

    async fn convert_links(
        &self,
        credentials: &Credentials,
        urls: &[String],
        sub_id: &str,
    ) -> Result<HashMap<String, String>, UpstreamError> {
        let headers = self.signed_headers("POST", DEEPLINK_PATH, None, credentials)?;
        let url = format!("{}{}", self.base_url, DEEPLINK_PATH);
        let payload = serde_json::to_vec(&DeeplinkRequest {
            coupang_urls: urls,
            sub_id,
        })
        .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        debug!(count = urls.len(), "Converting links");

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .body(payload)
            .send()
            .await?;
        let body = Self::read_body(response, "deeplink").await?;

        let parsed: DeeplinkResponse = serde_json::from_str(&body).map_err(|e| {
            counter!(UPSTREAM_REQUESTS, "operation" => "deeplink", "outcome" => "decode_error")
                .increment(1);
            UpstreamError::Decode(e.to_string())
        })?;

        if !parsed.is_ok() || parsed.data.is_none() {
            return Err(reject(body));
        }

        counter!(UPSTREAM_REQUESTS, "operation" => "deeplink", "outcome" => "ok").increment(1);
        Ok(parsed.into_links().collect())
    }
}

fn reject(body: String) -> UpstreamError {
    counter!(UPSTREAM_REQUESTS, "operation" => "deeplink", "outcome" => "rejected").increment(1);
    UpstreamError::Rejected { body }
}

fn header_value(value: &str) -> Result<HeaderValue, UpstreamError> {
    HeaderValue::from_str(value).map_err(|_| UpstreamError::InvalidCredential)
}
