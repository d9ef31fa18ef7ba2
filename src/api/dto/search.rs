//! DTOs for the product search endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ProductRecord;
use crate::error::AppError;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Raw query string of `GET /api/search`.
///
/// Every field is optional text so that validation, not extraction, decides
/// which inputs are errors.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "subId")]
    pub sub_id: Option<String>,
}

/// Validated search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub limit: u32,
    pub sub_id: Option<String>,
}

impl SearchParams {
    /// Validates and normalizes the raw parameters.
    ///
    /// # Errors
    ///
    /// - blank or missing `keyword`
    /// - numeric `limit` outside `1..=100`
    pub fn into_query(self) -> Result<SearchQuery, AppError> {
        let keyword = self
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::bad_request("keyword parameter is required"))?
            .to_string();

        let limit = parse_limit(self.limit.as_deref())?;

        let sub_id = self
            .sub_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(SearchQuery {
            keyword,
            limit,
            sub_id,
        })
    }
}

/// Reads the leading integer of `raw`, ignoring any trailing text.
///
/// Missing values and values without leading digits fall back to the
/// default; integers outside the allowed range are rejected.
fn parse_limit(raw: Option<&str>) -> Result<u32, AppError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return Ok(DEFAULT_LIMIT);
    }

    digits
        .parse::<u32>()
        .ok()
        .filter(|limit| !negative && (1..=MAX_LIMIT).contains(limit))
        .ok_or_else(|| AppError::bad_request(format!("limit must be between 1 and {MAX_LIMIT}")))
}

/// Search envelope, stored verbatim in the response cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub keyword: String,
    pub count: usize,
    pub products: Vec<ProductRecord>,
    pub cached: bool,
}

impl SearchResponse {
    pub fn new(keyword: String, products: Vec<ProductRecord>) -> Self {
        Self {
            success: true,
            keyword,
            count: products.len(),
            products,
            cached: false,
        }
    }
}
