//! Wire types of the partner API.
//!
//! Response shapes are undocumented and vary between endpoints, so every
//! assumption about them lives in this module.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnError, DefaultOnNull, DisplayFromStr, PickFirst, serde_as};

use crate::domain::entities::ProductRecord;

/// Path of the product search operation.
pub const SEARCH_PATH: &str = "/v2/providers/affiliate_open_api/apis/openapi/products/search";

/// Path of the batch deeplink conversion operation.
pub const DEEPLINK_PATH: &str = "/v2/providers/affiliate_open_api/apis/openapi/v1/deeplink";

/// Result code the partner uses for success.
pub const OK_RESULT_CODE: &str = "0";

/// Raw product entry as returned by the search operation.
///
/// Every field is optional and tolerant of type mismatches, so one odd field
/// never drops a whole listing.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub product_id: Option<i64>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub product_name: Option<String>,

    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub product_price: Option<i64>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub product_image: Option<String>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub product_url: Option<String>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub score_info: Option<RawScoreInfo>,

    #[serde_as(as = "DefaultOnError<DefaultOnNull>")]
    #[serde(default)]
    pub is_rocket: bool,

    #[serde_as(as = "DefaultOnError<DefaultOnNull>")]
    #[serde(default)]
    pub is_free_shipping: bool,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub rank: Option<i64>,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScoreInfo {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub avg_rating: Option<f64>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub count: Option<i64>,
}

impl From<RawProduct> for ProductRecord {
    fn from(raw: RawProduct) -> Self {
        let canonical_url = raw.product_url.unwrap_or_default();
        let (rating, review_count) = raw
            .score_info
            .map(|s| (s.avg_rating.unwrap_or(0.0), s.count.unwrap_or(0)))
            .unwrap_or((0.0, 0));

        ProductRecord {
            id: raw.product_id.unwrap_or(0),
            name: raw.product_name.unwrap_or_default(),
            price: raw.product_price.unwrap_or(0),
            image_url: raw.product_image.unwrap_or_default(),
            trackable_link: canonical_url.clone(),
            canonical_url,
            rating,
            review_count,
            is_expedited: raw.is_rocket,
            is_free_shipping: raw.is_free_shipping,
            rank: raw.rank.unwrap_or(0),
        }
    }
}

/// Interpreted search response.
#[derive(Debug)]
pub enum SearchListing {
    /// The product list was found under its wrapper entry.
    Products(Vec<RawProduct>),
    /// No product list where we expect one. Covers "zero results" and any
    /// shape we do not recognize; both mean an empty search.
    Absent,
}

impl SearchListing {
    /// Parses a search response body.
    ///
    /// # Errors
    ///
    /// Fails only when the body is not JSON at all.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(&value))
    }

    /// Locates the product list.
    ///
    /// Accepted shapes:
    /// - `{"data": [{"productData": [...]}]}` - list nested in the first wrapper entry
    /// - `{"data": {"productData": [...]}}` - list nested in a wrapper object
    pub fn from_value(value: &Value) -> Self {
        let wrapper = match value.get("data") {
            Some(Value::Array(entries)) => entries.first(),
            Some(obj @ Value::Object(_)) => Some(obj),
            _ => None,
        };

        match wrapper.and_then(|w| w.get("productData")) {
            Some(Value::Array(items)) => SearchListing::Products(
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .filter_map(|item| RawProduct::deserialize(item).ok())
                    .collect(),
            ),
            _ => SearchListing::Absent,
        }
    }

    pub fn into_records(self) -> Vec<ProductRecord> {
        match self {
            SearchListing::Products(items) => items.into_iter().map(ProductRecord::from).collect(),
            SearchListing::Absent => Vec::new(),
        }
    }
}

/// Body of a batch deeplink request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeeplinkRequest<'a> {
    pub coupang_urls: &'a [String],
    pub sub_id: &'a str,
}

/// Result code, sent either as a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResultCode {
    Text(String),
    Number(i64),
    Other(Value),
}

impl ResultCode {
    pub fn is_ok(&self) -> bool {
        match self {
            ResultCode::Text(code) => code == OK_RESULT_CODE,
            ResultCode::Number(code) => *code == 0,
            ResultCode::Other(_) => false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeeplinkItem {
    pub original_url: Option<String>,
    pub shorten_url: Option<String>,
}

/// Batch deeplink response.
#[derive(Debug, Deserialize)]
pub struct DeeplinkResponse {
    #[serde(rename = "rCode")]
    pub r_code: Option<ResultCode>,

    #[serde(rename = "rMessage", default)]
    pub r_message: Option<String>,

    #[serde(default)]
    pub data: Option<Vec<DeeplinkItem>>,
}

impl DeeplinkResponse {
    pub fn is_ok(&self) -> bool {
        self.r_code.as_ref().is_some_and(ResultCode::is_ok)
    }

    /// Pairs of (original URL, trackable link), skipping incomplete entries.
    pub fn into_links(self) -> impl Iterator<Item = (String, String)> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| match (item.original_url, item.shorten_url) {
                (Some(original), Some(short)) if !short.is_empty() => Some((original, short)),
                _ => None,
            })
    }
}
