//! Normalized product record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A product from a partner search, flattened into the shape clients consume.
///
/// Built by the upstream client from the raw listing; only `trackable_link`
/// changes afterwards, once link resolution has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    /// Price in the smallest currency unit.
    pub price: i64,
    pub image_url: String,
    pub canonical_url: String,
    pub rating: f64,
    pub review_count: i64,
    pub is_expedited: bool,
    pub is_free_shipping: bool,
    pub rank: i64,
    pub trackable_link: String,
}

impl ProductRecord {
    /// Fills `trackable_link` from a resolved mapping.
    ///
    /// Products whose URL is missing from the mapping link to their
    /// canonical URL.
    pub fn with_trackable_link(mut self, links: &HashMap<String, String>) -> Self {
        self.trackable_link = links
            .get(&self.canonical_url)
            .filter(|link| !link.is_empty())
            .cloned()
            .unwrap_or_else(|| self.canonical_url.clone());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(url: &str) -> ProductRecord {
        ProductRecord {
            id: 1,
            name: "Laptop".to_string(),
            price: 1_290_000,
            image_url: String::new(),
            canonical_url: url.to_string(),
            rating: 0.0,
            review_count: 0,
            is_expedited: false,
            is_free_shipping: false,
            rank: 1,
            trackable_link: url.to_string(),
        }
    }

    #[test]
    fn test_trackable_link_from_mapping() {
        let mut links = HashMap::new();
        links.insert(
            "https://www.coupang.com/vp/products/1".to_string(),
            "https://link.coupang.com/a/abc".to_string(),
        );

        let p = product("https://www.coupang.com/vp/products/1").with_trackable_link(&links);
        assert_eq!(p.trackable_link, "https://link.coupang.com/a/abc");
    }

    #[test]
    fn test_trackable_link_defaults_to_canonical() {
        let p = product("https://www.coupang.com/vp/products/2").with_trackable_link(&HashMap::new());
        assert_eq!(p.trackable_link, "https://www.coupang.com/vp/products/2");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(product("u")).unwrap();
        assert!(json.get("trackableLink").is_some());
        assert!(json.get("isFreeShipping").is_some());
        assert!(json.get("reviewCount").is_some());
    }
}
