//! DTOs for the single-URL deeplink endpoint.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct DeeplinkParams {
    pub url: Option<String>,
    #[serde(rename = "subId")]
    pub sub_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeeplinkQuery {
    pub url: String,
    pub sub_id: Option<String>,
}

impl DeeplinkParams {
    /// # Errors
    ///
    /// Returns a validation error when `url` is missing or blank.
    pub fn into_query(self) -> Result<DeeplinkQuery, AppError> {
        let url = self
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::bad_request("url parameter is required"))?;

        let sub_id = self
            .sub_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(DeeplinkQuery { url, sub_id })
    }
}

/// `subId` is serialized as `null` when absent.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeeplinkResponse {
    pub success: bool,
    pub original_url: String,
    pub partner_link: String,
    pub sub_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_required() {
        assert!(DeeplinkParams::default().into_query().is_err());
        let blank = DeeplinkParams {
            url: Some(" ".to_string()),
            sub_id: None,
        };
        assert_eq!(
            blank.into_query().unwrap_err().to_string(),
            "url parameter is required"
        );
    }

    #[test]
    fn test_response_serializes_null_sub_id() {
        let json = serde_json::to_value(DeeplinkResponse {
            success: true,
            original_url: "u".to_string(),
            partner_link: "l".to_string(),
            sub_id: None,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "originalUrl": "u", "partnerLink": "l", "subId": null })
        );
    }
}
