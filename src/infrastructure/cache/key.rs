//! Cache key derivation.

use std::fmt;

/// Deterministic cache key for one operation and its parameters.
///
/// Each free-text component is percent-encoded, so no value can contain
/// the `:` separator and distinct parameter tuples never share a key.
/// Callers normalize parameters (trimming etc.) before building the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `search:{keyword}:{limit}:{sub_id}`.
    ///
    /// The sub-identifier is part of the key because it changes the
    /// trackable links embedded in the cached envelope.
    pub fn search(keyword: &str, limit: u32, sub_id: Option<&str>) -> Self {
        Self(format!(
            "search:{}:{}:{}",
            urlencoding::encode(keyword),
            limit,
            urlencoding::encode(sub_id.unwrap_or(""))
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
