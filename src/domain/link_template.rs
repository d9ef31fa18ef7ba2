//! Locally constructed trackable links.

/// Default base of the partner's tracking redirect.
pub const DEFAULT_LINK_BASE: &str = "https://link.coupang.com/re/AFFSDP";

/// Deterministic trackable-link builder.
///
/// Produces `{base}?lptag={access_key}&url={original_url}[&subid={sub_id}]`
/// with every value percent-encoded. Needs no network call, at the cost of
/// bypassing the partner's short-link service.
#[derive(Debug, Clone)]
pub struct LinkTemplate {
    base: String,
}

impl LinkTemplate {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn build(&self, access_key: &str, original_url: &str, sub_id: &str) -> String {
        let mut link = format!(
            "{}?lptag={}&url={}",
            self.base,
            urlencoding::encode(access_key),
            urlencoding::encode(original_url)
        );
        if !sub_id.is_empty() {
            link.push_str("&subid=");
            link.push_str(&urlencoding::encode(sub_id));
        }
        link
    }
}

impl Default for LinkTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_BASE)
    }
}
