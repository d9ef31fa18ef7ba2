//! Trackable-link resolution.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::domain::entities::Credentials;
use crate::domain::{AffiliateApi, LinkTemplate};
use crate::metrics_defs::LINK_FALLBACKS;

/// How trackable links are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    /// Batch conversion through the partner API, local template on failure.
    #[default]
    Api,
    /// Local template only; no network call.
    Local,
}

impl FromStr for LinkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api" => Ok(LinkMode::Api),
            "local" => Ok(LinkMode::Local),
            other => Err(format!("unknown link mode '{other}'")),
        }
    }
}

/// Maps product URLs to trackable links. Never fails.
///
/// A failed conversion call must not fail an otherwise successful search,
/// so upstream errors are logged and replaced by local construction.
pub struct LinkResolver {
    api: Arc<dyn AffiliateApi>,
    template: LinkTemplate,
    mode: LinkMode,
}

impl LinkResolver {
    pub fn new(api: Arc<dyn AffiliateApi>, template: LinkTemplate, mode: LinkMode) -> Self {
        Self {
            api,
            template,
            mode,
        }
    }

    pub fn mode(&self) -> LinkMode {
        self.mode
    }

    /// Resolves `urls` into a mapping from original URL to trackable link.
    ///
    /// URLs the partner did not convert are absent from the mapping;
    /// callers keep the original URL for those.
    pub async fn resolve(
        &self,
        credentials: &Credentials,
        urls: &[String],
        sub_id: &str,
    ) -> HashMap<String, String> {
        if urls.is_empty() {
            return HashMap::new();
        }

        match self.mode {
            LinkMode::Local => self.local_links(credentials, urls, sub_id),
            LinkMode::Api => match self.api.convert_links(credentials, urls, sub_id).await {
                Ok(links) => {
                    debug!(requested = urls.len(), converted = links.len(), "Links converted");
                    links
                }
                Err(e) => {
                    warn!("Deeplink creation failed, using local links: {}", e);
                    counter!(LINK_FALLBACKS).increment(1);
                    self.local_links(credentials, urls, sub_id)
                }
            },
        }
    }

    /// Builds a trackable link without contacting the partner.
    pub fn local_link(&self, credentials: &Credentials, url: &str, sub_id: &str) -> String {
        self.template.build(&credentials.access_key, url, sub_id)
    }

    fn local_links(
        &self,
        credentials: &Credentials,
        urls: &[String],
        sub_id: &str,
    ) -> HashMap<String, String> {
        urls.iter()
            .map(|url| (url.clone(), self.local_link(credentials, url, sub_id)))
            .collect()
    }
}
