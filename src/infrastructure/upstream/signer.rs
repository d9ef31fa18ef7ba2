//! HMAC request signing for the partner API.
//!
//! The partner verifies each call by rebuilding a canonical message and
//! comparing HMAC-SHA256 digests:
//!
//! ```text
//! message       = signed-date ++ METHOD ++ path [++ query]
//! authorization = "CEA algorithm=HmacSHA256, access-key={ak}, signed-date={date}, signature={hex}"
//! ```
//!
//! The query is appended exactly as sent on the wire and omitted entirely
//! when the call has none. The header is parsed positionally by the
//! receiver, so field order and the `", "` separators are part of the
//! contract.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::entities::Credentials;

type HmacSha256 = Hmac<Sha256>;

/// Scheme token and algorithm field that open every authorization header.
pub const AUTH_SCHEME: &str = "CEA algorithm=HmacSHA256";

/// Textual format of the signed date.
///
/// Both are compact UTC with seconds precision and a literal `Z`; they
/// differ only in the century prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignedDateFormat {
    /// `YYMMDDTHHMMSSZ`, e.g. `250117T123456Z`.
    #[default]
    Short,
    /// `YYYYMMDDTHHMMSSZ`, e.g. `20250117T123456Z`.
    Full,
}

impl SignedDateFormat {
    fn pattern(self) -> &'static str {
        match self {
            SignedDateFormat::Short => "%y%m%dT%H%M%SZ",
            SignedDateFormat::Full => "%Y%m%dT%H%M%SZ",
        }
    }

    pub fn format(self, at: DateTime<Utc>) -> String {
        at.format(self.pattern()).to_string()
    }
}

impl FromStr for SignedDateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" => Ok(SignedDateFormat::Short),
            "full" => Ok(SignedDateFormat::Full),
            other => Err(format!("unknown signed date format '{other}'")),
        }
    }
}

/// Source of the signing time. Injected so signatures are reproducible in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Credential for exactly one upstream call.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedCredential {
    pub authorization: String,
    pub signed_date: String,
}

impl SignedCredential {
    /// Header prefix safe for logs: scheme and access key, no signature.
    pub fn redacted(&self) -> String {
        let visible: String = self.authorization.chars().take(50).collect();
        format!("{visible}...")
    }
}

impl fmt::Debug for SignedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedCredential")
            .field("authorization", &self.redacted())
            .field("signed_date", &self.signed_date)
            .finish()
    }
}

/// Builds the exact byte sequence that gets hashed.
pub fn canonical_message(signed_date: &str, method: &str, path: &str, query: Option<&str>) -> String {
    let mut message = String::with_capacity(
        signed_date.len() + method.len() + path.len() + query.map_or(0, str::len),
    );
    message.push_str(signed_date);
    message.push_str(method);
    message.push_str(path);
    if let Some(query) = query {
        message.push_str(query);
    }
    message
}

/// Lowercase hex HMAC-SHA256 of `message` keyed by `secret_key`.
pub fn hmac_hex(secret_key: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Produces time-bound authorization headers.
#[derive(Clone)]
pub struct Signer {
    format: SignedDateFormat,
    clock: Arc<dyn Clock>,
}

impl Signer {
    pub fn new(format: SignedDateFormat) -> Self {
        Self::with_clock(format, Arc::new(SystemClock))
    }

    pub fn with_clock(format: SignedDateFormat, clock: Arc<dyn Clock>) -> Self {
        Self { format, clock }
    }

    pub fn format(&self) -> SignedDateFormat {
        self.format
    }

    /// Signs one call.
    ///
    /// `path` must not contain the query string; `query` is `None` for calls
    /// without query parameters.
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        query: Option<&str>,
        credentials: &Credentials,
    ) -> SignedCredential {
        let signed_date = self.format.format(self.clock.now());
        let message = canonical_message(&signed_date, method, path, query);
        let signature = hmac_hex(&credentials.secret_key, &message);

        let authorization = format!(
            "{AUTH_SCHEME}, access-key={}, signed-date={signed_date}, signature={signature}",
            credentials.access_key
        );

        SignedCredential {
            authorization,
            signed_date,
        }
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("format", &self.format).finish()
    }
}
