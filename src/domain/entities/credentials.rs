//! Partner API credentials.

use std::fmt;

/// Access/secret key pair issued by the partner program.
///
/// The secret never leaves this process: it is only used as the HMAC key.
/// `Debug` output masks both values.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Builds credentials only when both halves are present and non-blank.
    pub fn from_parts(access_key: Option<String>, secret_key: Option<String>) -> Option<Self> {
        match (access_key, secret_key) {
            (Some(access), Some(secret)) if !access.trim().is_empty() && !secret.trim().is_empty() => {
                Some(Self::new(access, secret))
            }
            _ => None,
        }
    }

    /// Access key with everything past the first four characters hidden.
    pub fn masked_access_key(&self) -> String {
        mask_secret(&self.access_key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.masked_access_key())
            .field("secret_key", &"***")
            .finish()
    }
}

/// Masks a secret for logging, keeping a short prefix for identification.
pub fn mask_secret(value: &str) -> String {
    let prefix: String = value.chars().take(4).collect();
    format!("{prefix}***")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_never_prints_secret() {
        let creds = Credentials::new("73920ae9-75b9", "540f3ad0ac3430ce");
        let debug = format!("{creds:?}");

        assert!(!debug.contains("540f3ad0ac3430ce"));
        assert!(!debug.contains("73920ae9-75b9"));
        assert!(debug.contains("7392***"));
    }

    #[test]
    fn test_from_parts_requires_both_keys() {
        assert!(Credentials::from_parts(Some("a".into()), Some("b".into())).is_some());
        assert!(Credentials::from_parts(Some("a".into()), None).is_none());
        assert!(Credentials::from_parts(None, Some("b".into())).is_none());
        assert!(Credentials::from_parts(Some("  ".into()), Some("b".into())).is_none());
    }

    #[test]
    fn test_mask_short_value() {
        assert_eq!(mask_secret("ab"), "ab***");
        assert_eq!(mask_secret(""), "***");
    }
}
