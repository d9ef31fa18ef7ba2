//! Partner API integration.
//!
//! - [`signer`] - Canonical message construction and HMAC authorization headers
//! - [`protocol`] - Wire types and response-shape interpretation
//! - [`client`] - [`PartnersClient`], the signed HTTP implementation of
//!   [`crate::domain::AffiliateApi`]

pub mod client;
pub mod protocol;
pub mod signer;

pub use client::{DEFAULT_BASE_URL, PartnersClient};
pub use signer::{Clock, FixedClock, SignedCredential, SignedDateFormat, Signer, SystemClock};
