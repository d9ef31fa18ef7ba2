//! Domain layer: entities, ports and pure domain logic.
//!
//! - [`entities`] - Credentials and product records
//! - [`affiliate_api`] - Trait describing the partner API operations
//! - [`link_template`] - Local, deterministic trackable-link construction
//!
//! The domain layer has no dependencies on HTTP or cache infrastructure;
//! concrete implementations live in [`crate::infrastructure`].

pub mod affiliate_api;
pub mod entities;
pub mod link_template;

pub use affiliate_api::AffiliateApi;
#[cfg(test)]
pub use affiliate_api::MockAffiliateApi;
pub use link_template::LinkTemplate;
