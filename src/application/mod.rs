//! Application layer services implementing the gateway's business logic.
//!
//! Services consume the [`crate::domain::AffiliateApi`] port and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::catalog_service::CatalogService`] - Search with link attachment, single deeplinks
//! - [`services::link_resolver::LinkResolver`] - Batch conversion with local fallback

pub mod services;
