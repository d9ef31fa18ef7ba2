//! # Partners Gateway
//!
//! A signing and caching HTTP gateway in front of the Coupang Partners
//! affiliate API, built with Axum.
//!
//! ## Architecture
//!
//! The crate keeps a layered layout:
//!
//! - **Domain Layer** ([`domain`]) - Credentials, product records, the partner API port
//! - **Application Layer** ([`application`]) - Search orchestration and link resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - Request signing, HTTP client, cache backends
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//!
//! ## Features
//!
//! - HMAC-SHA256 request signing with an injectable clock
//! - Lenient normalization of partner search responses
//! - Batch trackable-link conversion with a local fallback that never fails a search
//! - Read-through response cache (memory, Redis or disabled) with background writes
//! - Permissive CORS and uniform JSON error envelopes
//!
//! ## Quick Start
//!
//! ```bash
//! export COUPANG_ACCESS_KEY="..."
//! export COUPANG_SECRET_KEY="..."
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! curl 'http://localhost:3000/api/search?keyword=laptop&limit=2'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod metrics_defs;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CatalogService, LinkMode, LinkResolver};
    pub use crate::domain::entities::{Credentials, ProductRecord};
    pub use crate::domain::{AffiliateApi, LinkTemplate};
    pub use crate::error::{AppError, UpstreamError};
    pub use crate::infrastructure::cache::{CacheService, CacheWriter, ResponseCache};
    pub use crate::infrastructure::upstream::{PartnersClient, SignedDateFormat, Signer};
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
}
