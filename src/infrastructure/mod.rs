//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for the partner API and caching.
//!
//! # Modules
//!
//! - [`cache`] - Cache backends, key derivation and background writes
//! - [`upstream`] - Request signing and the partner API HTTP client

pub mod cache;
pub mod upstream;
