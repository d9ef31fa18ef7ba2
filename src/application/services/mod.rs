//! Business logic services for the application layer.

pub mod catalog_service;
pub mod link_resolver;

pub use catalog_service::CatalogService;
pub use link_resolver::{LinkMode, LinkResolver};
