//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod deeplink;
pub mod health;
pub mod not_found;
pub mod search;

pub use deeplink::deeplink_handler;
pub use health::health_handler;
pub use not_found::not_found_handler;
pub use search::search_handler;
