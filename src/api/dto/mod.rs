//! Data Transfer Objects for API requests and responses.
//!
//! Query DTOs keep every field as optional text and expose an `into_query`
//! step that produces validated input or a [`crate::error::AppError`].

pub mod deeplink;
pub mod health;
pub mod search;
