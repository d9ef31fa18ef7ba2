//! Core domain entities.
//!
//! - [`Credentials`] - Partner access/secret key pair
//! - [`ProductRecord`] - A normalized search result

pub mod credentials;
pub mod product;

pub use credentials::{Credentials, mask_secret};
pub use product::ProductRecord;
