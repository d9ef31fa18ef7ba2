//! HTTP middleware for request processing.
//!
//! Provides CORS, development error detail and request tracing.

pub mod cors;
pub mod error_trace;
pub mod tracing;
