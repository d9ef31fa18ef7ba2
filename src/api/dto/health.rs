//! DTOs for the service descriptor endpoint.

use serde::{Deserialize, Serialize};

/// Service descriptor with cache status.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub endpoints: Endpoints,
    pub cache: CacheStatus,
}

/// Usage hints for the public endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Endpoints {
    pub search: String,
    pub deeplink: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStatus {
    pub backend: String,
    pub status: String,
}
