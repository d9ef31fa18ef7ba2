//! Metric names emitted by the gateway.

use metrics::describe_counter;

/// Search envelopes served from cache.
pub const CACHE_HITS: &str = "partners_cache_hits_total";

/// Search requests that had to go upstream.
pub const CACHE_MISSES: &str = "partners_cache_misses_total";

/// Background cache writes, labelled by `outcome`.
pub const CACHE_WRITES: &str = "partners_cache_writes_total";

/// Partner API calls, labelled by `operation` and `outcome`.
pub const UPSTREAM_REQUESTS: &str = "partners_upstream_requests_total";

/// Link resolutions that fell back to the local template.
pub const LINK_FALLBACKS: &str = "partners_link_fallbacks_total";

/// Registers descriptions with whichever recorder is installed.
pub fn describe() {
    describe_counter!(CACHE_HITS, "Search envelopes served from cache");
    describe_counter!(CACHE_MISSES, "Search requests that missed the cache");
    describe_counter!(CACHE_WRITES, "Background cache writes by outcome");
    describe_counter!(UPSTREAM_REQUESTS, "Partner API calls by operation and outcome");
    describe_counter!(LINK_FALLBACKS, "Link resolutions served by the local template");
}
