pub mod registry;

use anyhow::{Context, Result};
use prometheus::{Encoder, TextEncoder};

/// Render every registered metric in Prometheus exposition format
pub fn render() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .context("Failed to encode metrics")?;

    String::from_utf8(buffer).context("Metrics output was not valid UTF-8")
}

pub use registry::{
    API_CALLS_TOTAL, API_FAILURES_TOTAL, API_REQUEST_DURATION_SECONDS,
    QUERY_CACHE_HITS_TOTAL, QUERY_CACHE_INVALIDATIONS_TOTAL, QUERY_CACHE_MISSES_TOTAL,
    RATE_LIMIT_WAITS_TOTAL,
};
