use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec,
};

lazy_static! {
    // API call metrics
    pub static ref API_CALLS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "api_calls_total",
        "Total backend API calls",
        &["operation"]
    )
    .unwrap();

    pub static ref API_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "api_failures_total",
        "Total normalized API failures",
        &["origin"]  // origin: http_status, network, generic, unknown
    )
    .unwrap();

    pub static ref API_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "api_request_duration_seconds",
        "Backend API call duration in seconds",
        &["operation"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    pub static ref RATE_LIMIT_WAITS_TOTAL: IntCounter = register_int_counter!(
        "rate_limit_waits_total",
        "Total times the outbound rate limit caused a wait"
    )
    .unwrap();

    // Query cache metrics
    pub static ref QUERY_CACHE_HITS_TOTAL: IntCounter = register_int_counter!(
        "query_cache_hits_total",
        "Total query cache hits"
    )
    .unwrap();

    pub static ref QUERY_CACHE_MISSES_TOTAL: IntCounter = register_int_counter!(
        "query_cache_misses_total",
        "Total query cache misses"
    )
    .unwrap();

    pub static ref QUERY_CACHE_INVALIDATIONS_TOTAL: IntCounter = register_int_counter!(
        "query_cache_invalidations_total",
        "Total query cache entries marked stale"
    )
    .unwrap();
}

/// Initialize all metrics (called on startup)
pub fn init_metrics() {
    lazy_static::initialize(&API_CALLS_TOTAL);
    lazy_static::initialize(&API_FAILURES_TOTAL);
    lazy_static::initialize(&API_REQUEST_DURATION_SECONDS);
    lazy_static::initialize(&RATE_LIMIT_WAITS_TOTAL);
    lazy_static::initialize(&QUERY_CACHE_HITS_TOTAL);
    lazy_static::initialize(&QUERY_CACHE_MISSES_TOTAL);
    lazy_static::initialize(&QUERY_CACHE_INVALIDATIONS_TOTAL);
}
