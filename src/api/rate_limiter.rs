use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorRateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::metrics::registry::RATE_LIMIT_WAITS_TOTAL;

/// Throttle shared by every outbound backend request.
///
/// Requests queue in arrival order; each wait is logged with the operation
/// that had to wait and counted in `rate_limit_waits_total`.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    requests_per_second: u32,
}

impl RateLimiter {
    /// Create a new rate limiter; zero is treated as one request per second
    pub fn new(requests_per_second: u32) -> Self {
        let per_second = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let limiter = GovernorRateLimiter::direct(Quota::per_second(per_second));

        Self {
            limiter: Arc::new(limiter),
            requests_per_second: per_second.get(),
        }
    }

    /// Wait for a slot before sending `operation`; returns how long it waited
    pub async fn acquire(&self, operation: &str) -> Duration {
        let mut waited = Duration::ZERO;
        while let Err(not_until) = self.limiter.check() {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            debug!(
                operation,
                wait_ms = wait.as_millis() as u64,
                limit = self.requests_per_second,
                "Outbound request throttled"
            );
            RATE_LIMIT_WAITS_TOTAL.inc();
            sleep(wait).await;
            waited += wait;
        }
        waited
    }

    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test]
    async fn test_burst_within_quota_is_fast() {
        let limiter = RateLimiter::new(10);

        let start = Instant::now();
        for _ in 0..10 {
            assert_eq!(limiter.acquire("courses.list").await, Duration::ZERO);
        }

        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_requests_over_quota_wait() {
        let limiter = RateLimiter::new(5);

        let start = Instant::now();
        let mut waited = Duration::ZERO;
        for _ in 0..10 {
            waited += limiter.acquire("notifications.list").await;
        }

        assert!(waited > Duration::ZERO);
        // Governor allows a burst of 5, the rest are spaced at 200ms
        assert!(start.elapsed() >= Duration::from_millis(900));
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        assert_eq!(RateLimiter::new(0).requests_per_second(), 1);
    }
}
