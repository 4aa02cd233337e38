/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Rate limiter module for pacing ISS requests
//!
//! ISS is a public endpoint without published quotas; requests are paced
//! with a `governor` token bucket so a full report run stays polite.

use crate::application::config::RateLimiterConfig;
use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Longest interval between two replenished tokens
const MAX_REPLENISH_MILLIS: u64 = 24 * 60 * 60 * 1000;

/// Rate limiter for controlling API request rates
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock>>,
}

impl RateLimiter {
    /// Creates a new rate limiter from configuration
    ///
    /// One token is replenished every `period_seconds / max_requests`,
    /// clamped to between 1ms and one day;
    /// up to `burst_size` requests may go out back to back.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use moex_coupons::application::config::RateLimiterConfig;
    /// use moex_coupons::application::rate_limiter::RateLimiter;
    ///
    /// let config = RateLimiterConfig {
    ///     max_requests: 2,
    ///     period_seconds: 1,
    ///     burst_size: 1,
    /// };
    ///
    /// let limiter = RateLimiter::new(&config);
    /// ```
    #[must_use]
    pub fn new(config: &RateLimiterConfig) -> Self {
        let max_requests = u64::from(config.max_requests.max(1));
        let replenish_ms = (config.period_seconds.saturating_mul(1000) / max_requests)
            .clamp(1, MAX_REPLENISH_MILLIS);
        let replenish = Duration::from_millis(replenish_ms);
        let burst_size = NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN);

        let quota = Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst_size);

        Self {
            limiter: Arc::new(GovernorRateLimiter::direct(quota)),
        }
    }

    /// Waits until a request can be made according to the rate limit
    pub async fn wait(&self) {
        while self.limiter.check().is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Checks if a request can be made immediately, consuming a token if so
    #[must_use]
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limiter", &"GovernorRateLimiter")
            .finish()
    }
}
