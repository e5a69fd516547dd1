//! Request admission for the Macromeasures client.
//!
//! Each provider endpoint owns a token bucket that admits `requests` calls
//! per `window`, refilling one slot every `window / requests`. A caller that
//! finds the bucket empty waits on the call path until a slot frees up.
//! Buckets are lock-free and safe to share across tasks.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// A request budget: at most `requests` calls per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub requests: u32,
    pub window: Duration,
}

impl RateLimit {
    #[must_use]
    pub const fn new(requests: u32, window: Duration) -> Self {
        Self { requests, window }
    }

    #[must_use]
    pub const fn per_minute(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(60))
    }

    /// Converts the budget to a `governor` quota. A zero budget or zero
    /// window means "unlimited" and yields `None`.
    fn quota(self) -> Option<Quota> {
        let burst = NonZeroU32::new(self.requests)?;
        Quota::with_period(self.window / self.requests).map(|q| q.allow_burst(burst))
    }
}

/// Token bucket shared by every lookup on one endpoint.
pub(crate) struct Throttle {
    name: &'static str,
    limiter: DefaultDirectRateLimiter,
}

impl Throttle {
    /// Returns `None` when `limit` does not restrict anything.
    pub(crate) fn new(name: &'static str, limit: RateLimit) -> Option<Self> {
        let quota = limit.quota()?;
        Some(Self {
            name,
            limiter: RateLimiter::direct(quota),
        })
    }

    /// Takes one slot, waiting for the bucket to refill if it is empty.
    pub(crate) async fn acquire(&self) {
        if let Err(not_until) = self.limiter.check() {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            tracing::debug!(
                throttle = self.name,
                wait = ?wait,
                "rate limit budget exhausted, waiting for a slot"
            );
            self.limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle").field("name", &self.name).finish_non_exhaustive()
    }
}
