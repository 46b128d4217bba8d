//! Client-side request throttling using governor and a Tokio semaphore.
//!
//! The limiter coordinates two limits:
//! - **RPM** (requests per minute): enforced via governor (GCRA)
//! - **Concurrent requests**: enforced via a Tokio semaphore

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Quota tier for a provider.
///
/// ```toml
/// [gemini.tier]
/// name = "Free"
/// rpm = 15
/// max_concurrent = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TierConfig {
    /// Name of the tier (e.g., "Free", "Pay-as-you-go")
    pub name: String,
    /// Requests per minute; `None` means unlimited
    #[serde(default)]
    pub rpm: Option<u32>,
    /// Maximum concurrent requests; `None` means unlimited
    #[serde(default)]
    pub max_concurrent: Option<u32>,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            name: "Free".to_string(),
            rpm: Some(15),
            max_concurrent: Some(1),
        }
    }
}

impl TierConfig {
    /// A tier with no limits.
    pub fn unlimited(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rpm: None,
            max_concurrent: None,
        }
    }
}

/// Rate limiter enforcing a [`TierConfig`].
///
/// # Example
///
/// ```rust,ignore
/// let limiter = RateLimiter::new(&TierConfig::default());
/// let guard = limiter.acquire().await;
/// // make the API call...
/// drop(guard); // releases the concurrent slot
/// ```
#[derive(Debug, Clone)]
pub struct RateLimiter {
    tier_name: String,
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent_semaphore: Arc<Semaphore>,
}

impl RateLimiter {
    /// Create a limiter from a tier.
    pub fn new(tier: &TierConfig) -> Self {
        let rpm_limiter = tier.rpm.and_then(NonZeroU32::new).map(|n| {
            let quota = Quota::per_minute(n);
            Arc::new(GovernorRateLimiter::direct(quota))
        });

        let max_concurrent = tier
            .max_concurrent
            .map(|n| n.max(1) as usize)
            .unwrap_or(Semaphore::MAX_PERMITS);

        Self {
            tier_name: tier.name.clone(),
            rpm_limiter,
            concurrent_semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Name of the tier this limiter enforces.
    pub fn tier_name(&self) -> &str {
        &self.tier_name
    }

    /// Wait until a request is allowed.
    ///
    /// Returns a guard that releases the concurrent slot when dropped.
    pub async fn acquire(&self) -> RateLimiterGuard {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        // Concurrent slot last so it is not held while waiting on quota
        let permit = self.concurrent_semaphore.clone().acquire_owned().await.ok();
        debug!(tier = %self.tier_name, "Rate limit permit acquired");

        RateLimiterGuard { _permit: permit }
    }

    /// Number of concurrent slots currently free.
    pub fn available_permits(&self) -> usize {
        self.concurrent_semaphore.available_permits()
    }
}

/// Releases the concurrent request slot on drop.
#[derive(Debug)]
pub struct RateLimiterGuard {
    _permit: Option<OwnedSemaphorePermit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn guard_holds_concurrent_slot() {
        let limiter = RateLimiter::new(&TierConfig {
            name: "Test".to_string(),
            rpm: None,
            max_concurrent: Some(2),
        });
        assert_eq!(limiter.available_permits(), 2);

        let guard = limiter.acquire().await;
        assert_eq!(limiter.available_permits(), 1);

        drop(guard);
        assert_eq!(limiter.available_permits(), 2);
    }

    #[tokio::test]
    async fn unlimited_tier_never_blocks() {
        let limiter = RateLimiter::new(&TierConfig::unlimited("local"));
        let _a = limiter.acquire().await;
        let _b = limiter.acquire().await;
        assert_eq!(limiter.tier_name(), "local");
    }
}
