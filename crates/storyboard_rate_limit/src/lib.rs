//! Retry policy, client-side rate limiting and configuration.
//!
//! The generation queue paces image requests with fixed delays taken from
//! [`RetryPolicy`]. Provider clients additionally throttle themselves with a
//! [`RateLimiter`] built from the configured [`TierConfig`].
//!
//! ```ignore
//! use storyboard_rate_limit::StoryboardConfig;
//!
//! let config = StoryboardConfig::load()?;
//! assert_eq!(*config.retry.max_retries(), 3);
//! ```

mod config;
mod limiter;
mod policy;

pub use config::{GeminiSettings, StorageSettings, StoryboardConfig};
pub use limiter::{RateLimiter, RateLimiterGuard, TierConfig};
pub use policy::RetryPolicy;
