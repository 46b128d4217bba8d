//! Fixed retry and pacing policy for image generation.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;

/// How the generation queue retries and paces image requests.
///
/// Rate-limited attempts are retried up to `max_retries` times with a fixed
/// `rate_limit_cooldown_ms` pause. Every finished scene is followed by a
/// fixed `inter_scene_delay_ms` pause.
///
/// # Examples
///
/// ```
/// use storyboard_rate_limit::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.max_retries(), 3);
/// assert_eq!(policy.cooldown(), Duration::from_millis(15_000));
/// assert_eq!(policy.inter_scene_delay(), Duration::from_millis(4_000));
/// assert_eq!(policy.backoff().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RetryPolicy {
    /// Additional attempts after the first rate-limited failure
    #[serde(default = "default_max_retries")]
    max_retries: u32,
    /// Pause before each retry, in milliseconds
    #[serde(default = "default_cooldown_ms")]
    rate_limit_cooldown_ms: u64,
    /// Pause after each finished scene, in milliseconds
    #[serde(default = "default_inter_scene_delay_ms")]
    inter_scene_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_cooldown_ms() -> u64 {
    15_000
}

fn default_inter_scene_delay_ms() -> u64 {
    4_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            rate_limit_cooldown_ms: default_cooldown_ms(),
            inter_scene_delay_ms: default_inter_scene_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// Policy with explicit values.
    pub fn new(max_retries: u32, rate_limit_cooldown_ms: u64, inter_scene_delay_ms: u64) -> Self {
        Self {
            max_retries,
            rate_limit_cooldown_ms,
            inter_scene_delay_ms,
        }
    }

    /// Cooldown before a rate-limit retry.
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.rate_limit_cooldown_ms)
    }

    /// Pause after a scene reaches a terminal status.
    pub fn inter_scene_delay(&self) -> Duration {
        Duration::from_millis(self.inter_scene_delay_ms)
    }

    /// Delays between attempts for one scene: `max_retries` fixed cooldowns.
    pub fn backoff(&self) -> std::iter::Take<FixedInterval> {
        FixedInterval::from_millis(self.rate_limit_cooldown_ms).take(self.max_retries as usize)
    }

    /// Total attempts allowed for one scene.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_yields_fixed_cooldowns() {
        let policy = RetryPolicy::new(2, 500, 10);
        let delays: Vec<_> = policy.backoff().collect();
        assert_eq!(delays, vec![Duration::from_millis(500); 2]);
        assert_eq!(policy.max_attempts(), 3);
    }

    #[test]
    fn zero_retries_means_single_attempt() {
        let policy = RetryPolicy::new(0, 15_000, 4_000);
        assert_eq!(policy.backoff().count(), 0);
        assert_eq!(policy.max_attempts(), 1);
    }
}
