//! Types shared between the queue and its observers.

use std::time::Duration;
use storyboard_core::{Scene, SceneStatus};
use storyboard_error::GenerationError;

/// A progress notification from the generation queue.
#[derive(Debug, Clone)]
pub enum QueueEvent {
    /// Scene entered `loading`
    SceneStarted {
        /// Zero-based position
        index: usize,
        /// Snapshot after the transition
        scenes: Vec<Scene>,
    },
    /// A rate-limited attempt failed and another follows after `delay`
    RetryScheduled {
        /// Zero-based position
        index: usize,
        /// Retry number, starting at 1
        retry: u32,
        /// Cooldown before the retry
        delay: Duration,
        /// The failure that triggered the retry
        error: GenerationError,
    },
    /// Scene reached a terminal status
    SceneFinished {
        /// Zero-based position
        index: usize,
        /// `Success` or `Error`
        status: SceneStatus,
        /// Failure reason when `status` is `Error`
        error: Option<GenerationError>,
        /// Snapshot after the transition
        scenes: Vec<Scene>,
    },
    /// The run ended
    RunCompleted {
        /// Final scene list
        scenes: Vec<Scene>,
        /// True if stopped by cancellation
        cancelled: bool,
    },
}

impl QueueEvent {
    /// Scene snapshot carried by this event, if any.
    pub fn scenes(&self) -> Option<&[Scene]> {
        match self {
            QueueEvent::SceneStarted { scenes, .. }
            | QueueEvent::SceneFinished { scenes, .. }
            | QueueEvent::RunCompleted { scenes, .. } => Some(scenes),
            QueueEvent::RetryScheduled { .. } => None,
        }
    }
}
