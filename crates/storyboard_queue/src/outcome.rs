//! Results of queue operations.

use storyboard_core::Story;
use storyboard_error::GenerationError;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Scenes that finished with an image
    pub generated: usize,
    /// Scenes that already had an image and were not requested
    pub skipped: usize,
    /// Scenes that finished in error
    pub failed: usize,
    /// Rate-limit retries across all scenes
    pub retries: u32,
}

/// Final state of a run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The story with every processed scene in a terminal status
    pub story: Story,
    /// What happened along the way
    pub stats: RunStats,
    /// True if the run stopped early on cancellation
    pub cancelled: bool,
}

/// Result of a manual single-scene regeneration.
#[derive(Debug, Clone)]
pub struct Regenerated {
    /// Story with the regenerated scene replaced
    pub story: Story,
    /// Why the scene ended in error, if it did
    pub error: Option<GenerationError>,
}
