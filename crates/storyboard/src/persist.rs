//! Saving progress while a run is underway.

use async_trait::async_trait;
use storyboard_core::Story;
use storyboard_interface::{QueueEvent, QueueObserver, StoryRepository};
use tracing::{debug, warn};

/// Saves the story after every finished scene, then forwards the event.
///
/// The queue itself never persists. Wrapping an observer in this type makes
/// an interrupted run resumable from history. Save failures are logged and
/// do not stop the run.
#[derive(Debug)]
pub struct PersistingObserver<R, O> {
    repository: R,
    story: Story,
    inner: O,
}

impl<R: StoryRepository, O: QueueObserver> PersistingObserver<R, O> {
    /// Persist snapshots of `story` into `repository`, forwarding to `inner`.
    pub fn new(repository: R, story: Story, inner: O) -> Self {
        Self {
            repository,
            story,
            inner,
        }
    }
}

#[async_trait]
impl<R: StoryRepository, O: QueueObserver> QueueObserver for PersistingObserver<R, O> {
    async fn on_event(&self, event: &QueueEvent) {
        if let QueueEvent::SceneFinished { scenes, .. } | QueueEvent::RunCompleted { scenes, .. } =
            event
        {
            let snapshot = self.story.with_scenes(scenes.clone());
            match self.repository.save(&snapshot).await {
                Ok(()) => debug!(story_id = %snapshot.id, "Progress saved"),
                Err(e) => warn!(story_id = %snapshot.id, error = %e, "Failed to save progress"),
            }
        }
        self.inner.on_event(event).await;
    }
}
