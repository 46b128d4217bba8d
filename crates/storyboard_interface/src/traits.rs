//! Capability traits.

use crate::QueueEvent;
use async_trait::async_trait;
use std::sync::Arc;
use storyboard_core::{ImageReference, Story, StoryRequest};
use storyboard_error::{GenerationResult, StoryboardResult};

/// Renders one image from a prompt and a style.
///
/// Implementations must set a [`storyboard_error::GenerationErrorKind`]
/// that classifies correctly, since the queue's retry policy branches on it.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image.
    async fn generate_image(&self, prompt: &str, style: &str) -> GenerationResult<ImageReference>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Turns a story idea into a structured script.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Produce a complete story whose scenes are all pending.
    async fn generate_script(&self, request: &StoryRequest) -> GenerationResult<Story>;
}

/// Receives progress from a generation run.
///
/// Events carry owned snapshots; the queue keeps building on its own copy.
#[async_trait]
pub trait QueueObserver: Send + Sync {
    /// Called after every state transition.
    async fn on_event(&self, event: &QueueEvent);
}

/// Key-value history of stories, keyed by story id.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Insert or replace a story.
    async fn save(&self, story: &Story) -> StoryboardResult<()>;

    /// Load one story.
    async fn load(&self, id: &str) -> StoryboardResult<Story>;

    /// All stories, newest first.
    async fn list(&self) -> StoryboardResult<Vec<Story>>;

    /// Remove one story and return what remains, newest first.
    async fn delete(&self, id: &str) -> StoryboardResult<Vec<Story>>;

    /// Remove everything.
    async fn clear(&self) -> StoryboardResult<()>;
}

#[async_trait]
impl<T: ImageGenerator + ?Sized> ImageGenerator for Arc<T> {
    async fn generate_image(&self, prompt: &str, style: &str) -> GenerationResult<ImageReference> {
        (**self).generate_image(prompt, style).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: ScriptGenerator + ?Sized> ScriptGenerator for Arc<T> {
    async fn generate_script(&self, request: &StoryRequest) -> GenerationResult<Story> {
        (**self).generate_script(request).await
    }
}

#[async_trait]
impl<T: QueueObserver + ?Sized> QueueObserver for Arc<T> {
    async fn on_event(&self, event: &QueueEvent) {
        (**self).on_event(event).await
    }
}
