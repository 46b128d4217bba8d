//! Sequential scene rendering.

use crate::guard::{ActiveRuns, RunGuard};
use crate::{Regenerated, RunOutcome, RunStats};
use std::sync::atomic::{AtomicU32, Ordering};
use storyboard_core::{ImageReference, Scene, Story};
use storyboard_error::{GenerationResult, QueueError, QueueErrorKind, StoryboardResult};
use storyboard_interface::{ImageGenerator, QueueEvent, QueueObserver};
use storyboard_rate_limit::RetryPolicy;
use tokio_retry2::{Retry, RetryError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Renders a story's scenes one at a time.
///
/// Scenes that already succeeded with an image are skipped, so running the
/// queue again on a partially rendered story only fills the gaps. Scenes in
/// `error` are attempted again.
#[derive(Debug)]
pub struct GenerationQueue<G> {
    generator: G,
    policy: RetryPolicy,
    active: ActiveRuns,
}

impl<G: ImageGenerator> GenerationQueue<G> {
    /// Queue rendering through `generator` with the given policy.
    pub fn new(generator: G, policy: RetryPolicy) -> Self {
        Self {
            generator,
            policy,
            active: ActiveRuns::default(),
        }
    }

    /// The retry and pacing policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The underlying image generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// True while a run or regeneration holds `story_id`.
    pub fn is_running(&self, story_id: &str) -> bool {
        self.active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains(story_id)
    }

    /// Render every scene that needs an image.
    ///
    /// # Errors
    ///
    /// Fails with [`QueueErrorKind::AlreadyRunning`] if the story is busy.
    /// Per-scene generation failures never fail the run; they are recorded
    /// on the scene.
    pub async fn run(
        &self,
        story: &Story,
        observer: &dyn QueueObserver,
    ) -> StoryboardResult<RunOutcome> {
        self.run_with_cancel(story, observer, CancellationToken::new())
            .await
    }

    /// Like [`run`](Self::run), stopping early when `cancel` fires.
    ///
    /// Cancellation is honoured while waiting on the image call, the
    /// rate-limit cooldown and the inter-scene delay. The scene in flight
    /// is restored to its value from before the run.
    #[instrument(skip_all, fields(story_id = %story.id, scenes = story.scenes.len()))]
    pub async fn run_with_cancel(
        &self,
        story: &Story,
        observer: &dyn QueueObserver,
        cancel: CancellationToken,
    ) -> StoryboardResult<RunOutcome> {
        let _guard = RunGuard::acquire(&self.active, &story.id)?;
        info!(pending = story.pending_indices().len(), "Starting generation run");

        let mut working = story.clone();
        let mut stats = RunStats::default();
        let mut cancelled = false;

        for index in 0..working.scenes.len() {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let before = working.scenes[index].clone();
            if !before.needs_generation() {
                debug!(scene_number = before.scene_number, "Scene already rendered, skipping");
                stats.skipped += 1;
                continue;
            }

            working = working.with_scene(index, before.loading())?;
            observer
                .on_event(&QueueEvent::SceneStarted {
                    index,
                    scenes: working.scenes.clone(),
                })
                .await;

            let attempts = AtomicU32::new(0);
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = self.render(index, &before, &story.style, observer, &attempts) => Some(result),
            };
            stats.retries += attempts.load(Ordering::SeqCst).saturating_sub(1);

            let Some(result) = result else {
                info!(scene_number = before.scene_number, "Run cancelled during image request");
                working = working.with_scene(index, before)?;
                cancelled = true;
                break;
            };

            let (finished, error) = match result {
                Ok(image) => {
                    stats.generated += 1;
                    (before.succeeded(image), None)
                }
                Err(error) => {
                    warn!(scene_number = before.scene_number, error = %error, "Scene failed");
                    stats.failed += 1;
                    (before.failed(), Some(error))
                }
            };
            let status = finished.status;
            working = working.with_scene(index, finished)?;
            observer
                .on_event(&QueueEvent::SceneFinished {
                    index,
                    status,
                    error,
                    scenes: working.scenes.clone(),
                })
                .await;

            let more_to_render = working.scenes[index + 1..]
                .iter()
                .any(Scene::needs_generation);
            if more_to_render {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        cancelled = true;
                        break;
                    }
                    _ = tokio::time::sleep(self.policy.inter_scene_delay()) => {}
                }
            }
        }

        observer
            .on_event(&QueueEvent::RunCompleted {
                scenes: working.scenes.clone(),
                cancelled,
            })
            .await;
        info!(
            generated = stats.generated,
            skipped = stats.skipped,
            failed = stats.failed,
            retries = stats.retries,
            cancelled,
            "Generation run finished"
        );

        Ok(RunOutcome {
            story: working,
            stats,
            cancelled,
        })
    }

    /// Attempt one scene, retrying rate-limited failures after the cooldown.
    async fn render(
        &self,
        index: usize,
        scene: &Scene,
        style: &str,
        observer: &dyn QueueObserver,
        attempts: &AtomicU32,
    ) -> GenerationResult<ImageReference> {
        let max_retries = *self.policy.max_retries();
        let cooldown = self.policy.cooldown();
        let generator = &self.generator;

        Retry::spawn(self.policy.backoff(), move || async move {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(scene_number = scene.scene_number, attempt, "Requesting image");

            match generator.generate_image(&scene.visual_prompt, style).await {
                Ok(image) => Ok(image),
                Err(error) if error.is_rate_limited() && attempt <= max_retries => {
                    observer
                        .on_event(&QueueEvent::RetryScheduled {
                            index,
                            retry: attempt,
                            delay: cooldown,
                            error: error.clone(),
                        })
                        .await;
                    Err(RetryError::Transient {
                        err: error,
                        retry_after: None,
                    })
                }
                Err(error) => Err(RetryError::Permanent(error)),
            }
        })
        .await
    }

    /// Regenerate a single scene once, optionally with a new prompt.
    ///
    /// There is no retry. The scene passes through `loading` and ends in
    /// `success` or `error`; each step replaces the whole scene.
    ///
    /// # Errors
    ///
    /// Fails if the story is busy or `index` is out of range. A generation
    /// failure is reported in [`Regenerated::error`], not as an error.
    #[instrument(skip(self, story, prompt_override, observer), fields(story_id = %story.id))]
    pub async fn regenerate_scene(
        &self,
        story: &Story,
        index: usize,
        prompt_override: Option<&str>,
        observer: &dyn QueueObserver,
    ) -> StoryboardResult<Regenerated> {
        let _guard = RunGuard::acquire(&self.active, &story.id)?;

        let scene = story.scenes.get(index).ok_or_else(|| {
            QueueError::new(QueueErrorKind::SceneOutOfRange {
                index,
                len: story.scenes.len(),
            })
        })?;
        let base = match prompt_override {
            Some(prompt) => scene.with_visual_prompt(prompt),
            None => scene.clone(),
        };

        let working = story.with_scene(index, base.loading())?;
        observer
            .on_event(&QueueEvent::SceneStarted {
                index,
                scenes: working.scenes.clone(),
            })
            .await;

        let result = self
            .generator
            .generate_image(&base.visual_prompt, &story.style)
            .await;
        let (finished, error) = match result {
            Ok(image) => (base.succeeded(image), None),
            Err(error) => {
                warn!(scene_number = base.scene_number, error = %error, "Regeneration failed");
                (base.failed(), Some(error))
            }
        };
        let status = finished.status;
        let working = working.with_scene(index, finished)?;
        observer
            .on_event(&QueueEvent::SceneFinished {
                index,
                status,
                error: error.clone(),
                scenes: working.scenes.clone(),
            })
            .await;

        Ok(Regenerated {
            story: working,
            error,
        })
    }
}
