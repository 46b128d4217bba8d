//! Mock generator and recording observer for queue tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use storyboard_core::{ImageReference, Scene, SceneStatus, Story};
use storyboard_error::{GenerationError, GenerationErrorKind, GenerationResult};
use storyboard_interface::{ImageGenerator, QueueEvent, QueueObserver};
use storyboard_rate_limit::RetryPolicy;
use tokio::time::Instant;

/// What the mock does for one call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Succeed with `img-N` for prompt `scene-N`
    Echo,
    /// Fail with a 429
    RateLimited,
    /// Fail with the given kind
    Fail(GenerationErrorKind),
    /// Never complete
    Hang,
    /// Wait, then behave like the inner response
    Delayed(Duration, Box<MockResponse>),
}

/// One recorded call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub prompt: String,
    pub style: String,
    pub at: Instant,
}

/// Scripted image generator.
///
/// Responses are consumed in order; once exhausted every call uses the default.
#[derive(Debug)]
pub struct MockImageGenerator {
    responses: Mutex<VecDeque<MockResponse>>,
    default: MockResponse,
    calls: Mutex<Vec<MockCall>>,
}

impl MockImageGenerator {
    pub fn new(default: MockResponse) -> Self {
        Self::scripted(Vec::new(), default)
    }

    pub fn scripted(responses: Vec<MockResponse>, default: MockResponse) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            default,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.prompt).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default.clone())
    }
}

async fn respond(response: MockResponse, prompt: &str) -> GenerationResult<ImageReference> {
    let mut response = response;
    loop {
        match response {
            MockResponse::Echo => {
                return Ok(ImageReference::from(prompt.replace("scene-", "img-")));
            }
            MockResponse::RateLimited => {
                return Err(GenerationError::new(GenerationErrorKind::RateLimited(
                    "RESOURCE_EXHAUSTED".to_string(),
                )));
            }
            MockResponse::Fail(kind) => return Err(GenerationError::new(kind)),
            MockResponse::Hang => std::future::pending::<()>().await,
            MockResponse::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                response = *inner;
            }
        }
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(&self, prompt: &str, style: &str) -> GenerationResult<ImageReference> {
        self.calls.lock().unwrap().push(MockCall {
            prompt: prompt.to_string(),
            style: style.to_string(),
            at: Instant::now(),
        });
        let response = self.next_response();
        respond(response, prompt).await
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Observer that keeps every event with the time it arrived.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(Instant, QueueEvent)>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<QueueEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub fn timed_events(&self) -> Vec<(Instant, QueueEvent)> {
        self.events.lock().unwrap().clone()
    }

    /// Indices of `SceneStarted` events, in arrival order.
    pub fn started(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                QueueEvent::SceneStarted { index, .. } => Some(index),
                _ => None,
            })
            .collect()
    }

    /// Arrival times of `SceneFinished` events.
    pub fn finished_at(&self) -> Vec<Instant> {
        self.timed_events()
            .into_iter()
            .filter_map(|(at, event)| match event {
                QueueEvent::SceneFinished { .. } => Some(at),
                _ => None,
            })
            .collect()
    }

    pub fn retries(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                QueueEvent::RetryScheduled { retry, .. } => Some(retry),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl QueueObserver for RecordingObserver {
    async fn on_event(&self, event: &QueueEvent) {
        self.events
            .lock()
            .unwrap()
            .push((Instant::now(), event.clone()));
    }
}

/// A pending scene whose prompt is `scene-N`.
pub fn pending(number: u32) -> Scene {
    Scene::new(number, format!("Action {}", number), format!("scene-{}", number))
}

/// A scene already rendered with `img-N`.
pub fn rendered(number: u32) -> Scene {
    pending(number).succeeded(ImageReference::from(format!("img-{}", number)))
}

/// A scene that failed on a previous run.
pub fn failed(number: u32) -> Scene {
    pending(number).failed()
}

pub fn story_with(scenes: Vec<Scene>) -> Story {
    Story {
        id: "story-1".to_string(),
        created_at: Utc::now(),
        title: "Night Run".to_string(),
        genre: "Thriller".to_string(),
        logline: "A courier outruns the city.".to_string(),
        style: "Cyberpunk".to_string(),
        characters: vec![],
        locations: vec![],
        scenes,
    }
}

pub fn policy() -> RetryPolicy {
    RetryPolicy::default()
}

pub fn statuses(story: &Story) -> Vec<SceneStatus> {
    story.scenes.iter().map(|scene| scene.status).collect()
}

pub fn images(story: &Story) -> Vec<Option<String>> {
    story
        .scenes
        .iter()
        .map(|scene| scene.image.as_ref().map(|image| image.as_str().to_string()))
        .collect()
}
