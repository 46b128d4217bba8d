//! Scenes and their image-generation status.

use crate::ImageReference;
use serde::{Deserialize, Serialize};

/// Where a scene is in its image-generation lifecycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SceneStatus {
    /// Not yet requested
    #[default]
    Pending,
    /// Request in flight
    Loading,
    /// Image generated
    Success,
    /// Generation failed for this run
    Error,
}

impl SceneStatus {
    /// `Success` and `Error` need no further automatic action.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SceneStatus::Success | SceneStatus::Error)
    }
}

/// One narrative beat and its target image.
///
/// Scenes are never mutated in place; every transition returns a new value.
///
/// # Examples
///
/// ```
/// use storyboard_core::{ImageReference, Scene, SceneStatus};
///
/// let scene = Scene::new(1, "A boy runs.", "A boy with red hair, running.");
/// assert!(scene.needs_generation());
///
/// let done = scene.succeeded(ImageReference::from("img-1".to_string()));
/// assert_eq!(done.status, SceneStatus::Success);
/// assert!(!done.needs_generation());
/// assert_eq!(scene.status, SceneStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// One-based position in the story
    pub scene_number: u32,
    /// Action and dialogue
    #[serde(alias = "description_cn")]
    pub description: String,
    /// Prompt sent to the image model
    #[serde(alias = "visual_prompt_en")]
    pub visual_prompt: String,
    /// Generated image, once available
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageReference>,
    /// Generation status
    #[serde(default, alias = "imageStatus")]
    pub status: SceneStatus,
}

impl Scene {
    /// A pending scene without an image.
    pub fn new(
        scene_number: u32,
        description: impl Into<String>,
        visual_prompt: impl Into<String>,
    ) -> Self {
        Self {
            scene_number,
            description: description.into(),
            visual_prompt: visual_prompt.into(),
            image: None,
            status: SceneStatus::Pending,
        }
    }

    /// True unless the scene already succeeded with a non-empty image.
    pub fn needs_generation(&self) -> bool {
        let has_image = self.image.as_ref().is_some_and(|image| !image.is_empty());
        !(self.status == SceneStatus::Success && has_image)
    }

    /// Copy marked as in flight.
    pub fn loading(&self) -> Self {
        Self {
            status: SceneStatus::Loading,
            ..self.clone()
        }
    }

    /// Copy marked successful with the given image.
    pub fn succeeded(&self, image: ImageReference) -> Self {
        Self {
            status: SceneStatus::Success,
            image: Some(image),
            ..self.clone()
        }
    }

    /// Copy marked failed. Any previous image is kept.
    pub fn failed(&self) -> Self {
        Self {
            status: SceneStatus::Error,
            ..self.clone()
        }
    }

    /// Copy with a new description.
    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }

    /// Copy with a new visual prompt.
    pub fn with_visual_prompt(&self, visual_prompt: impl Into<String>) -> Self {
        Self {
            visual_prompt: visual_prompt.into(),
            ..self.clone()
        }
    }

    /// Copy renumbered to the given one-based position.
    pub fn with_scene_number(&self, scene_number: u32) -> Self {
        Self {
            scene_number,
            ..self.clone()
        }
    }
}
