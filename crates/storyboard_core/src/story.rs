//! The story aggregate.

use crate::{Character, Location, Scene, SceneStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storyboard_error::{QueueError, QueueErrorKind};

/// How far a story has progressed, used when reopening it from history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum StoryStage {
    /// Script exists, no scene has an image yet
    Draft,
    /// At least one scene rendered successfully
    Rendered,
}

/// A generated storyboard: script plus per-scene images.
///
/// Scene order is significant and `scene_number` tracks position + 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Stable identifier, also the history key
    pub id: String,
    /// Creation time, used for recency ordering
    #[serde(with = "chrono::serde::ts_milliseconds", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Film title
    pub title: String,
    /// Genre
    pub genre: String,
    /// One-paragraph summary
    pub logline: String,
    /// Free-text visual style passed to every image request
    pub style: String,
    /// Main characters
    pub characters: Vec<Character>,
    /// Main settings
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Ordered scenes
    pub scenes: Vec<Scene>,
}

impl Story {
    /// Draft if no scene has succeeded yet.
    pub fn stage(&self) -> StoryStage {
        if self
            .scenes
            .iter()
            .any(|scene| scene.status == SceneStatus::Success)
        {
            StoryStage::Rendered
        } else {
            StoryStage::Draft
        }
    }

    /// Scenes still needing an image, by zero-based position.
    pub fn pending_indices(&self) -> Vec<usize> {
        self.scenes
            .iter()
            .enumerate()
            .filter(|(_, scene)| scene.needs_generation())
            .map(|(index, _)| index)
            .collect()
    }

    /// Count of scenes with the given status.
    pub fn count_status(&self, status: SceneStatus) -> usize {
        self.scenes.iter().filter(|scene| scene.status == status).count()
    }

    /// Copy with the scene at `index` replaced.
    ///
    /// # Errors
    ///
    /// Fails when `index` is outside the scene list.
    pub fn with_scene(&self, index: usize, scene: Scene) -> Result<Self, QueueError> {
        if index >= self.scenes.len() {
            return Err(QueueError::new(QueueErrorKind::SceneOutOfRange {
                index,
                len: self.scenes.len(),
            }));
        }
        let scenes = self
            .scenes
            .iter()
            .enumerate()
            .map(|(i, existing)| if i == index { scene.clone() } else { existing.clone() })
            .collect();
        Ok(Self {
            scenes,
            ..self.clone()
        })
    }

    /// Copy with the whole scene list replaced.
    pub fn with_scenes(&self, scenes: Vec<Scene>) -> Self {
        Self {
            scenes,
            ..self.clone()
        }
    }

    /// Copy with the character at `index` replaced. Out-of-range indices leave the story unchanged.
    pub fn with_character(&self, index: usize, character: Character) -> Self {
        let mut characters = self.characters.clone();
        if let Some(slot) = characters.get_mut(index) {
            *slot = character;
        }
        Self {
            characters,
            ..self.clone()
        }
    }

    /// Copy with the location at `index` replaced. Out-of-range indices leave the story unchanged.
    pub fn with_location(&self, index: usize, location: Location) -> Self {
        let mut locations = self.locations.clone();
        if let Some(slot) = locations.get_mut(index) {
            *slot = location;
        }
        Self {
            locations,
            ..self.clone()
        }
    }

    /// Copy with a new title.
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Copy with a new genre.
    pub fn with_genre(&self, genre: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            ..self.clone()
        }
    }

    /// Copy with a new logline.
    pub fn with_logline(&self, logline: impl Into<String>) -> Self {
        Self {
            logline: logline.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageReference;

    fn story() -> Story {
        Story {
            id: "s1".to_string(),
            created_at: Utc::now(),
            title: "Night Run".to_string(),
            genre: "Thriller".to_string(),
            logline: "A courier outruns the city.".to_string(),
            style: "Cyberpunk".to_string(),
            characters: vec![Character {
                name: "Kai".to_string(),
                description: "Courier".to_string(),
                visual_prompt: "A boy with red spiky hair".to_string(),
            }],
            locations: vec![],
            scenes: vec![Scene::new(1, "Runs", "p1"), Scene::new(2, "Hides", "p2")],
        }
    }

    #[test]
    fn with_scene_leaves_original_and_siblings_untouched() {
        let original = story();
        let image = ImageReference::from("img-1".to_string());
        let updated = original
            .with_scene(0, original.scenes[0].succeeded(image.clone()))
            .unwrap();

        assert_eq!(original.scenes[0].status, SceneStatus::Pending);
        assert_eq!(updated.scenes[0].image, Some(image));
        assert_eq!(updated.scenes[1], original.scenes[1]);
        assert_eq!(updated.characters, original.characters);
    }

    #[test]
    fn with_scene_out_of_range() {
        let original = story();
        let err = original.with_scene(5, Scene::new(6, "x", "y")).unwrap_err();
        assert_eq!(err.kind, QueueErrorKind::SceneOutOfRange { index: 5, len: 2 });
    }

    #[test]
    fn stage_tracks_success() {
        let draft = story();
        assert_eq!(draft.stage(), StoryStage::Draft);

        let rendered = draft
            .with_scene(1, draft.scenes[1].succeeded(ImageReference::from("i".to_string())))
            .unwrap();
        assert_eq!(rendered.stage(), StoryStage::Rendered);
        assert_eq!(rendered.pending_indices(), vec![0]);
    }

    #[test]
    fn character_edit_is_copy_on_write() {
        let original = story();
        let edited = original.with_character(0, original.characters[0].with_name("Mika"));
        assert_eq!(edited.characters[0].name, "Mika");
        assert_eq!(original.characters[0].name, "Kai");
        assert_eq!(edited.with_character(9, original.characters[0].clone()), edited);
    }

    #[test]
    fn created_at_serializes_as_millis() {
        let json = serde_json::to_value(story()).unwrap();
        assert!(json["created_at"].is_i64());
    }

    #[test]
    fn reads_browser_history_documents() {
        let json = r#"{
            "id": "1718000000000",
            "createdAt": 1718000000000,
            "title": "Night Run",
            "genre": "Thriller",
            "logline": "A courier outruns the city.",
            "style": "Cyberpunk",
            "characters": [
                {"name": "Kai", "description_cn": "Courier", "visual_prompt_en": "red hair"}
            ],
            "scenes": [
                {"scene_number": 1, "description_cn": "Runs", "visual_prompt_en": "p1",
                 "imageUrl": "data:image/png;base64,AAAA", "imageStatus": "success"},
                {"scene_number": 2, "description_cn": "Hides", "visual_prompt_en": "p2",
                 "imageStatus": "pending"}
            ]
        }"#;
        let story: Story = serde_json::from_str(json).unwrap();

        assert!(story.locations.is_empty());
        assert_eq!(story.created_at.timestamp_millis(), 1_718_000_000_000);
        assert_eq!(story.characters[0].visual_prompt, "red hair");
        assert_eq!(story.scenes[0].status, SceneStatus::Success);
        assert_eq!(story.pending_indices(), vec![1]);
    }
}
