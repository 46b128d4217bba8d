//! The raw script as returned by the text model, before it becomes a [`Story`].

use crate::{Character, Location, Scene, Story};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scene as described by the text model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftScene {
    /// Number the model assigned; replaced by position on conversion
    #[serde(default)]
    pub scene_number: u32,
    /// Action and dialogue
    #[serde(alias = "description_cn")]
    pub description: String,
    /// Composed image prompt
    #[serde(alias = "visual_prompt_en")]
    pub visual_prompt: String,
}

/// The structured script returned by the text model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDraft {
    /// Film title
    pub title: String,
    /// Genre
    pub genre: String,
    /// One-sentence summary
    pub logline: String,
    /// Main characters
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Main settings; models sometimes omit the field
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Ordered scenes
    #[serde(default)]
    pub scenes: Vec<DraftScene>,
}

impl ScriptDraft {
    /// Materialize a new story from this draft.
    ///
    /// Assigns a fresh id and creation time, forces the requested style,
    /// renumbers scenes by position and starts every scene pending.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_core::{DraftScene, SceneStatus, ScriptDraft};
    ///
    /// let draft = ScriptDraft {
    ///     title: "T".into(),
    ///     genre: "G".into(),
    ///     logline: "L".into(),
    ///     characters: vec![],
    ///     locations: vec![],
    ///     scenes: vec![DraftScene { scene_number: 7, description: "d".into(), visual_prompt: "p".into() }],
    /// };
    /// let story = draft.into_story("Pixel Art");
    /// assert_eq!(story.style, "Pixel Art");
    /// assert_eq!(story.scenes[0].scene_number, 1);
    /// assert_eq!(story.scenes[0].status, SceneStatus::Pending);
    /// ```
    pub fn into_story(self, style: &str) -> Story {
        let scenes = self
            .scenes
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                Scene::new(index as u32 + 1, draft.description, draft.visual_prompt)
            })
            .collect();

        Story {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            title: self.title,
            genre: self.genre,
            logline: self.logline,
            style: style.to_string(),
            characters: self.characters,
            locations: self.locations,
            scenes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_locations_default_to_empty() {
        let json = r#"{
            "title": "T", "genre": "G", "logline": "L",
            "characters": [{"name": "A", "description": "d", "visual_prompt": "v"}],
            "scenes": [{"scene_number": 1, "description": "d", "visual_prompt": "p"}]
        }"#;
        let draft: ScriptDraft = serde_json::from_str(json).unwrap();
        assert!(draft.locations.is_empty());

        let story = draft.into_story("Cyberpunk");
        assert!(story.locations.is_empty());
        assert_eq!(story.characters.len(), 1);
        assert!(!story.id.is_empty());
    }

    #[test]
    fn each_draft_gets_a_distinct_id() {
        let draft = ScriptDraft {
            title: "T".into(),
            genre: "G".into(),
            logline: "L".into(),
            characters: vec![],
            locations: vec![],
            scenes: vec![],
        };
        let a = draft.clone().into_story("x");
        let b = draft.into_story("x");
        assert_ne!(a.id, b.id);
    }
}
