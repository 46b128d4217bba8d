//! Reusable story entities.

use serde::{Deserialize, Serialize};

/// A character whose visual prompt is reused verbatim in every scene they appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character name
    pub name: String,
    /// Personality and role
    #[serde(alias = "description_cn")]
    pub description: String,
    /// Permanent physical description for image prompts
    #[serde(alias = "visual_prompt_en")]
    pub visual_prompt: String,
}

impl Character {
    /// Copy with a new name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
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
}

/// A setting whose visual prompt is reused in every scene that takes place there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location name
    pub name: String,
    /// Short description
    #[serde(alias = "description_cn")]
    pub description: String,
    /// Permanent background description for image prompts
    #[serde(alias = "visual_prompt_en")]
    pub visual_prompt: String,
}

impl Location {
    /// Copy with a new name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
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
}
