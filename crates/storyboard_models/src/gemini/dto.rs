//! Gemini `generateContent` wire types.
//!
//! Only the fields the storyboard generator reads or writes are modelled;
//! unknown response fields are ignored.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Inline binary payload, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type such as `image/png`
    #[serde(default)]
    mime_type: String,
    /// Base64 payload
    #[serde(default)]
    data: String,
}

impl InlineData {
    /// Inline data from its parts.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// One part of a content turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Binary payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline-data part.
    pub fn from_inline(data: InlineData) -> Self {
        Self {
            text: None,
            inline_data: Some(data),
        }
    }
}

/// A content turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Content {
    /// `user` or `model`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    /// A user turn containing one text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::from_text(text)],
        }
    }

    /// A turn with explicit parts.
    pub fn from_parts(role: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role.into()),
            parts,
        }
    }
}

/// Sampling and output controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into, strip_option), default)]
pub struct GenerationConfig {
    /// Requested output MIME type
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    /// OpenAPI-style schema the output must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GenerateContentRequest {
    /// Conversation turns
    contents: Vec<Content>,
    /// Output controls
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Creates a new builder for `GenerateContentRequest`.
    pub fn builder() -> GenerateContentRequestBuilder {
        GenerateContentRequestBuilder::default()
    }
}

/// One generated alternative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content; absent when blocked
    #[serde(default)]
    content: Option<Content>,
    /// Why generation stopped (e.g. `STOP`, `SAFETY`)
    #[serde(default)]
    finish_reason: Option<String>,
}

impl Candidate {
    /// Candidate with content and a finish reason.
    pub fn new(content: Option<Content>, finish_reason: Option<String>) -> Self {
        Self {
            content,
            finish_reason,
        }
    }

    /// Parts of the content, empty when there is none.
    pub fn parts(&self) -> &[Part] {
        self.content
            .as_ref()
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }
}

/// Response of a `generateContent` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerateContentResponse {
    /// Alternatives, usually exactly one
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Response wrapping the given candidates.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Concatenated text of the first candidate, if any text was returned.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub(crate) error: ErrorBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) status: String,
}
