//! Generative-model adapters for the storyboard generator.
//!
//! [`GeminiClient`] implements both [`ScriptGenerator`] and
//! [`ImageGenerator`] against the Gemini `generateContent` REST endpoint.
//! Failures are classified into [`storyboard_error::GenerationErrorKind`]
//! values so the generation queue can decide what to retry.
//!
//! [`ScriptGenerator`]: storyboard_interface::ScriptGenerator
//! [`ImageGenerator`]: storyboard_interface::ImageGenerator

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod gemini;

pub use extraction::extract_json_object;
pub use gemini::{
    API_KEY_VARS, Candidate, Content, GeminiClient, GenerateContentRequest,
    GenerateContentRequestBuilder, GenerateContentResponse, GenerationConfig,
    GenerationConfigBuilder, InlineData, Part, classify_status, compose_image_prompt,
    director_prompt, parse_image_response, parse_script_text, script_schema,
};
