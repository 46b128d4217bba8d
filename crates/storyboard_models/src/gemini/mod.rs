//! Google Gemini integration.

mod client;
mod dto;
mod prompt;
mod response;

pub use client::{API_KEY_VARS, GeminiClient};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentRequestBuilder,
    GenerateContentResponse, GenerationConfig, GenerationConfigBuilder, InlineData, Part,
};
pub use prompt::{compose_image_prompt, director_prompt, script_schema};
pub use response::{classify_status, parse_image_response, parse_script_text};
