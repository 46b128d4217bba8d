//! Gemini REST client.

use super::dto::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfigBuilder};
use super::prompt::{compose_image_prompt, director_prompt, script_schema};
use super::response::{classify_status, parse_image_response, parse_script_text};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use storyboard_core::{ImageReference, Story, StoryRequest};
use storyboard_error::{GenerationError, GenerationErrorKind, GenerationResult};
use storyboard_interface::{ImageGenerator, ScriptGenerator};
use storyboard_rate_limit::{GeminiSettings, RateLimiter};
use tracing::{debug, info, instrument};

/// Environment variables searched for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Client for Gemini text and image generation.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    settings: GeminiSettings,
    rate_limiter: RateLimiter,
}

impl GeminiClient {
    /// Creates a client using the API key from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::MissingApiKey`] when none of
    /// [`API_KEY_VARS`] is set, and a request error if the HTTP client
    /// cannot be initialized.
    #[instrument(skip_all)]
    pub fn new(settings: GeminiSettings) -> GenerationResult<Self> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .unwrap_or_default();
        Self::with_api_key(api_key, settings)
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::MissingApiKey`] for a blank key.
    #[instrument(skip_all)]
    pub fn with_api_key(api_key: impl Into<String>, settings: GeminiSettings) -> GenerationResult<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MissingApiKey));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Request(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;
        let rate_limiter = RateLimiter::new(&settings.tier);

        debug!(
            script_model = %settings.script_model,
            image_model = %settings.image_model,
            tier = %settings.tier.name,
            "Created Gemini client"
        );

        Ok(Self {
            client,
            api_key,
            settings,
            rate_limiter,
        })
    }

    /// Settings this client was created with.
    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Send one `generateContent` call, throttled by the tier limiter.
    #[instrument(skip(self, model, request), fields(model = %model))]
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> GenerationResult<GenerateContentResponse> {
        let _guard = self.rate_limiter.acquire().await;

        let url = self.endpoint(model);
        debug!(url = %url, "Sending Gemini request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Request(format!(
                    "Request failed: {}",
                    e
                )))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let kind = classify_status(status, &body);
            debug!(status, class = %kind.class(), "Gemini request failed");
            return Err(GenerationError::new(kind));
        }

        response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::Request(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }
}

#[async_trait]
impl ScriptGenerator for GeminiClient {
    #[instrument(skip(self, request), fields(frames = request.frame_count(), style = %request.style()))]
    async fn generate_script(&self, request: &StoryRequest) -> GenerationResult<Story> {
        let config = GenerationConfigBuilder::default()
            .response_mime_type("application/json")
            .response_schema(script_schema())
            .temperature(self.settings.temperature)
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Request(e.to_string())))?;
        let body = GenerateContentRequest::builder()
            .contents(vec![Content::user_text(director_prompt(request))])
            .generation_config(config)
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Request(e.to_string())))?;

        let response = self
            .generate_content(&self.settings.script_model, &body)
            .await?;
        let text = response
            .text()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

        let story = parse_script_text(&text, request)?;
        info!(
            story_id = %story.id,
            title = %story.title,
            scenes = story.scenes.len(),
            "Script generated"
        );
        Ok(story)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    #[instrument(skip(self, prompt, style), fields(style = %style))]
    async fn generate_image(&self, prompt: &str, style: &str) -> GenerationResult<ImageReference> {
        let body = GenerateContentRequest::builder()
            .contents(vec![Content::user_text(compose_image_prompt(prompt, style))])
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Request(e.to_string())))?;

        let response = self
            .generate_content(&self.settings.image_model, &body)
            .await?;
        let image = parse_image_response(&response)?;
        debug!(mime_type = ?image.mime_type(), "Image generated");
        Ok(image)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_missing() {
        let err = GeminiClient::with_api_key("  ", GeminiSettings::default()).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::MissingApiKey);
    }

    #[test]
    fn endpoint_joins_model() {
        let mut settings = GeminiSettings::default();
        settings.base_url = "http://localhost:9000/v1beta/".to_string();
        let client = GeminiClient::with_api_key("key", settings).unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash-image"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
        assert_eq!(client.provider_name(), "gemini");
    }
}
