//! Live Gemini tests.
//!
//! Run with: `cargo test -p storyboard_models --features api`
//!
//! These require GEMINI_API_KEY (or API_KEY) in the environment or a `.env`
//! file, and consume quota.

use storyboard_core::{SceneStatus, StoryRequest};
use storyboard_interface::{ImageGenerator, ScriptGenerator};
use storyboard_models::GeminiClient;
use storyboard_rate_limit::GeminiSettings;

fn client() -> GeminiClient {
    let _ = dotenvy::dotenv();
    match GeminiClient::new(GeminiSettings::default()) {
        Ok(client) => client,
        Err(e) => panic!("Failed to create client. Ensure GEMINI_API_KEY is set: {}", e),
    }
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_real_script_generation() {
    let client = client();
    let request = StoryRequest::new("A robot learns to paint in an abandoned city", 4, "Watercolor")
        .expect("valid request");

    let story = client
        .generate_script(&request)
        .await
        .expect("script generation should succeed");

    assert!(!story.title.is_empty());
    assert!(!story.scenes.is_empty());
    assert_eq!(story.style, "Watercolor");
    assert!(story.scenes.iter().all(|s| s.status == SceneStatus::Pending));
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_real_image_generation() {
    let client = client();

    let image = client
        .generate_image("A red paper boat on a calm lake at dawn", "Watercolor")
        .await
        .expect("image generation should succeed");

    assert!(image.as_str().starts_with("data:image/"));
    assert!(!image.decode().expect("valid base64").is_empty());
}
