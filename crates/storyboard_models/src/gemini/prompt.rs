//! Prompts and the script response schema.

use serde_json::{Value, json};
use storyboard_core::StoryRequest;

const IMAGE_PROMPT_SUFFIX: &str =
    "High quality, 8k resolution, highly detailed, cinematic composition.";

/// Style used when a story carries none.
const FALLBACK_IMAGE_STYLE: &str = "Cinematic";

/// Final prompt sent to the image model.
///
/// # Examples
///
/// ```
/// use storyboard_models::compose_image_prompt;
///
/// assert_eq!(
///     compose_image_prompt("A boy runs", "Anime"),
///     "(Style: Anime) A boy runs. High quality, 8k resolution, highly detailed, cinematic composition."
/// );
/// assert!(compose_image_prompt("x", " ").starts_with("(Style: Cinematic)"));
/// ```
pub fn compose_image_prompt(prompt: &str, style: &str) -> String {
    let style = match style.trim() {
        "" => FALLBACK_IMAGE_STYLE,
        style => style,
    };
    format!("(Style: {}) {}. {}", style, prompt, IMAGE_PROMPT_SUFFIX)
}

/// Instructions for the text model.
///
/// Scene prompts must be assembled from the character and location visual
/// prompts so the images stay consistent across frames.
pub fn director_prompt(request: &StoryRequest) -> String {
    let style = request.style();
    format!(
        r#"You are a world-class film director and storyboard artist.
Your goal is to create a coherent visual story where characters and backgrounds remain consistent across all frames.

User Idea: "{idea}"
Target: EXACTLY {frames} scenes.
Visual Style: {style}

Instructions:
1. Define Characters: create 1-3 main characters. Write a "visual_prompt" for each that describes their permanent features (face, hair, clothes).
2. Define Locations: create the main settings. Write a "visual_prompt" for each that describes the permanent background elements.
3. Generate Scenes: write the script, one entry per scene, numbered from 1.

Every scene "visual_prompt" MUST follow this structure:
"[Style: {style}]. [Character Visual Description]. [Action/Pose]. [Location Visual Description]. [Lighting/Camera]."

- Do not invent new descriptions for a character or location. Copy the "visual_prompt" defined in steps 1 and 2 verbatim.
- Example: "Anime style. A boy with red spiky hair wearing a green vest. Running frantically. A dark alleyway with wet pavement and neon signs. Low angle shot."

Write titles and descriptions in the language of the user's idea. Visual prompts are always in English.
Output only valid JSON matching the schema."#,
        idea = request.idea(),
        frames = request.frame_count(),
        style = style,
    )
}

fn entity_schema(kind: &str, visual_hint: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": format!("{} name", kind) },
            "description": { "type": "STRING", "description": format!("Brief description of the {}", kind.to_lowercase()) },
            "visual_prompt": { "type": "STRING", "description": visual_hint }
        },
        "required": ["name", "description", "visual_prompt"]
    })
}

/// Response schema for the script call.
pub fn script_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "The title of the short film." },
            "genre": { "type": "STRING", "description": "The genre of the film (e.g., Sci-Fi, Drama)." },
            "logline": { "type": "STRING", "description": "A one-sentence summary of the plot." },
            "characters": {
                "type": "ARRAY",
                "description": "Main characters with consistent visual definitions.",
                "items": entity_schema(
                    "Character",
                    "Detailed physical description in English, reused in every image prompt."
                )
            },
            "locations": {
                "type": "ARRAY",
                "description": "Main locations with consistent visual definitions.",
                "items": entity_schema(
                    "Location",
                    "Detailed environment description in English, reused in every scene set here."
                )
            },
            "scenes": {
                "type": "ARRAY",
                "description": "Key scenes forming the narrative arc.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "scene_number": { "type": "INTEGER" },
                        "description": { "type": "STRING", "description": "Action and dialogue." },
                        "visual_prompt": {
                            "type": "STRING",
                            "description": "Cinematic image prompt in English, built by concatenating the character and location visual prompts."
                        }
                    },
                    "required": ["scene_number", "description", "visual_prompt"]
                }
            }
        },
        "required": ["title", "genre", "logline", "characters", "locations", "scenes"]
    })
}
