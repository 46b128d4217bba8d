//! Turning Gemini responses into storyboard values or classified errors.

use super::dto::{ErrorEnvelope, GenerateContentResponse};
use crate::extract_json_object;
use storyboard_core::{ImageReference, ScriptDraft, Story, StoryRequest};
use storyboard_error::{GenerationError, GenerationErrorKind, GenerationResult};
use tracing::warn;

/// Classify a non-success HTTP status and its body.
///
/// 429, a `RESOURCE_EXHAUSTED` status and a "quota exceeded" message become
/// [`GenerationErrorKind::RateLimited`]; 503 becomes
/// [`GenerationErrorKind::Unavailable`].
///
/// # Examples
///
/// ```
/// use storyboard_error::ErrorClass;
/// use storyboard_models::classify_status;
///
/// let body = r#"{"error": {"code": 400, "message": "Quota exceeded for metric", "status": "FAILED_PRECONDITION"}}"#;
/// assert_eq!(classify_status(400, body).class(), ErrorClass::RateLimited);
/// assert_eq!(classify_status(503, "overloaded").class(), ErrorClass::Unavailable);
/// assert_eq!(classify_status(404, "").class(), ErrorClass::Unknown);
/// ```
pub fn classify_status(status_code: u16, body: &str) -> GenerationErrorKind {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let message = if envelope.error.message.is_empty() {
        body.trim().to_string()
    } else {
        envelope.error.message.clone()
    };

    let exhausted = envelope.error.status == "RESOURCE_EXHAUSTED"
        || body.contains("RESOURCE_EXHAUSTED")
        || message.to_lowercase().contains("quota exceeded");

    match status_code {
        429 => GenerationErrorKind::RateLimited(message),
        _ if exhausted => GenerationErrorKind::RateLimited(message),
        503 => GenerationErrorKind::Unavailable(message),
        _ => GenerationErrorKind::Http {
            status_code,
            message,
        },
    }
}

/// Pull the image out of an image-model response.
///
/// The first inline-data part of the first candidate wins. A candidate
/// with only text is a refusal and the text is kept.
///
/// # Errors
///
/// [`GenerationErrorKind::NoCandidates`], [`GenerationErrorKind::Refused`]
/// or [`GenerationErrorKind::NoImageData`], as described above.
pub fn parse_image_response(response: &GenerateContentResponse) -> GenerationResult<ImageReference> {
    let candidate = response
        .candidates()
        .first()
        .ok_or_else(|| GenerationError::new(GenerationErrorKind::NoCandidates))?;

    let image = candidate.parts().iter().find_map(|part| {
        part.inline_data()
            .as_ref()
            .filter(|inline| !inline.data().is_empty())
    });
    if let Some(inline) = image {
        return Ok(ImageReference::from_base64(inline.mime_type(), inline.data()));
    }

    if let Some(text) = candidate.parts().iter().find_map(|part| part.text().as_deref()) {
        return Err(GenerationError::new(GenerationErrorKind::Refused(
            text.to_string(),
        )));
    }

    let finish_reason = candidate
        .finish_reason()
        .clone()
        .unwrap_or_else(|| "unknown".to_string());
    Err(GenerationError::new(GenerationErrorKind::NoImageData {
        finish_reason,
    }))
}

/// Turn the script model's text into a fresh story.
///
/// The new story gets its own id and timestamp, the requested style and
/// pending scenes numbered by position.
///
/// # Errors
///
/// [`GenerationErrorKind::EmptyResponse`] for blank text and
/// [`GenerationErrorKind::MalformedScript`] when no parsable script is found.
pub fn parse_script_text(text: &str, request: &StoryRequest) -> GenerationResult<Story> {
    if text.trim().is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
    }

    let json = extract_json_object(text)?;
    let draft: ScriptDraft = serde_json::from_str(&json).map_err(|e| {
        GenerationError::new(GenerationErrorKind::MalformedScript(e.to_string()))
    })?;

    let story = draft.into_story(request.style());
    if story.scenes.len() != *request.frame_count() as usize {
        warn!(
            requested = request.frame_count(),
            received = story.scenes.len(),
            "Script scene count differs from requested frame count"
        );
    }
    Ok(story)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Candidate, Content, InlineData, Part};
    use storyboard_core::SceneStatus;
    use storyboard_error::ErrorClass;

    fn response_with(parts: Vec<Part>, finish_reason: &str) -> GenerateContentResponse {
        GenerateContentResponse::new(vec![Candidate::new(
            Some(Content::from_parts("model", parts)),
            Some(finish_reason.to_string()),
        )])
    }

    #[test]
    fn inline_data_becomes_data_url() {
        let response = response_with(
            vec![
                Part::from_text("Here is your image"),
                Part::from_inline(InlineData::new("image/png", "iVBORw0KGgo=")),
            ],
            "STOP",
        );
        let image = parse_image_response(&response).unwrap();
        assert_eq!(image.as_str(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn text_only_is_refusal() {
        let response = response_with(vec![Part::from_text("I can't draw that.")], "STOP");
        let err = parse_image_response(&response).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Refused("I can't draw that.".to_string()));
        assert_eq!(err.kind.class(), ErrorClass::Refused);
    }

    #[test]
    fn empty_candidate_reports_finish_reason() {
        let response = response_with(vec![], "IMAGE_SAFETY");
        let err = parse_image_response(&response).unwrap_err();
        assert!(err.to_string().contains("Finish reason: IMAGE_SAFETY"));
    }

    #[test]
    fn no_candidates() {
        let err = parse_image_response(&GenerateContentResponse::default()).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::NoCandidates);
    }

    #[test]
    fn rate_limit_status_variants() {
        let exhausted = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            classify_status(429, exhausted),
            GenerationErrorKind::RateLimited("Resource has been exhausted".to_string())
        );
        assert!(classify_status(500, "RESOURCE_EXHAUSTED").is_rate_limited());
        assert!(!classify_status(500, "internal").is_rate_limited());

        let missing_project = r#"{"error": {"code": 403, "message": "API requires a quota project, which is not set", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(
            classify_status(403, missing_project),
            GenerationErrorKind::Http {
                status_code: 403,
                message: "API requires a quota project, which is not set".to_string(),
            }
        );
        assert!(classify_status(400, "Quota Exceeded for requests per minute").is_rate_limited());
    }

    #[test]
    fn script_text_becomes_pending_story() {
        let request = StoryRequest::new("A heist", 4, "Film Noir").unwrap();
        let text = r#"```json
{
  "title": "The Vault",
  "genre": "Crime",
  "logline": "Four thieves, one night.",
  "characters": [{"name": "Rosa", "description": "Leader", "visual_prompt": "A woman in a grey trench coat"}],
  "scenes": [
    {"scene_number": 3, "description": "Planning", "visual_prompt": "p1"},
    {"scene_number": 9, "description": "Escape", "visual_prompt": "p2"}
  ]
}
```"#;
        let story = parse_script_text(text, &request).unwrap();

        assert_eq!(story.style, "Film Noir");
        assert!(story.locations.is_empty());
        assert_eq!(
            story.scenes.iter().map(|s| s.scene_number).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(story.scenes.iter().all(|s| s.status == SceneStatus::Pending && s.image.is_none()));
    }

    #[test]
    fn script_errors() {
        let request = StoryRequest::new("A heist", 4, "").unwrap();
        assert_eq!(
            parse_script_text("  ", &request).unwrap_err().kind,
            GenerationErrorKind::EmptyResponse
        );
        assert!(matches!(
            parse_script_text(r#"{"title": 5}"#, &request).unwrap_err().kind,
            GenerationErrorKind::MalformedScript(_)
        ));
    }
}
