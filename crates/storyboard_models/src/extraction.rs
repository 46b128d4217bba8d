//! Pulling a JSON object out of model text.
//!
//! Even with a JSON response MIME type the text model occasionally wraps its
//! answer in a markdown fence or adds a sentence before it. Extraction tries,
//! in order: the contents of a code fence, then the first balanced
//! `{ ... }` span.

use storyboard_error::{GenerationError, GenerationErrorKind, GenerationResult};

/// Extract the JSON object from a model response.
///
/// # Errors
///
/// Returns [`GenerationErrorKind::MalformedScript`] if no object is present.
///
/// # Examples
///
/// ```
/// use storyboard_models::extract_json_object;
///
/// let fenced = "```json\n{\"title\": \"Night Run\"}\n```";
/// assert_eq!(extract_json_object(fenced).unwrap(), "{\"title\": \"Night Run\"}");
///
/// let chatty = "Sure! Here it is: {\"title\": \"{braces} inside\"} Enjoy.";
/// assert_eq!(extract_json_object(chatty).unwrap(), "{\"title\": \"{braces} inside\"}");
/// ```
pub fn extract_json_object(response: &str) -> GenerationResult<String> {
    let body = strip_code_fence(response).unwrap_or(response).trim();

    if let Some(object) = balanced_object(body) {
        return Ok(object.to_string());
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON object found in model response"
    );
    Err(GenerationError::new(GenerationErrorKind::MalformedScript(
        format!("no JSON object found in response (length: {})", response.len()),
    )))
}

/// Contents of the first markdown code fence, with or without a language tag.
///
/// An unterminated fence yields everything after the opening line.
fn strip_code_fence(response: &str) -> Option<&str> {
    let start = response.find("```")?;
    let after_ticks = &response[start + 3..];
    let content = match after_ticks.find('\n') {
        Some(newline) if !after_ticks[..newline].contains('{') => &after_ticks[newline + 1..],
        _ => after_ticks.trim_start_matches("json"),
    };
    Some(match content.find("```") {
        Some(end) => &content[..end],
        None => content,
    })
}

/// The first `{` together with its matching `}`, ignoring braces inside strings.
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object_passes_through() {
        let json = r#"{"a": 1}"#;
        assert_eq!(extract_json_object(json).unwrap(), json);
    }

    #[test]
    fn fence_without_language() {
        let text = "```\n{\"a\": [1, 2]}\n```";
        assert_eq!(extract_json_object(text).unwrap(), "{\"a\": [1, 2]}");
    }

    #[test]
    fn unterminated_fence_is_tolerated() {
        let text = "```json\n{\"a\": {\"b\": 2}}";
        assert_eq!(extract_json_object(text).unwrap(), "{\"a\": {\"b\": 2}}");
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        let text = r#"prefix {"quote": "she said \"}\" loudly"} suffix"#;
        assert_eq!(
            extract_json_object(text).unwrap(),
            r#"{"quote": "she said \"}\" loudly"}"#
        );
    }

    #[test]
    fn missing_object_is_malformed() {
        let err = extract_json_object("I cannot help with that.").unwrap_err();
        assert!(matches!(err.kind, GenerationErrorKind::MalformedScript(_)));
    }

    #[test]
    fn unbalanced_object_is_malformed() {
        assert!(extract_json_object("{\"a\": {\"b\": 1}").is_err());
    }
}
