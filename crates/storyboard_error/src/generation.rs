//! Errors raised by the generative-model adapters and their classification.

/// Coarse classification of a generation failure.
///
/// The retry policy branches on this value. Adapters are responsible for
/// choosing a [`GenerationErrorKind`] that maps onto the right class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorClass {
    /// Provider reported temporary over-quota or over-rate usage (HTTP 429)
    #[display("rate limited")]
    RateLimited,
    /// Provider is temporarily out of service (HTTP 503)
    #[display("unavailable")]
    Unavailable,
    /// Provider declined to produce content
    #[display("refused")]
    Refused,
    /// Response carried no usable payload
    #[display("no data")]
    NoData,
    /// Anything else
    #[display("unknown")]
    Unknown,
}

/// Generation-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not found in environment
    #[display("API key is missing (set GEMINI_API_KEY)")]
    MissingApiKey,
    /// Provider rate limit or quota exhausted
    #[display("Rate limited (429): {}", _0)]
    RateLimited(String),
    /// Provider unavailable
    #[display("Service unavailable (503): {}", _0)]
    Unavailable(String),
    /// Provider answered with a text refusal instead of an image
    #[display("Image generation refused: {}", _0)]
    Refused(String),
    /// No candidates in the response
    #[display("No candidates returned from image generation service")]
    NoCandidates,
    /// Candidate had neither image nor text
    #[display("No image data returned. Finish reason: {}", finish_reason)]
    NoImageData {
        /// Provider finish reason code
        finish_reason: String,
    },
    /// Text response was empty (typically a safety block)
    #[display("No response from model")]
    EmptyResponse,
    /// Script response could not be parsed into a story
    #[display("Malformed script response: {}", _0)]
    MalformedScript(String),
    /// Other HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Transport-level failure before a response arrived
    #[display("Request failed: {}", _0)]
    Request(String),
}

impl GenerationErrorKind {
    /// Classify this error for the retry policy.
    pub fn class(&self) -> ErrorClass {
        match self {
            GenerationErrorKind::RateLimited(_) => ErrorClass::RateLimited,
            GenerationErrorKind::Unavailable(_) => ErrorClass::Unavailable,
            GenerationErrorKind::Refused(_) => ErrorClass::Refused,
            GenerationErrorKind::NoCandidates
            | GenerationErrorKind::NoImageData { .. }
            | GenerationErrorKind::EmptyResponse => ErrorClass::NoData,
            GenerationErrorKind::Http { status_code, .. } => match *status_code {
                429 => ErrorClass::RateLimited,
                503 => ErrorClass::Unavailable,
                _ => ErrorClass::Unknown,
            },
            GenerationErrorKind::MissingApiKey
            | GenerationErrorKind::MalformedScript(_)
            | GenerationErrorKind::Request(_) => ErrorClass::Unknown,
        }
    }

    /// True for transient rate-limit conditions, the only ones the queue retries.
    pub fn is_rate_limited(&self) -> bool {
        self.class() == ErrorClass::RateLimited
    }

    /// Guidance shown to a person, falling back to the raw message.
    pub fn user_message(&self) -> String {
        match self {
            GenerationErrorKind::MissingApiKey => {
                "Configuration error: no API key found. Set GEMINI_API_KEY in the environment or a .env file and try again.".to_string()
            }
            kind if kind.class() == ErrorClass::RateLimited => {
                "Quota exceeded (429): the API is being called too often, please try again later.".to_string()
            }
            kind if kind.class() == ErrorClass::Unavailable => {
                "Service busy (503): the AI service is temporarily unavailable, please retry shortly.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ErrorClass, GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::RateLimited(
///     "RESOURCE_EXHAUSTED".to_string(),
/// ));
/// assert_eq!(err.kind.class(), ErrorClass::RateLimited);
/// assert!(err.is_rate_limited());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for `self.kind.is_rate_limited()`.
    pub fn is_rate_limited(&self) -> bool {
        self.kind.is_rate_limited()
    }
}

/// Result type for generation adapters.
pub type GenerationResult<T> = Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_fallback_classification() {
        let too_many = GenerationErrorKind::Http {
            status_code: 429,
            message: "Too many requests".to_string(),
        };
        assert_eq!(too_many.class(), ErrorClass::RateLimited);

        let busy = GenerationErrorKind::Http {
            status_code: 503,
            message: "Overloaded".to_string(),
        };
        assert_eq!(busy.class(), ErrorClass::Unavailable);

        let bad = GenerationErrorKind::Http {
            status_code: 400,
            message: "Bad request".to_string(),
        };
        assert_eq!(bad.class(), ErrorClass::Unknown);
        assert!(!bad.is_rate_limited());
    }

    #[test]
    fn payload_failures_are_no_data() {
        assert_eq!(GenerationErrorKind::NoCandidates.class(), ErrorClass::NoData);
        assert_eq!(GenerationErrorKind::EmptyResponse.class(), ErrorClass::NoData);
        assert_eq!(
            GenerationErrorKind::NoImageData {
                finish_reason: "SAFETY".to_string()
            }
            .class(),
            ErrorClass::NoData
        );
    }

    #[test]
    fn refusal_text_is_preserved() {
        let kind = GenerationErrorKind::Refused("I can't draw that".to_string());
        assert_eq!(kind.class(), ErrorClass::Refused);
        assert!(kind.to_string().contains("I can't draw that"));
        assert!(kind.user_message().contains("I can't draw that"));
    }

    #[test]
    fn user_messages_for_known_conditions() {
        assert!(
            GenerationErrorKind::MissingApiKey
                .user_message()
                .contains("GEMINI_API_KEY")
        );
        assert!(
            GenerationErrorKind::RateLimited("quota".to_string())
                .user_message()
                .contains("429")
        );
        assert!(
            GenerationErrorKind::Unavailable("down".to_string())
                .user_message()
                .contains("503")
        );
    }
}
