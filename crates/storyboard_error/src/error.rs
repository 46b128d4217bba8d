//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, QueueError, StorageError};

/// Every error the storyboard crates can produce.
///
/// # Examples
///
/// ```
/// use storyboard_error::{QueueError, QueueErrorKind, StoryboardError};
///
/// let busy = QueueError::new(QueueErrorKind::AlreadyRunning { story_id: "s1".into() });
/// let err: StoryboardError = busy.into();
/// assert!(format!("{}", err).contains("already active"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryboardErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Model adapter error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Generation queue error
    #[from(QueueError)]
    Queue(QueueError),
    /// History or export error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Storyboard error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {}", _0)]
pub struct StoryboardError(Box<StoryboardErrorKind>);

impl StoryboardError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryboardErrorKind {
        &self.0
    }

    /// The generation failure behind this error, if any.
    pub fn as_generation(&self) -> Option<&GenerationError> {
        match self.kind() {
            StoryboardErrorKind::Generation(err) => Some(err),
            _ => None,
        }
    }

    /// Message suitable for showing to a person.
    ///
    /// Known provider conditions (missing key, 429, 503) become guidance;
    /// everything else is shown as its raw message.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardError};
    ///
    /// let err: StoryboardError = GenerationError::new(GenerationErrorKind::MissingApiKey).into();
    /// assert!(err.user_message().contains("API key"));
    /// ```
    pub fn user_message(&self) -> String {
        match self.kind() {
            StoryboardErrorKind::Generation(err) => err.kind.user_message(),
            StoryboardErrorKind::Config(err) => err.kind.to_string(),
            StoryboardErrorKind::Queue(err) => err.kind.to_string(),
            StoryboardErrorKind::Storage(err) => err.kind.to_string(),
        }
    }
}

// Generic From implementation for any type that converts to StoryboardErrorKind
impl<T> From<T> for StoryboardError
where
    T: Into<StoryboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for storyboard operations.
pub type StoryboardResult<T> = std::result::Result<T, StoryboardError>;
