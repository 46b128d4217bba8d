//! Configuration and input validation error types.

/// Rejected settings or user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// The story idea was blank
    #[display("Story idea must not be empty")]
    EmptyIdea,
    /// Requested scene count outside the supported range
    #[display("Frame count must be between {} and {}, got {}", min, max, got)]
    FrameCount {
        /// Requested count
        got: u32,
        /// Smallest accepted count
        min: u32,
        /// Largest accepted count
        max: u32,
    },
    /// A character or location position that does not exist
    #[display("Story has {} {}s, there is no {} {}", len, entity, entity, position)]
    NoSuchEntry {
        /// `character` or `location`
        entity: &'static str,
        /// One-based position that was requested
        position: usize,
        /// Number of entries present
        len: usize,
    },
    /// Configuration sources could not be merged
    #[display("Failed to build configuration: {}", _0)]
    Build(String),
    /// Merged configuration did not match the expected shape
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::FrameCount { got: 2, min: 4, max: 30 });
/// assert!(err.kind.to_string().contains("between 4 and 30"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// What was rejected
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
