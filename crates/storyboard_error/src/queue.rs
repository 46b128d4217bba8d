//! Generation queue error types.

/// Conditions under which the queue refuses work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum QueueErrorKind {
    /// A run for this story is already in flight
    #[display("A generation run is already active for story {}", story_id)]
    AlreadyRunning {
        /// Identifier of the story being rendered
        story_id: String,
    },
    /// A scene position outside the story was addressed
    #[display("Scene index {} is out of range (story has {} scenes)", index, len)]
    SceneOutOfRange {
        /// Requested zero-based position
        index: usize,
        /// Number of scenes in the story
        len: usize,
    },
}

/// Queue error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Queue Error: {} at line {} in {}", kind, line, file)]
pub struct QueueError {
    /// The kind of error that occurred
    pub kind: QueueErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl QueueError {
    /// Create a new queue error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: QueueErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
