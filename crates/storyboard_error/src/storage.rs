//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Story not found in history
    #[display("Story not found: {}", _0)]
    NotFound(String),
    /// Story id not usable as a file name
    #[display("Invalid story id: {:?}", _0)]
    InvalidId(String),
    /// Stored document could not be encoded or decoded
    #[display("Serialization failed: {}", _0)]
    Serialization(String),
    /// Image reference could not be decoded into bytes
    #[display("Invalid image data: {}", _0)]
    InvalidImage(String),
    /// Export requested for a story without any rendered images
    #[display("Nothing to export: {}", _0)]
    NothingToExport(String),
    /// Archive could not be assembled
    #[display("Archive error: {}", _0)]
    Archive(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("1700000000".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
