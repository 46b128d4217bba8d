//! Error types for the storyboard generator.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyboard_error::{StorageError, StorageErrorKind, StoryboardResult};
//!
//! fn load_story(id: &str) -> StoryboardResult<String> {
//!     Err(StorageError::new(StorageErrorKind::NotFound(id.to_string())))?
//! }
//!
//! match load_story("1700000000") {
//!     Ok(story) => println!("Got: {}", story),
//!     Err(e) => eprintln!("Error: {}", e.user_message()),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod queue;
mod storage;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
pub use generation::{ErrorClass, GenerationError, GenerationErrorKind, GenerationResult};
pub use queue::{QueueError, QueueErrorKind};
pub use storage::{StorageError, StorageErrorKind};
