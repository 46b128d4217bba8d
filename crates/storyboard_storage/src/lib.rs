//! Story history and export.
//!
//! Two [`StoryRepository`](storyboard_interface::StoryRepository)
//! implementations are provided:
//!
//! - [`FileSystemStoryRepository`]: one JSON document per story
//! - [`InMemoryStoryRepository`]: for tests and short-lived sessions
//!
//! The [`export`] functions turn a story into a JSON document or a ZIP
//! archive of its images plus a plain-text script.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod export;
mod filesystem;
mod memory;

pub use export::{ExportFormat, export_file_name, export_json, export_zip, script_text};
pub use filesystem::FileSystemStoryRepository;
pub use memory::InMemoryStoryRepository;

use storyboard_core::Story;

/// Newest first, ties broken by id for a stable order.
pub(crate) fn sort_by_recency(stories: &mut [Story]) {
    stories.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
