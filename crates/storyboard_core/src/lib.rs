//! Core data types for the storyboard generator.
//!
//! A [`Story`] is the aggregate root: it owns its characters, locations and
//! an ordered list of scenes. Every update builds a new value from the old
//! one, leaving siblings untouched.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod draft;
mod entity;
mod image;
mod request;
mod scene;
mod story;
mod style;

pub use draft::{DraftScene, ScriptDraft};
pub use entity::{Character, Location};
pub use image::ImageReference;
pub use request::{MAX_FRAMES, MIN_FRAMES, StoryRequest};
pub use scene::{Scene, SceneStatus};
pub use story::{Story, StoryStage};
pub use style::{DEFAULT_STYLE, StylePreset};
