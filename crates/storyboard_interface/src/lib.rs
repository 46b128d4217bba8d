//! Trait definitions for the storyboard generator.
//!
//! These traits sit at the seams between the generation queue and its
//! collaborators: the model providers, the history store and whatever
//! presentation layer is watching progress.

mod traits;
mod types;

pub use traits::{ImageGenerator, QueueObserver, ScriptGenerator, StoryRepository};
pub use types::QueueEvent;
