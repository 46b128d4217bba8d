//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyboard binary.

mod commands;
mod context;
mod edit;
mod export;
mod history;
mod logging;
mod progress;
mod story;

pub use commands::{Cli, Commands};
pub use context::AppContext;
pub use edit::handle_edit_command;
pub use export::export_story;
pub use history::handle_history_command;
pub use logging::init_logging;
pub use story::{create_story, list_styles, regenerate_scene, render_story};
