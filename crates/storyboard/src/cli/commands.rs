//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storyboard::{DEFAULT_STYLE, MAX_FRAMES, MIN_FRAMES};

/// Storyboard - turn a story idea into a scripted, illustrated storyboard
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Turn a story idea into a scripted, illustrated storyboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a new script from an idea and save it to history
    Create {
        /// The story idea
        idea: String,

        /// Number of scenes
        #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(MIN_FRAMES as i64..=MAX_FRAMES as i64))]
        frames: u32,

        /// Visual style (preset id or free text)
        #[arg(short, long, default_value = DEFAULT_STYLE)]
        style: String,

        /// Render every scene right after writing the script
        #[arg(long)]
        render: bool,
    },

    /// Render the scenes of a saved story that have no image yet
    Render {
        /// Story id
        id: String,
    },

    /// Generate one scene again
    Regenerate {
        /// Story id
        id: String,

        /// Scene number, starting at 1
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        scene: u32,

        /// Replace the scene's visual prompt before generating
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Edit a saved story
    #[command(subcommand)]
    Edit(EditCommands),

    /// Browse and manage saved stories
    #[command(subcommand)]
    History(HistoryCommands),

    /// Export a saved story
    Export {
        /// Story id
        id: String,

        /// Output format
        #[arg(long, default_value = "zip")]
        format: ExportKind,

        /// Output path; defaults to a name derived from the title
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the built-in style presets
    Styles,
}

/// Story editing subcommands
#[derive(Subcommand, Debug)]
pub enum EditCommands {
    /// Change title, genre or logline
    Story {
        /// Story id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New genre
        #[arg(long)]
        genre: Option<String>,

        /// New logline
        #[arg(long)]
        logline: Option<String>,
    },

    /// Change a scene's description or visual prompt
    Scene {
        /// Story id
        id: String,

        /// Scene number, starting at 1
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        scene: u32,

        /// New action description
        #[arg(long)]
        description: Option<String>,

        /// New visual prompt
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Change a character
    Character {
        /// Story id
        id: String,

        /// Character position, starting at 1
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        index: u32,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New visual prompt
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Change a location
    Location {
        /// Story id
        id: String,

        /// Location position, starting at 1
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        index: u32,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New visual prompt
        #[arg(long)]
        prompt: Option<String>,
    },
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List saved stories, newest first
    List,

    /// Show one story
    Show {
        /// Story id
        id: String,

        /// Print the full JSON document
        #[arg(long)]
        json: bool,
    },

    /// Delete one story
    Delete {
        /// Story id
        id: String,
    },

    /// Delete every saved story
    Clear {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
}

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Pretty-printed JSON document
    Json,
    /// Images plus plain-text script
    Zip,
}
