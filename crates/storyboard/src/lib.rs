//! Storyboard generator.
//!
//! A story idea becomes a structured script (title, characters, locations,
//! scenes) written by a Gemini text model, and every scene is then rendered
//! by a Gemini image model through a sequential [`GenerationQueue`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storyboard::{
//!     GeminiClient, GenerationQueue, ScriptGenerator, StoryRequest, StoryboardConfig,
//!     TracingObserver,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryboardConfig::load()?;
//!     let client = GeminiClient::new(config.gemini.clone())?;
//!
//!     let request = StoryRequest::new("A lighthouse keeper finds a map", 6, "Watercolor")?;
//!     let story = client.generate_script(&request).await?;
//!
//!     let queue = GenerationQueue::new(client, config.retry.clone());
//!     let outcome = queue.run(&story, &TracingObserver).await?;
//!     println!("{} scenes rendered", outcome.stats.generated);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `storyboard_error` - Error types
//! - `storyboard_core` - Story, scene and request types
//! - `storyboard_interface` - Generator, observer and repository traits
//! - `storyboard_rate_limit` - Retry policy, throttling and configuration
//! - `storyboard_models` - Gemini client
//! - `storyboard_queue` - Generation queue
//! - `storyboard_storage` - History and export
//!
//! This crate re-exports everything for convenience.

mod persist;

pub use persist::PersistingObserver;

pub use storyboard_core::*;
pub use storyboard_error::*;
pub use storyboard_interface::*;
pub use storyboard_models::{GeminiClient, compose_image_prompt, extract_json_object};
pub use storyboard_queue::{
    CancellationToken, ChannelObserver, GenerationQueue, NoopObserver, Regenerated,
    RunOutcome, RunStats, TracingObserver,
};
pub use storyboard_rate_limit::{
    GeminiSettings, RateLimiter, RetryPolicy, StorageSettings, StoryboardConfig, TierConfig,
};
pub use storyboard_storage::{
    ExportFormat, FileSystemStoryRepository, InMemoryStoryRepository, export_file_name,
    export_json, export_zip, script_text,
};
