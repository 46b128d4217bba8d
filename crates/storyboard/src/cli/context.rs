//! Shared state for command handlers.

use std::path::Path;
use storyboard::{
    FileSystemStoryRepository, GeminiClient, GenerationQueue, StoryboardConfig, StoryboardResult,
};
use tracing::debug;

/// Loaded configuration plus the history store.
///
/// The Gemini client is built on demand so history and export commands
/// work without an API key.
#[derive(Debug)]
pub struct AppContext {
    config: StoryboardConfig,
    repository: FileSystemStoryRepository,
}

impl AppContext {
    /// Load configuration (optionally layering `config_path`) and open history.
    pub fn load(config_path: Option<&Path>) -> StoryboardResult<Self> {
        let config = match config_path {
            Some(path) => StoryboardConfig::from_file(path)?,
            None => StoryboardConfig::load()?,
        };
        let history_dir = config.storage.history_dir();
        debug!(history_dir = %history_dir.display(), "Opening history");
        let repository = FileSystemStoryRepository::new(history_dir)?;
        Ok(Self { config, repository })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &StoryboardConfig {
        &self.config
    }

    /// The history store.
    pub fn repository(&self) -> &FileSystemStoryRepository {
        &self.repository
    }

    /// A Gemini client; fails with `MissingApiKey` when no key is set.
    pub fn client(&self) -> StoryboardResult<GeminiClient> {
        Ok(GeminiClient::new(self.config.gemini.clone())?)
    }

    /// A generation queue over a fresh Gemini client.
    pub fn queue(&self) -> StoryboardResult<GenerationQueue<GeminiClient>> {
        Ok(GenerationQueue::new(self.client()?, self.config.retry.clone()))
    }
}
