//! In-memory story history.

use crate::sort_by_recency;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use storyboard_core::Story;
use storyboard_error::{StorageError, StorageErrorKind, StoryboardResult};
use storyboard_interface::StoryRepository;
use tokio::sync::RwLock;

/// History kept in a `HashMap` behind an `RwLock`.
///
/// All data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryRepository {
    stories: Arc<RwLock<HashMap<String, Story>>>,
}

impl InMemoryStoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored stories.
    pub async fn len(&self) -> usize {
        self.stories.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.stories.read().await.is_empty()
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn save(&self, story: &Story) -> StoryboardResult<()> {
        self.stories
            .write()
            .await
            .insert(story.id.clone(), story.clone());
        Ok(())
    }

    async fn load(&self, id: &str) -> StoryboardResult<Story> {
        self.stories
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())).into())
    }

    async fn list(&self) -> StoryboardResult<Vec<Story>> {
        let mut stories: Vec<Story> = self.stories.read().await.values().cloned().collect();
        sort_by_recency(&mut stories);
        Ok(stories)
    }

    async fn delete(&self, id: &str) -> StoryboardResult<Vec<Story>> {
        self.stories.write().await.remove(id);
        self.list().await
    }

    async fn clear(&self) -> StoryboardResult<()> {
        self.stories.write().await.clear();
        Ok(())
    }
}
