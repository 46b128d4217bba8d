//! Filesystem story history.

use crate::sort_by_recency;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use storyboard_core::Story;
use storyboard_error::{StorageError, StorageErrorKind, StoryboardResult};
use storyboard_interface::StoryRepository;
use tracing::{debug, info, instrument, warn};

/// History stored as one pretty-printed JSON file per story.
///
/// Layout: `{base_path}/stories/{story_id}.json`. Writes go to a temporary
/// file first and are renamed into place, so a crash never leaves a
/// half-written story behind.
#[derive(Debug, Clone)]
pub struct FileSystemStoryRepository {
    stories_dir: PathBuf,
}

impl FileSystemStoryRepository {
    /// Open (and create if needed) a history rooted at `base_path`.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StoryboardResult<Self> {
        let stories_dir = base_path.into().join("stories");

        std::fs::create_dir_all(&stories_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                stories_dir.display(),
                e
            )))
        })?;

        info!(path = %stories_dir.display(), "Opened story history");
        Ok(Self { stories_dir })
    }

    /// Directory holding the story documents.
    pub fn stories_dir(&self) -> &Path {
        &self.stories_dir
    }

    /// Path of the document for `id`.
    ///
    /// Ids are used as file names, so only ASCII letters, digits, `-` and `_`
    /// are accepted.
    fn path_for(&self, id: &str) -> Result<PathBuf, StorageError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::new(StorageErrorKind::InvalidId(id.to_string())));
        }
        Ok(self.stories_dir.join(format!("{}.json", id)))
    }

    async fn read_story(path: &Path) -> Result<Story, StorageError> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(path.display().to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;
        serde_json::from_slice(&data).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })
    }
}

#[async_trait]
impl StoryRepository for FileSystemStoryRepository {
    #[instrument(skip(self, story), fields(story_id = %story.id))]
    async fn save(&self, story: &Story) -> StoryboardResult<()> {
        let path = self.path_for(&story.id)?;
        let json = serde_json::to_vec_pretty(story).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string()))
        })?;

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        debug!(path = %path.display(), size = json.len(), "Saved story");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load(&self, id: &str) -> StoryboardResult<Story> {
        let path = self.path_for(id)?;
        Ok(Self::read_story(&path).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoryboardResult<Vec<Story>> {
        let mut entries = tokio::fs::read_dir(&self.stories_dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.stories_dir.display(),
                e
            )))
        })?;

        let mut stories = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.stories_dir.display(),
                    e
                )))
            })?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read_story(&path).await {
                Ok(story) => stories.push(story),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable story"),
            }
        }

        sort_by_recency(&mut stories);
        Ok(stories)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoryboardResult<Vec<Story>> {
        let path = self.path_for(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => info!(path = %path.display(), "Deleted story"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Story already absent");
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                    "remove {}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        }
        self.list().await
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> StoryboardResult<()> {
        tokio::fs::remove_dir_all(&self.stories_dir)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "remove {}: {}",
                    self.stories_dir.display(),
                    e
                )))
            })?;
        tokio::fs::create_dir_all(&self.stories_dir)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    self.stories_dir.display(),
                    e
                )))
            })?;
        info!(path = %self.stories_dir.display(), "Cleared story history");
        Ok(())
    }
}
