//! History stores: filesystem and in-memory behave the same way.

use chrono::{Duration, TimeZone, Utc};
use storyboard_core::{ImageReference, Scene, Story};
use storyboard_error::{StorageErrorKind, StoryboardErrorKind};
use storyboard_interface::StoryRepository;
use storyboard_storage::{FileSystemStoryRepository, InMemoryStoryRepository};
use tempfile::TempDir;

fn story(id: &str, minutes: i64) -> Story {
    Story {
        id: id.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes),
        title: format!("Story {}", id),
        genre: "Drama".to_string(),
        logline: "Something happens.".to_string(),
        style: "Watercolor".to_string(),
        characters: vec![],
        locations: vec![],
        scenes: vec![
            Scene::new(1, "Opening", "p1")
                .succeeded(ImageReference::from_base64("image/png", "aGVsbG8=")),
            Scene::new(2, "Closing", "p2"),
        ],
    }
}

fn ids(stories: &[Story]) -> Vec<&str> {
    stories.iter().map(|s| s.id.as_str()).collect()
}

async fn exercise(repo: &dyn StoryRepository) {
    repo.save(&story("old", 0)).await.unwrap();
    repo.save(&story("new", 10)).await.unwrap();
    repo.save(&story("mid", 5)).await.unwrap();

    let listed = repo.list().await.unwrap();
    assert_eq!(ids(&listed), vec!["new", "mid", "old"]);

    // Upsert replaces in place
    let renamed = story("mid", 5).with_title("Renamed");
    repo.save(&renamed).await.unwrap();
    assert_eq!(repo.load("mid").await.unwrap(), renamed);
    assert_eq!(repo.list().await.unwrap().len(), 3);

    let remaining = repo.delete("new").await.unwrap();
    assert_eq!(ids(&remaining), vec!["mid", "old"]);

    // Deleting something absent is not an error
    assert_eq!(repo.delete("new").await.unwrap().len(), 2);

    let err = repo.load("new").await.unwrap_err();
    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::NotFound(_))
    ));

    repo.clear().await.unwrap();
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_in_memory_repository() {
    let repo = InMemoryStoryRepository::new();
    exercise(&repo).await;
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_filesystem_repository() {
    let dir = TempDir::new().unwrap();
    let repo = FileSystemStoryRepository::new(dir.path()).unwrap();
    exercise(&repo).await;
    assert!(repo.stories_dir().exists());
}

#[tokio::test]
async fn test_filesystem_round_trip_keeps_images() {
    let dir = TempDir::new().unwrap();
    let repo = FileSystemStoryRepository::new(dir.path()).unwrap();
    let original = story("abc-123", 0);

    repo.save(&original).await.unwrap();

    let reopened = FileSystemStoryRepository::new(dir.path()).unwrap();
    let loaded = reopened.load("abc-123").await.unwrap();
    assert_eq!(loaded, original);
    assert!(dir.path().join("stories/abc-123.json").exists());
    assert!(!dir.path().join("stories/abc-123.json.tmp").exists());
}

#[tokio::test]
async fn test_filesystem_skips_corrupt_documents() {
    let dir = TempDir::new().unwrap();
    let repo = FileSystemStoryRepository::new(dir.path()).unwrap();
    repo.save(&story("good", 0)).await.unwrap();
    std::fs::write(repo.stories_dir().join("bad.json"), "{ not json").unwrap();
    std::fs::write(repo.stories_dir().join("notes.txt"), "ignore me").unwrap();

    let listed = repo.list().await.unwrap();
    assert_eq!(ids(&listed), vec!["good"]);

    let err = repo.load("bad").await.unwrap_err();
    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::Serialization(_))
    ));
}

#[tokio::test]
async fn test_filesystem_rejects_path_like_ids() {
    let dir = TempDir::new().unwrap();
    let repo = FileSystemStoryRepository::new(dir.path()).unwrap();

    let err = repo.load("../escape").await.unwrap_err();
    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::InvalidId(_))
    ));
    assert!(repo.save(&story("a/b", 0)).await.is_err());
}
