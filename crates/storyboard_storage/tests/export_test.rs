//! JSON and ZIP exports.

use chrono::{TimeZone, Utc};
use std::io::{Cursor, Read};
use storyboard_core::{ImageReference, Scene, Story};
use storyboard_error::{StorageErrorKind, StoryboardErrorKind};
use storyboard_storage::{export_json, export_zip, script_text};

fn story(scenes: Vec<Scene>) -> Story {
    Story {
        id: "s1".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        title: "Night Run".to_string(),
        genre: "Thriller".to_string(),
        logline: "A courier outruns the city.".to_string(),
        style: "Cyberpunk".to_string(),
        characters: vec![],
        locations: vec![],
        scenes,
    }
}

#[test]
fn test_script_text_format() {
    let text = script_text(&story(vec![
        Scene::new(1, "Runs", "p1"),
        Scene::new(2, "Hides", "p2"),
    ]));
    assert_eq!(
        text,
        "Scene 1\nAction: Runs\nPrompt: p1\n\n-------------------\nScene 2\nAction: Hides\nPrompt: p2\n"
    );
}

#[test]
fn test_json_export_reloads() {
    let original = story(vec![Scene::new(1, "Runs", "p1")]);
    let json = export_json(&original).unwrap();
    assert!(json.contains("\n  \"title\": \"Night Run\""));
    let reloaded: Story = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn test_zip_contains_rendered_images_and_script() {
    let png = ImageReference::from_base64("image/png", "aGVsbG8=");
    let jpeg = ImageReference::from_base64("image/jpeg", "d29ybGQ=");
    let exported = story(vec![
        Scene::new(1, "Runs", "p1").succeeded(png),
        Scene::new(2, "Hides", "p2").failed(),
        Scene::new(12, "Escapes", "p3").succeeded(jpeg),
    ]);

    let bytes = export_zip(&exported).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec!["images/scene_01.png", "images/scene_12.jpg", "script.txt"]
    );

    let mut contents = Vec::new();
    archive
        .by_name("images/scene_01.png")
        .unwrap()
        .read_to_end(&mut contents)
        .unwrap();
    assert_eq!(contents, b"hello");

    let mut script = String::new();
    archive
        .by_name("script.txt")
        .unwrap()
        .read_to_string(&mut script)
        .unwrap();
    assert_eq!(script, script_text(&exported));
}

#[test]
fn test_zip_without_images_is_refused() {
    let err = export_zip(&story(vec![Scene::new(1, "Runs", "p1").failed()])).unwrap_err();
    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::NothingToExport(_))
    ));
}

#[test]
fn test_zip_skips_undecodable_images() {
    let exported = story(vec![
        Scene::new(1, "Runs", "p1").succeeded(ImageReference::from_base64("image/png", "aGVsbG8=")),
        Scene::new(2, "Hides", "p2")
            .succeeded(ImageReference::from("https://example.com/x.png".to_string())),
    ]);

    let bytes = export_zip(&exported).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["images/scene_01.png", "script.txt"]);
}

#[test]
fn test_zip_with_only_undecodable_images_is_refused() {
    let broken = Scene::new(1, "Runs", "p1").succeeded(ImageReference::from("img-1".to_string()));
    let err = export_zip(&story(vec![broken])).unwrap_err();
    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::NothingToExport(_))
    ));
}
