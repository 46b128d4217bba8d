//! Story exports.

use std::io::{Cursor, Write};
use storyboard_core::{SceneStatus, Story};
use storyboard_error::{StorageError, StorageErrorKind, StoryboardResult};
use tracing::{debug, instrument, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const SCRIPT_SEPARATOR: &str = "\n-------------------\n";

/// Export kinds, used to pick a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed story document
    Json,
    /// Images plus `script.txt`
    Zip,
}

/// Suggested file name, derived from the title.
///
/// # Examples
///
/// ```
/// # use chrono::{TimeZone, Utc};
/// # use storyboard_core::Story;
/// use storyboard_storage::{ExportFormat, export_file_name};
///
/// # let story = Story {
/// #     id: "s".into(), created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
/// #     title: "Night Run".into(), genre: String::new(), logline: String::new(),
/// #     style: String::new(), characters: vec![], locations: vec![], scenes: vec![],
/// # };
/// assert_eq!(export_file_name(&story, ExportFormat::Json), "Night Run_2024-06-01.json");
/// assert_eq!(export_file_name(&story, ExportFormat::Zip), "Night Run_images.zip");
/// ```
pub fn export_file_name(story: &Story, format: ExportFormat) -> String {
    let title: String = story
        .title
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
        .collect();
    let title = if title.is_empty() { "storyboard".to_string() } else { title };
    match format {
        ExportFormat::Json => format!("{}_{}.json", title, story.created_at.format("%Y-%m-%d")),
        ExportFormat::Zip => format!("{}_images.zip", title),
    }
}

/// The whole story as pretty-printed JSON.
///
/// # Errors
///
/// Returns a serialization error if encoding fails.
pub fn export_json(story: &Story) -> StoryboardResult<String> {
    serde_json::to_string_pretty(story).map_err(|e| {
        StorageError::new(StorageErrorKind::Serialization(e.to_string())).into()
    })
}

/// Plain-text script: one block per scene, separated by a dashed line.
pub fn script_text(story: &Story) -> String {
    story
        .scenes
        .iter()
        .map(|scene| {
            format!(
                "Scene {}\nAction: {}\nPrompt: {}\n",
                scene.scene_number, scene.description, scene.visual_prompt
            )
        })
        .collect::<Vec<_>>()
        .join(SCRIPT_SEPARATOR)
}

/// ZIP archive with `images/scene_NN.<ext>` for every rendered scene and
/// `script.txt` covering all scenes.
///
/// Scenes whose image is not an inline base64 data URI are left out with a
/// warning.
///
/// # Errors
///
/// [`StorageErrorKind::NothingToExport`] when no scene has a successful,
/// decodable image and [`StorageErrorKind::Archive`] if the archive cannot
/// be written.
#[instrument(skip(story), fields(story_id = %story.id))]
pub fn export_zip(story: &Story) -> StoryboardResult<Vec<u8>> {
    let images: Vec<(String, Vec<u8>)> = story
        .scenes
        .iter()
        .filter(|scene| scene.status == SceneStatus::Success)
        .filter_map(|scene| {
            let image = scene.image.as_ref().filter(|image| !image.is_empty())?;
            match image.decode() {
                Ok(bytes) => Some((
                    format!("images/scene_{:02}.{}", scene.scene_number, image.extension()),
                    bytes,
                )),
                Err(e) => {
                    warn!(scene_number = scene.scene_number, error = %e.kind, "Skipping undecodable image");
                    None
                }
            }
        })
        .collect();

    if images.is_empty() {
        return Err(StorageError::new(StorageErrorKind::NothingToExport(format!(
            "story {} has no rendered images",
            story.id
        )))
        .into());
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut cursor);

        for (path, bytes) in &images {
            zip.start_file(path.as_str(), options).map_err(archive_error)?;
            zip.write_all(bytes).map_err(archive_error)?;
            debug!(path = %path, size = bytes.len(), "Added image to archive");
        }

        zip.start_file("script.txt", options).map_err(archive_error)?;
        zip.write_all(script_text(story).as_bytes())
            .map_err(archive_error)?;

        zip.finish().map_err(archive_error)?;
    }

    Ok(cursor.into_inner())
}

fn archive_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::new(StorageErrorKind::Archive(e.to_string()))
}
