//! Export command handler.

use super::commands::ExportKind;
use super::context::AppContext;
use std::path::{Path, PathBuf};
use storyboard::{
    ExportFormat, StorageError, StorageErrorKind, StoryRepository, StoryboardResult,
    export_file_name, export_json, export_zip,
};
use tracing::info;

/// Write a saved story to disk as JSON or as a ZIP of its images.
pub async fn export_story(
    ctx: &AppContext,
    id: &str,
    kind: ExportKind,
    output: Option<&Path>,
) -> StoryboardResult<()> {
    let story = ctx.repository().load(id).await?;
    let format = match kind {
        ExportKind::Json => ExportFormat::Json,
        ExportKind::Zip => ExportFormat::Zip,
    };

    let bytes = match format {
        ExportFormat::Json => export_json(&story)?.into_bytes(),
        ExportFormat::Zip => export_zip(&story)?,
    };

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(export_file_name(&story, format)));
    tokio::fs::write(&path, &bytes).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    info!(story_id = %story.id, format = %format, size = bytes.len(), "Story exported");
    println!("Wrote {}", path.display());
    Ok(())
}
