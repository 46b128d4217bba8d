//! Script writing, rendering and regeneration handlers.

use super::context::AppContext;
use super::progress::ConsoleObserver;
use storyboard::{
    CancellationToken, PersistingObserver, SceneStatus, ScriptGenerator, Story,
    StoryRepository, StoryRequest, StoryboardResult, StylePreset,
};
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

/// Write a script for `idea`, save it, and optionally render it straight away.
#[instrument(skip(ctx, idea))]
pub async fn create_story(
    ctx: &AppContext,
    idea: &str,
    frames: u32,
    style: &str,
    render: bool,
) -> StoryboardResult<()> {
    let style = StylePreset::find(style)
        .map(|preset| preset.id().to_string())
        .unwrap_or_else(|| style.to_string());
    let request = StoryRequest::new(idea, frames, style)?;
    let client = ctx.client()?;

    println!("Writing script...");
    let story = client.generate_script(&request).await?;
    ctx.repository().save(&story).await?;
    info!(story_id = %story.id, scenes = story.scenes.len(), "Script saved");

    print_summary(&story);
    println!();
    println!("Saved as {}", story.id);

    if render {
        render_loaded(ctx, story).await?;
    } else {
        println!("Run `storyboard render {}` to draw the scenes", story.id);
    }
    Ok(())
}

/// Render every scene of a saved story that still needs an image.
pub async fn render_story(ctx: &AppContext, id: &str) -> StoryboardResult<()> {
    let story = ctx.repository().load(id).await?;
    render_loaded(ctx, story).await
}

async fn render_loaded(ctx: &AppContext, story: Story) -> StoryboardResult<()> {
    let pending = story.pending_indices().len();
    if pending == 0 {
        println!("Every scene of {} is already rendered", story.id);
        return Ok(());
    }

    let queue = ctx.queue()?;
    let cancel = CancellationToken::new();
    let interrupt = spawn_interrupt_handler(cancel.clone());

    println!("Rendering {} of {} scenes (Ctrl-C to stop)", pending, story.scenes.len());
    let observer = PersistingObserver::new(
        ctx.repository().clone(),
        story.clone(),
        ConsoleObserver::new(story.scenes.len()),
    );
    let result = queue.run_with_cancel(&story, &observer, cancel).await;
    interrupt.abort();

    let outcome = result?;
    ctx.repository().save(&outcome.story).await?;

    println!(
        "Rendered {}, failed {}, skipped {}, retries {}",
        outcome.stats.generated, outcome.stats.failed, outcome.stats.skipped, outcome.stats.retries
    );
    if outcome.stats.failed > 0 {
        println!("Run `storyboard render {}` again to retry failed scenes", outcome.story.id);
    }
    Ok(())
}

fn spawn_interrupt_handler(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, stopping after the current step");
                cancel.cancel();
            }
            Err(e) => warn!(error = %e, "Could not listen for Ctrl-C"),
        }
    })
}

/// Generate one scene again, optionally with a new visual prompt.
pub async fn regenerate_scene(
    ctx: &AppContext,
    id: &str,
    scene_number: u32,
    prompt: Option<&str>,
) -> StoryboardResult<()> {
    let story = ctx.repository().load(id).await?;
    let index = scene_number.saturating_sub(1) as usize;
    let queue = ctx.queue()?;
    let observer = ConsoleObserver::new(story.scenes.len());

    let regenerated = queue
        .regenerate_scene(&story, index, prompt, &observer)
        .await?;
    ctx.repository().save(&regenerated.story).await?;

    if regenerated.error.is_some() {
        println!("Previous image kept; the scene is marked as failed");
    }
    Ok(())
}

/// Print the built-in style presets.
pub fn list_styles() {
    for preset in StylePreset::iter() {
        println!("{:<20} {}", preset.id(), preset.description());
    }
}

/// Title, logline, cast and scene list.
pub(super) fn print_summary(story: &Story) {
    println!("{} ({})", story.title, story.genre);
    println!("{}", story.logline);
    println!("Style: {}", story.style);

    if !story.characters.is_empty() {
        println!();
        println!("Characters:");
        for (i, character) in story.characters.iter().enumerate() {
            println!("  {}. {} - {}", i + 1, character.name, character.description);
        }
    }
    if !story.locations.is_empty() {
        println!();
        println!("Locations:");
        for (i, location) in story.locations.iter().enumerate() {
            println!("  {}. {} - {}", i + 1, location.name, location.description);
        }
    }

    println!();
    println!("Scenes:");
    for scene in &story.scenes {
        let marker = match scene.status {
            SceneStatus::Success => "x",
            SceneStatus::Error => "!",
            SceneStatus::Loading => "~",
            SceneStatus::Pending => " ",
        };
        println!("  [{}] {:>2}. {}", marker, scene.scene_number, scene.description);
    }
}
