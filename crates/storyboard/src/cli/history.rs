//! History command handlers.

use super::commands::HistoryCommands;
use super::context::AppContext;
use super::story::print_summary;
use storyboard::{
    SceneStatus, StoryRepository, StoryboardResult, export_json,
};

/// Handle history commands.
pub async fn handle_history_command(
    ctx: &AppContext,
    cmd: HistoryCommands,
) -> StoryboardResult<()> {
    match cmd {
        HistoryCommands::List => list(ctx).await,
        HistoryCommands::Show { id, json } => show(ctx, &id, json).await,
        HistoryCommands::Delete { id } => {
            let remaining = ctx.repository().delete(&id).await?;
            println!("Deleted {}; {} stories left", id, remaining.len());
            Ok(())
        }
        HistoryCommands::Clear { yes } => {
            if !yes {
                eprintln!("Refusing to clear history without --yes");
                return Ok(());
            }
            ctx.repository().clear().await?;
            println!("History cleared");
            Ok(())
        }
    }
}

async fn list(ctx: &AppContext) -> StoryboardResult<()> {
    let stories = ctx.repository().list().await?;
    if stories.is_empty() {
        println!("No saved stories");
        return Ok(());
    }

    println!("{:<38} {:<17} {:<9} {:>6}  TITLE", "ID", "CREATED", "STAGE", "IMAGES");
    println!("{:-<80}", "");
    for story in &stories {
        println!(
            "{:<38} {:<17} {:<9} {:>2}/{:<3}  {}",
            story.id,
            story.created_at.format("%Y-%m-%d %H:%M"),
            story.stage(),
            story.count_status(SceneStatus::Success),
            story.scenes.len(),
            story.title
        );
    }
    println!("{:-<80}", "");
    println!("Total: {} stories", stories.len());
    Ok(())
}

async fn show(ctx: &AppContext, id: &str, json: bool) -> StoryboardResult<()> {
    let story = ctx.repository().load(id).await?;
    if json {
        println!("{}", export_json(&story)?);
    } else {
        println!("{} [{}]", story.id, story.stage());
        print_summary(&story);
    }
    Ok(())
}
