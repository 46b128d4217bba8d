//! Story editing handlers.
//!
//! Every edit loads the story, derives a changed copy and saves it back.
//! Image status is left alone; a changed visual prompt is picked up the
//! next time the scene is regenerated.

use super::commands::EditCommands;
use super::context::AppContext;
use storyboard::{
    ConfigError, ConfigErrorKind, QueueError, QueueErrorKind, Story, StoryRepository,
    StoryboardResult,
};
use tracing::info;

/// Handle story editing commands.
pub async fn handle_edit_command(ctx: &AppContext, cmd: EditCommands) -> StoryboardResult<()> {
    let (id, edit) = match cmd {
        EditCommands::Story {
            id,
            title,
            genre,
            logline,
        } => (id, Edit::Story { title, genre, logline }),
        EditCommands::Scene {
            id,
            scene,
            description,
            prompt,
        } => (
            id,
            Edit::Scene {
                index: position(scene),
                description,
                prompt,
            },
        ),
        EditCommands::Character {
            id,
            index,
            name,
            description,
            prompt,
        } => (
            id,
            Edit::Character {
                index: position(index),
                fields: EntityFields {
                    name,
                    description,
                    prompt,
                },
            },
        ),
        EditCommands::Location {
            id,
            index,
            name,
            description,
            prompt,
        } => (
            id,
            Edit::Location {
                index: position(index),
                fields: EntityFields {
                    name,
                    description,
                    prompt,
                },
            },
        ),
    };

    if edit.is_empty() {
        println!("Nothing to change");
        return Ok(());
    }

    let story = ctx.repository().load(&id).await?;
    let edited = edit.apply(&story)?;
    ctx.repository().save(&edited).await?;
    info!(story_id = %edited.id, "Story edited");
    println!("Saved {}", edited.id);
    Ok(())
}

fn position(number: u32) -> usize {
    number.saturating_sub(1) as usize
}

#[derive(Debug, Default)]
struct EntityFields {
    name: Option<String>,
    description: Option<String>,
    prompt: Option<String>,
}

impl EntityFields {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.prompt.is_none()
    }
}

#[derive(Debug)]
enum Edit {
    Story {
        title: Option<String>,
        genre: Option<String>,
        logline: Option<String>,
    },
    Scene {
        index: usize,
        description: Option<String>,
        prompt: Option<String>,
    },
    Character {
        index: usize,
        fields: EntityFields,
    },
    Location {
        index: usize,
        fields: EntityFields,
    },
}

impl Edit {
    fn is_empty(&self) -> bool {
        match self {
            Edit::Story {
                title,
                genre,
                logline,
            } => title.is_none() && genre.is_none() && logline.is_none(),
            Edit::Scene {
                description,
                prompt,
                ..
            } => description.is_none() && prompt.is_none(),
            Edit::Character { fields, .. } | Edit::Location { fields, .. } => fields.is_empty(),
        }
    }

    fn apply(&self, story: &Story) -> StoryboardResult<Story> {
        match self {
            Edit::Story {
                title,
                genre,
                logline,
            } => {
                let mut edited = story.clone();
                if let Some(title) = title {
                    edited = edited.with_title(title.as_str());
                }
                if let Some(genre) = genre {
                    edited = edited.with_genre(genre.as_str());
                }
                if let Some(logline) = logline {
                    edited = edited.with_logline(logline.as_str());
                }
                Ok(edited)
            }
            Edit::Scene {
                index,
                description,
                prompt,
            } => {
                let mut scene = story.scenes.get(*index).cloned().ok_or_else(|| {
                    QueueError::new(QueueErrorKind::SceneOutOfRange {
                        index: *index,
                        len: story.scenes.len(),
                    })
                })?;
                if let Some(description) = description {
                    scene = scene.with_description(description.as_str());
                }
                if let Some(prompt) = prompt {
                    scene = scene.with_visual_prompt(prompt.as_str());
                }
                Ok(story.with_scene(*index, scene)?)
            }
            Edit::Character { index, fields } => {
                let mut character = story.characters.get(*index).cloned().ok_or_else(|| {
                    ConfigError::new(ConfigErrorKind::NoSuchEntry {
                        entity: "character",
                        position: index + 1,
                        len: story.characters.len(),
                    })
                })?;
                if let Some(name) = &fields.name {
                    character = character.with_name(name.as_str());
                }
                if let Some(description) = &fields.description {
                    character = character.with_description(description.as_str());
                }
                if let Some(prompt) = &fields.prompt {
                    character = character.with_visual_prompt(prompt.as_str());
                }
                Ok(story.with_character(*index, character))
            }
            Edit::Location { index, fields } => {
                let mut location = story.locations.get(*index).cloned().ok_or_else(|| {
                    ConfigError::new(ConfigErrorKind::NoSuchEntry {
                        entity: "location",
                        position: index + 1,
                        len: story.locations.len(),
                    })
                })?;
                if let Some(name) = &fields.name {
                    location = location.with_name(name.as_str());
                }
                if let Some(description) = &fields.description {
                    location = location.with_description(description.as_str());
                }
                if let Some(prompt) = &fields.prompt {
                    location = location.with_visual_prompt(prompt.as_str());
                }
                Ok(story.with_location(*index, location))
            }
        }
    }
}
