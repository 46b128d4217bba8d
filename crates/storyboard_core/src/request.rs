//! User input for script generation.

use crate::DEFAULT_STYLE;
use serde::{Deserialize, Serialize};
use storyboard_error::{ConfigError, ConfigErrorKind};

/// Fewest frames a storyboard may have.
pub const MIN_FRAMES: u32 = 4;
/// Most frames a storyboard may have.
pub const MAX_FRAMES: u32 = 30;

/// A validated story idea.
///
/// # Examples
///
/// ```
/// use storyboard_core::StoryRequest;
///
/// let request = StoryRequest::new("A lighthouse keeper befriends a whale", 12, "Watercolor").unwrap();
/// assert_eq!(*request.frame_count(), 12);
///
/// assert!(StoryRequest::new("   ", 12, "Watercolor").is_err());
/// assert!(StoryRequest::new("idea", 2, "Watercolor").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryRequest {
    /// Free-text story idea
    idea: String,
    /// Number of scenes to produce
    frame_count: u32,
    /// Visual style tag
    style: String,
}

impl StoryRequest {
    /// Validate and build a request. A blank style falls back to [`DEFAULT_STYLE`].
    ///
    /// # Errors
    ///
    /// Fails on an empty idea or a frame count outside `MIN_FRAMES..=MAX_FRAMES`.
    #[track_caller]
    pub fn new(
        idea: impl Into<String>,
        frame_count: u32,
        style: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let idea = idea.into().trim().to_string();
        if idea.is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::EmptyIdea));
        }
        if !(MIN_FRAMES..=MAX_FRAMES).contains(&frame_count) {
            return Err(ConfigError::new(ConfigErrorKind::FrameCount {
                got: frame_count,
                min: MIN_FRAMES,
                max: MAX_FRAMES,
            }));
        }
        let style = style.into().trim().to_string();
        let style = if style.is_empty() {
            DEFAULT_STYLE.to_string()
        } else {
            style
        };
        Ok(Self {
            idea,
            frame_count,
            style,
        })
    }
}
