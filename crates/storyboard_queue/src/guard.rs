//! One active run per story.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use storyboard_error::{QueueError, QueueErrorKind};
use tracing::debug;

/// Set of story ids with an active run.
pub(crate) type ActiveRuns = Arc<Mutex<HashSet<String>>>;

/// Marks a story as busy until dropped.
#[derive(Debug)]
pub struct RunGuard {
    active: ActiveRuns,
    story_id: String,
}

impl RunGuard {
    /// Claim `story_id`, failing if it is already claimed.
    #[track_caller]
    pub(crate) fn acquire(active: &ActiveRuns, story_id: &str) -> Result<Self, QueueError> {
        let mut set = active.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(story_id.to_string()) {
            return Err(QueueError::new(QueueErrorKind::AlreadyRunning {
                story_id: story_id.to_string(),
            }));
        }
        debug!(story_id, "Run guard acquired");
        Ok(Self {
            active: Arc::clone(active),
            story_id: story_id.to_string(),
        })
    }

    /// Story this guard holds.
    pub fn story_id(&self) -> &str {
        &self.story_id
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.story_id);
        debug!(story_id = %self.story_id, "Run guard released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_fails_until_release() {
        let active = ActiveRuns::default();
        let guard = RunGuard::acquire(&active, "s1").unwrap();
        assert_eq!(guard.story_id(), "s1");

        let err = RunGuard::acquire(&active, "s1").unwrap_err();
        assert_eq!(
            err.kind,
            QueueErrorKind::AlreadyRunning {
                story_id: "s1".to_string()
            }
        );
        assert!(RunGuard::acquire(&active, "s2").is_ok());

        drop(guard);
        assert!(RunGuard::acquire(&active, "s1").is_ok());
    }
}
