//! Console progress for generation runs.

use async_trait::async_trait;
use storyboard::{QueueEvent, QueueObserver, SceneStatus};

/// Prints one line per queue transition to stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleObserver {
    total: usize,
}

impl ConsoleObserver {
    /// Progress for a story with `total` scenes.
    pub fn new(total: usize) -> Self {
        Self { total }
    }
}

#[async_trait]
impl QueueObserver for ConsoleObserver {
    async fn on_event(&self, event: &QueueEvent) {
        match event {
            QueueEvent::SceneStarted { index, .. } => {
                println!("[{}/{}] Rendering scene {}...", index + 1, self.total, index + 1);
            }
            QueueEvent::RetryScheduled {
                index,
                retry,
                delay,
                ..
            } => {
                println!(
                    "[{}/{}] Rate limited, retry {} in {}s",
                    index + 1,
                    self.total,
                    retry,
                    delay.as_secs()
                );
            }
            QueueEvent::SceneFinished {
                index,
                status,
                error,
                ..
            } => match (status, error) {
                (SceneStatus::Success, _) => {
                    println!("[{}/{}] Scene {} done", index + 1, self.total, index + 1);
                }
                (_, Some(err)) => {
                    println!(
                        "[{}/{}] Scene {} failed: {}",
                        index + 1,
                        self.total,
                        index + 1,
                        err.kind.user_message()
                    );
                }
                (_, None) => {
                    println!("[{}/{}] Scene {} failed", index + 1, self.total, index + 1);
                }
            },
            QueueEvent::RunCompleted { cancelled: true, .. } => {
                println!("Rendering stopped; progress saved");
            }
            QueueEvent::RunCompleted { .. } => {}
        }
    }
}
