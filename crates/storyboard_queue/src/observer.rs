//! Ready-made queue observers.

use async_trait::async_trait;
use storyboard_interface::{QueueEvent, QueueObserver};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

#[async_trait]
impl QueueObserver for NoopObserver {
    async fn on_event(&self, _event: &QueueEvent) {}
}

/// Logs every transition through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

#[async_trait]
impl QueueObserver for TracingObserver {
    async fn on_event(&self, event: &QueueEvent) {
        match event {
            QueueEvent::SceneStarted { index, scenes } => {
                info!(scene = index + 1, total = scenes.len(), "Rendering scene");
            }
            QueueEvent::RetryScheduled {
                index,
                retry,
                delay,
                error,
            } => {
                warn!(
                    scene = index + 1,
                    retry,
                    ?delay,
                    error = %error.kind,
                    "Rate limited, retrying after cooldown"
                );
            }
            QueueEvent::SceneFinished {
                index,
                status,
                error,
                ..
            } => match error {
                Some(error) => warn!(scene = index + 1, %status, error = %error.kind, "Scene failed"),
                None => info!(scene = index + 1, %status, "Scene finished"),
            },
            QueueEvent::RunCompleted { scenes, cancelled } => {
                let done = scenes.iter().filter(|s| !s.needs_generation()).count();
                info!(done, total = scenes.len(), cancelled, "Run completed");
            }
        }
    }
}

/// Forwards events into an unbounded channel.
///
/// Sending never blocks the queue; events are dropped once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: UnboundedSender<QueueEvent>,
}

impl ChannelObserver {
    /// Observer sending into `sender`.
    pub fn new(sender: UnboundedSender<QueueEvent>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl QueueObserver for ChannelObserver {
    async fn on_event(&self, event: &QueueEvent) {
        if self.sender.send(event.clone()).is_err() {
            tracing::debug!("Event receiver dropped");
        }
    }
}
