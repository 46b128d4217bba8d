//! The storyboard generation queue.
//!
//! [`GenerationQueue`] walks a story's scenes in order and renders every
//! scene that does not already hold a successful image. At most one image
//! request is in flight. Rate-limited attempts are retried a bounded number
//! of times after a fixed cooldown, and each rendered scene is followed by a
//! fixed pause before the next request.
//!
//! Progress is reported to a [`QueueObserver`](storyboard_interface::QueueObserver)
//! as owned snapshots; the queue never persists anything itself.
//!
//! ```ignore
//! let queue = GenerationQueue::new(client, RetryPolicy::default());
//! let outcome = queue.run(&story, &TracingObserver).await?;
//! assert!(outcome.story.scenes.iter().all(|s| s.status.is_terminal()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod guard;
mod observer;
mod outcome;
mod queue;

pub use guard::RunGuard;
pub use observer::{ChannelObserver, NoopObserver, TracingObserver};
pub use outcome::{Regenerated, RunOutcome, RunStats};
pub use queue::GenerationQueue;
pub use tokio_util::sync::CancellationToken;
