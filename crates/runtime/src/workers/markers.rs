//! Fire-and-forget marker clearing on tokio timers.

use std::time::Duration;

use combat_core::MarkerScheduler;
use tokio::runtime::Handle;

/// Clears cosmetic markers after their lifetime on a tokio runtime.
///
/// Scheduled clears are never cancelled. Stale ones are ignored by the
/// marker's generation check.
#[derive(Debug, Clone)]
pub struct TokioMarkerScheduler {
    handle: Handle,
}

impl TokioMarkerScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler bound to the runtime of the calling task, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl MarkerScheduler for TokioMarkerScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send + 'static>) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}
