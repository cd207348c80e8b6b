//! Per-timer periodic tick drivers

use std::future::Future;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::SharedTimer;

/// Spawns one background driver per timer.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
}

/// Cancels its driver when [`cancel`](TickHandle::cancel)led or dropped.
#[derive(Debug)]
pub struct TickHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Calls `on_tick` once per period, starting immediately, until the
    /// returned handle is cancelled.
    ///
    /// The callback is awaited before the next wake, so ticks of one timer
    /// never overlap; wakes missed while it runs are skipped.
    pub fn subscribe<F, Fut>(&self, timer: SharedTimer, mut on_tick: F) -> TickHandle
    where
        F: FnMut(SharedTimer) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                if cancelled.is_cancelled() {
                    break;
                }

                on_tick(timer.clone()).await;
            }

            tracing::trace!("Tick driver stopped");
        });

        TickHandle { token, task }
    }

    pub fn cancel(&self, handle: &TickHandle) {
        handle.cancel();
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the driver task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
