//! Recurring scan polling.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Shortest tick interval; shorter periods, zero included, are raised to it.
pub const MIN_POLL_PERIOD: Duration = Duration::from_millis(1);

/// What a poll tick asks of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// Keep ticking
    Continue,
    /// Stop the timer; nothing left to wait for
    Done,
}

/// A running poll timer.
///
/// Cancelled when dropped or passed to [`PollHandle::cancel`]. Cancelling
/// also drops a tick that is mid-request, so its result never reaches the
/// view.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Spawn a timer calling `tick` every `period`, first one `period`
    /// after now. A tick runs to completion before the next is scheduled.
    /// `period` is clamped to [`MIN_POLL_PERIOD`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = PollStep> + Send + 'static,
    {
        let period = period.max(MIN_POLL_PERIOD);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if tick().await == PollStep::Done {
                    debug!("Poll timer finished");
                    break;
                }
            }
        });

        Self { task }
    }

    /// Whether the timer is still ticking
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the timer.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// The controller's single polling slot: idle, or holding one timer.
#[derive(Debug)]
pub struct PollingSession {
    period: Duration,
    handle: Option<PollHandle>,
}

impl PollingSession {
    /// An idle session that will tick every `period` once started.
    /// `period` is clamped to [`MIN_POLL_PERIOD`].
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_POLL_PERIOD),
            handle: None,
        }
    }

    /// Tick interval
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start polling, cancelling any timer already held.
    pub fn start<F, Fut>(&mut self, tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = PollStep> + Send + 'static,
    {
        if let Some(previous) = self.handle.take() {
            previous.cancel();
        }
        self.handle = Some(PollHandle::spawn(self.period, tick));
    }

    /// Stop polling. Returns whether a timer was still running.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_running = handle.is_running();
                handle.cancel();
                was_running
            }
            None => false,
        }
    }

    /// Whether a timer is currently ticking
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(PollHandle::is_running)
    }
}
