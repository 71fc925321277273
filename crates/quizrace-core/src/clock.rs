//! Clock abstraction and the one-shot question timer.
//!
//! A [`Timer`] runs as its own tokio task and reports expiry through a
//! single-fire channel, so the runner can await it next to the answer wait
//! and drop whichever side loses.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Source of time for question timers.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;

    /// A future that completes after `duration`.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;

    /// Schedule a one-shot timer that fires after `duration`.
    ///
    /// Must be called from within a tokio runtime.
    fn after(&self, duration: Duration) -> Timer {
        let deadline = self.now() + duration;
        Timer::spawn(deadline, self.sleep(duration))
    }
}

/// Clock backed by `tokio::time`. Honours paused time in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed()
    }
}

/// Lifecycle of a [`Timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Armed,
    Fired,
    Cancelled,
}

/// A cancellable one-shot expiry signal.
///
/// Dropping the timer cancels it.
#[derive(Debug)]
pub struct Timer {
    deadline: Instant,
    state: TimerState,
    signal: oneshot::Receiver<()>,
    task: JoinHandle<()>,
}

impl Timer {
    fn spawn(deadline: Instant, sleep: BoxFuture<'static, ()>) -> Self {
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            sleep.await;
            let _ = tx.send(());
        });
        Self {
            deadline,
            state: TimerState::Armed,
            signal: rx,
            task,
        }
    }

    /// The instant at which the timer fires.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Wait until the timer fires or is found cancelled.
    ///
    /// Cancel-safe: dropping this future leaves the timer armed.
    pub async fn expired(&mut self) -> TimerState {
        if self.state == TimerState::Armed {
            self.state = match (&mut self.signal).await {
                Ok(()) => TimerState::Fired,
                Err(_) => TimerState::Cancelled,
            };
        }
        self.state
    }

    /// Cancel the timer. A no-op once it has fired or been cancelled.
    pub fn cancel(&mut self) {
        if self.state == TimerState::Armed {
            self.state = TimerState::Cancelled;
        }
        self.task.abort();
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
