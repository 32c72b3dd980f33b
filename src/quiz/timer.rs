//! Advisory countdown for an attempt
//!
//! [`Countdown`] is plain state; [`CountdownHandle`] drives it from a
//! background tokio task that ticks once per second. Dropping the handle
//! cancels the task, so the countdown never outlives the quiz screen that
//! owns it. Reaching zero has no effect on the session.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Default allowance per question
pub const SECONDS_PER_QUESTION: u64 = 60;

/// Remaining-time counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
}

impl Countdown {
    pub fn new(total_seconds: u64) -> Self {
        Self { remaining: total_seconds }
    }

    /// Countdown for `question_count` questions at `seconds_per_question` each
    pub fn for_questions(question_count: usize, seconds_per_question: u64) -> Self {
        Self::new(question_count as u64 * seconds_per_question)
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Decrement by one second, floored at zero
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn label(&self) -> String {
        format_clock(self.remaining)
    }
}

/// `H:MM:SS` with an hour component, else `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 { format!("{}:{:02}:{:02}", h, m, s) } else { format!("{:02}:{:02}", m, s) }
}

/// A running countdown
///
/// The remaining time is shared with the ticking task through an atomic so
/// the UI can read it on every frame without locking.
#[derive(Debug)]
pub struct CountdownHandle {
    remaining: Arc<AtomicU64>,
    cancel_token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    /// Spawn a one-second interval task on the current tokio runtime
    pub fn start(countdown: Countdown) -> Self {
        Self::start_with_period(countdown, Duration::from_secs(1))
    }

    fn start_with_period(countdown: Countdown, period: Duration) -> Self {
        let remaining = Arc::new(AtomicU64::new(countdown.remaining()));
        let cancel_token = CancellationToken::new();

        let task = tokio::spawn({
            let remaining = Arc::clone(&remaining);
            let cancel_token = cancel_token.clone();
            async move {
                let mut interval = tokio::time::interval(period);
                // the first tick of an interval completes immediately
                interval.tick().await;
                loop {
                    tokio::select! {
                        _ = cancel_token.cancelled() => break,
                        _ = interval.tick() => {
                            let _ = remaining.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |r| {
                                Some(r.saturating_sub(1))
                            });
                        }
                    }
                }
                tracing::debug!("Countdown task stopped");
            }
        });

        Self { remaining, cancel_token, task: Some(task) }
    }

    /// Snapshot of the current state
    pub fn countdown(&self) -> Countdown {
        Countdown::new(self.remaining.load(Ordering::Relaxed))
    }

    /// Whether the ticking task is still live
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Token that fires when the countdown is stopped or dropped
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Cancel the ticking task; safe to call more than once
    pub fn stop(&mut self) {
        self.cancel_token.cancel();
        self.task.take();
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
