//! Drives an attempt's countdown from a tokio interval.
//!
//! The UI spawns [`AttemptTimer::run`] as a task owned by the attempt view, so
//! dropping the view drops the task and the interval with it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use exam_core::quiz::{Phase, QuizAttempt, TickOutcome};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What the timer loop does after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerControl {
    Continue,
    Stop,
}

#[derive(Debug)]
pub struct AttemptTimer {
    interval: Interval,
}

impl AttemptTimer {
    /// One tick per second, the first one a full period from now.
    #[must_use]
    pub fn start() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// Call `on_tick` once per period until it returns [`TimerControl::Stop`].
    /// Returns the number of ticks delivered.
    pub async fn run<F>(mut self, mut on_tick: F) -> u64
    where
        F: FnMut() -> TimerControl,
    {
        let mut ticks = 0_u64;
        loop {
            self.interval.tick().await;
            ticks += 1;
            if on_tick() == TimerControl::Stop {
                debug!(ticks, "attempt timer stopped");
                return ticks;
            }
        }
    }
}

/// Apply one timer tick to `attempt`; stop once it has left the answering phase.
pub fn tick_attempt(attempt: &mut QuizAttempt, now: DateTime<Utc>) -> TimerControl {
    match attempt.tick(now) {
        TickOutcome::Ticked { .. } => TimerControl::Continue,
        TickOutcome::Expired => {
            info!(
                answered = attempt.progress().answered,
                total = attempt.total_questions(),
                "quiz attempt timed out"
            );
            TimerControl::Stop
        }
        TickOutcome::Idle => {
            if attempt.phase() == Phase::Answering && attempt.timer_active() {
                TimerControl::Continue
            } else {
                TimerControl::Stop
            }
        }
    }
}
