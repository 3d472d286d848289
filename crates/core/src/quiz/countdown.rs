/// Default attempt length: ten minutes.
pub const DEFAULT_DURATION_SECS: u32 = 10 * 60;

/// Result of advancing the countdown by one second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    /// Stopped or already at zero; nothing changed.
    Idle,
    Running { remaining: u32 },
    /// Reached zero on this tick.
    Expired,
}

/// Remaining-seconds countdown owned by a quiz attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    active: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(total_secs: u32) -> Self {
        Self {
            remaining: total_secs,
            active: total_secs > 0,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn tick(&mut self) -> CountdownTick {
        if !self.active || self.remaining == 0 {
            return CountdownTick::Idle;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            CountdownTick::Expired
        } else {
            CountdownTick::Running {
                remaining: self.remaining,
            }
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}

/// Format a total-seconds value as zero-padded `MM:SS`.
///
/// Minutes are not wrapped, so 6000 seconds reads `100:00`.
#[must_use]
pub fn format_countdown(total_secs: u32) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{minutes:02}:{seconds:02}")
}
