//! Countdown timer driven by caller-supplied time.
//!
//! The timer never reads a clock. Every call that moves it forward takes the
//! current time in microseconds, which keeps dialog iteration replayable.

use std::time::Duration;

/// A one-shot countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountdownTimer {
    /// Length of the countdown in microseconds.
    duration_us: u64,
    /// Time at which the countdown runs out.
    deadline_us: u64,
    /// Microseconds left as of the last tick. Negative once overdue.
    remaining_us: i64,
    /// Set by `begin`, cleared by `end`.
    running: bool,
    /// Set by `end`.
    ended: bool,
}

impl CountdownTimer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duration_us: 0,
            deadline_us: 0,
            remaining_us: 0,
            running: false,
            ended: false,
        }
    }

    /// Starts counting down `duration` from `now_us`.
    pub fn begin(&mut self, duration: Duration, now_us: u64) {
        let duration_us = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.duration_us = duration_us;
        self.deadline_us = now_us.saturating_add(duration_us);
        self.remaining_us = i64::try_from(duration_us).unwrap_or(i64::MAX);
        self.running = true;
        self.ended = false;
    }

    /// Advances the timer to `now_us`.
    pub fn tick(&mut self, now_us: u64) {
        if !self.running {
            return;
        }
        let remaining = i128::from(self.deadline_us) - i128::from(now_us);
        self.remaining_us = i64::try_from(remaining).unwrap_or(if remaining < 0 {
            i64::MIN
        } else {
            i64::MAX
        });
    }

    /// Returns true once the deadline has been reached.
    #[inline]
    #[must_use]
    pub const fn has_expired(&self) -> bool {
        self.running && self.remaining_us <= 0
    }

    /// Stops the timer and marks it ended.
    pub fn end(&mut self) {
        self.running = false;
        self.ended = true;
    }

    /// Returns true between `begin` and `end`.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true after `end`.
    #[inline]
    #[must_use]
    pub const fn is_ended(&self) -> bool {
        self.ended
    }

    /// Returns the configured countdown length.
    #[inline]
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_micros(self.duration_us)
    }

    /// Returns the time left as of the last tick, zero once expired.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        Duration::from_micros(u64::try_from(self.remaining_us).unwrap_or(0))
    }
}
