//! Autoplay timer
//!
//! A recurring timer with explicit states. Manual moves suspend it; the end
//! of that manual transition resumes it, once. Ticks that fall due while the
//! host wasn't polling are coalesced into a single tick rather than replayed.

use std::time::{Duration, Instant};

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayState {
    /// No timer exists
    Stopped,
    /// Next tick falls due at `next_due`
    Running { next_due: Instant },
    /// Cleared for a manual transition, restarts when it completes
    Suspended,
}

/// Recurring timer that requests "advance"
#[derive(Debug, Clone)]
pub struct AutoplayTimer {
    period: Duration,
    state: AutoplayState,
}

impl AutoplayTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            state: AutoplayState::Stopped,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> AutoplayState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AutoplayState::Running { .. })
    }

    pub fn is_suspended(&self) -> bool {
        self.state == AutoplayState::Suspended
    }

    /// When the next tick falls due, if running
    pub fn next_due(&self) -> Option<Instant> {
        match self.state {
            AutoplayState::Running { next_due } => Some(next_due),
            _ => None,
        }
    }

    /// (Re)start: the first tick falls due one period from `now`
    pub fn start(&mut self, now: Instant) {
        self.state = AutoplayState::Running {
            next_due: now + self.period,
        };
    }

    /// Clear the timer entirely, including any suspension
    pub fn stop(&mut self) {
        self.state = AutoplayState::Stopped;
    }

    /// Clear a running timer for a manual transition
    ///
    /// Returns true if the timer was running.
    pub fn suspend(&mut self) -> bool {
        if self.is_running() {
            self.state = AutoplayState::Suspended;
            true
        } else {
            false
        }
    }

    /// Restart a suspended timer
    ///
    /// Returns true if the timer was suspended.
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.is_suspended() {
            self.start(now);
            true
        } else {
            false
        }
    }

    /// Check for a due tick
    ///
    /// Returns true at most once per call. Overdue periods are skipped so
    /// the next tick lands in the future.
    pub fn poll(&mut self, now: Instant) -> bool {
        let AutoplayState::Running { next_due } = self.state else {
            return false;
        };
        if now < next_due {
            return false;
        }

        let mut next = next_due + self.period;
        if next <= now {
            let behind = now.duration_since(next_due).as_nanos() / self.period.as_nanos().max(1);
            let skipped = u32::try_from(behind).unwrap_or(u32::MAX);
            next = next_due + self.period.saturating_mul(skipped.saturating_add(1));
        }
        self.state = AutoplayState::Running { next_due: next };
        true
    }
}
