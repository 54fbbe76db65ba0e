use std::time::{Duration, Instant};

/// A restartable hold timer: once started it stays active for a fixed
/// duration, and starting it again before expiry restarts the window.
///
/// Time is passed in explicitly so state transitions can be driven (and
/// tested) without sleeping.
#[derive(Debug, Clone)]
pub struct HoldTimer {
    hold: Duration,
    started: Option<Instant>,
}

impl HoldTimer {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            started: None,
        }
    }

    /// Start or restart the hold window at `now`.
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Whether the window is still open at `now`.
    pub fn is_active(&self, now: Instant) -> bool {
        match self.started {
            Some(started) => now.duration_since(started) < self.hold,
            None => false,
        }
    }

    /// Returns true exactly once when the window has elapsed, clearing the
    /// timer as a side effect.
    pub fn take_expired(&mut self, now: Instant) -> bool {
        match self.started {
            Some(started) if now.duration_since(started) >= self.hold => {
                self.started = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel any pending window.
    pub fn cancel(&mut self) {
        self.started = None;
    }

    pub fn is_pending(&self) -> bool {
        self.started.is_some()
    }
}
