//! Debounced full redraws after resize and visibility changes.
//!
//! The scheduler never reads a clock itself: callers pass the current
//! [`Instant`], which keeps it deterministic under test.

use std::time::{Duration, Instant};

use log::trace;

/// Why a redraw was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawReason {
    Resize,
    VisibilityRestored,
}

/// Holds at most one pending redraw; a later request replaces an earlier one.
#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    delay: Duration,
    pending: Option<(Instant, RedrawReason)>,
}

impl RedrawScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a redraw `delay` after `now`, replacing any pending one.
    pub fn schedule(&mut self, reason: RedrawReason, now: Instant) {
        let due = now + self.delay;
        trace!(reason:?; "Redraw scheduled");
        self.pending = Some((due, reason));
    }

    /// Schedules a redraw when the surface becomes visible again.
    ///
    /// Returns `false` and leaves the schedule untouched for hidden events.
    pub fn schedule_visibility(&mut self, visible: bool, now: Instant) -> bool {
        if !visible {
            return false;
        }
        self.schedule(RedrawReason::VisibilityRestored, now);
        true
    }

    /// Takes the pending redraw if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<RedrawReason> {
        match self.pending {
            Some((due, reason)) if now >= due => {
                self.pending = None;
                Some(reason)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending redraw, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}
