// SPDX-License-Identifier: MPL-2.0
//! Per-control re-entrancy latch.
//!
//! A control's handler must run at most once per activation cycle. The
//! guard discards activations that arrive while the handler is running or
//! before the cooldown window has elapsed; discarded activations are never
//! queued or replayed.

use std::time::{Duration, Instant};

/// Re-entrancy latch attached to one interactive control.
#[derive(Debug)]
pub struct ActionGuard {
    cooldown: Duration,
    running: bool,
    locked_until: Option<Instant>,
}

impl ActionGuard {
    /// Creates a guard with the given cooldown window.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            running: false,
            locked_until: None,
        }
    }

    /// Attempts to start an activation cycle at `now`.
    ///
    /// Returns `false` (discard) while a handler run is in flight or the
    /// cooldown from the previous run has not elapsed.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if self.running {
            return false;
        }
        if let Some(until) = self.locked_until {
            if now < until {
                return false;
            }
        }
        self.running = true;
        true
    }

    /// Marks the current handler run finished and arms the cooldown.
    pub fn complete(&mut self, now: Instant) {
        self.running = false;
        self.locked_until = Some(now + self.cooldown);
    }

    /// Returns whether an activation would currently be discarded.
    #[must_use]
    pub fn is_locked(&self, now: Instant) -> bool {
        self.running || self.locked_until.map(|until| now < until).unwrap_or(false)
    }
}
