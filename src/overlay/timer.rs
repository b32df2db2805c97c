// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss scheduling.
//!
//! The scheduler holds deadlines and hands back cancel tokens. It never
//! hides anything itself: the orchestrator drains due entries on each tick
//! and decides, per overlay, whether a hide is still warranted. Cancelling
//! on manual dismissal is mandatory — a timer firing after the user already
//! dismissed would double-hide.

use std::time::{Duration, Instant};

/// Token identifying one scheduled auto-dismiss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct TimerEntry {
    token: TimerToken,
    deadline: Instant,
    overlay_id: String,
}

/// Deadline store for pending auto-dismissals.
#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<TimerEntry>,
    next_token: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a dismissal of `overlay_id` after `delay`.
    ///
    /// A zero delay disables auto-dismiss: nothing is scheduled and no
    /// token is returned.
    pub fn schedule(
        &mut self,
        delay: Duration,
        overlay_id: impl Into<String>,
        now: Instant,
    ) -> Option<TimerToken> {
        if delay.is_zero() {
            return None;
        }
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.entries.push(TimerEntry {
            token,
            deadline: now + delay,
            overlay_id: overlay_id.into(),
        });
        Some(token)
    }

    /// Cancels a pending entry. Returns whether it was still pending.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        before != self.entries.len()
    }

    /// Drains every entry whose deadline has passed, in deadline order,
    /// returning the overlay ids to dismiss.
    pub fn due(&mut self, now: Instant) -> Vec<String> {
        let mut fired: Vec<TimerEntry> = Vec::new();
        let mut remaining: Vec<TimerEntry> = Vec::new();
        for entry in self.entries.drain(..) {
            if entry.deadline <= now {
                fired.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.entries = remaining;
        fired.sort_by_key(|e| e.deadline);
        fired.into_iter().map(|e| e.overlay_id).collect()
    }

    /// Returns the number of pending entries.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}
