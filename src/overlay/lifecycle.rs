// SPDX-License-Identifier: MPL-2.0
//! Lifecycle stage tracking.
//!
//! Each overlay session owns one [`LifecycleObserver`]. Stages only move
//! forward; every stage is entered at most once; `Removed` is terminal.
//! Exactly-once delivery is enforced by stage-completion tracking, not by
//! timing, so a native signal that could fire twice still maps to a single
//! transition.

use crate::engine::NativeSignal;

/// The five lifecycle stages, in order.
///
/// `Created` precedes `Rendered`, `Rendered` precedes `Shown` and `Hidden`,
/// and `Removed` is terminal. Skipping forward is legal (an overlay hidden
/// before its show animation completed never enters `Shown`); revisiting an
/// earlier stage is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleStage {
    Created,
    Rendered,
    Shown,
    Hidden,
    Removed,
}

impl LifecycleStage {
    /// Returns the event-name token for this stage.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::Created => "created",
            LifecycleStage::Rendered => "rendered",
            LifecycleStage::Shown => "shown",
            LifecycleStage::Hidden => "hidden",
            LifecycleStage::Removed => "removed",
        }
    }
}

/// Maps an inbound native widget signal to the stage it completes.
///
/// `Hide` announces the start of a hide transition and completes no stage;
/// it only matters for toast `hide` emission.
#[must_use]
pub fn stage_for_signal(signal: NativeSignal) -> Option<LifecycleStage> {
    match signal {
        NativeSignal::Shown => Some(LifecycleStage::Shown),
        NativeSignal::Hide => None,
        NativeSignal::Hidden => Some(LifecycleStage::Hidden),
    }
}

/// Per-session stage tracker.
///
/// A reused root node gets a fresh observer: `Created`/`Rendered` reflect
/// the current build session's markup population, not the node's original
/// insertion.
#[derive(Debug, Default)]
pub struct LifecycleObserver {
    stage: Option<LifecycleStage>,
}

impl LifecycleObserver {
    /// Creates an observer that has fired nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last stage entered, if any.
    #[must_use]
    pub fn stage(&self) -> Option<LifecycleStage> {
        self.stage
    }

    /// Returns whether `stage` has been entered (directly or skipped over).
    #[must_use]
    pub fn has_reached(&self, stage: LifecycleStage) -> bool {
        self.stage.map(|s| s >= stage).unwrap_or(false)
    }

    /// Attempts to enter `target`.
    ///
    /// Returns `true` exactly when the stage is newly entered: the observer
    /// is not terminal and `target` is strictly ahead of the current stage.
    /// Regressions and repeats return `false` and change nothing.
    pub fn advance_to(&mut self, target: LifecycleStage) -> bool {
        if self.stage == Some(LifecycleStage::Removed) {
            return false;
        }
        match self.stage {
            Some(current) if current >= target => false,
            _ => {
                self.stage = Some(target);
                true
            }
        }
    }
}
