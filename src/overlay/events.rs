// SPDX-License-Identifier: MPL-2.0
//! Namespaced event dispatch.
//!
//! Every lifecycle stage and user action is re-emitted as a structured
//! event named `overlay:<kind>:<event>`. Names are stable across
//! invocations so external code can subscribe once. Delivery is synchronous
//! and fire-and-forget: a panicking listener is reported to diagnostics and
//! never blocks the listeners behind it.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::options::OptionsSnapshot;
use crate::diagnostics::{panic_message, DiagnosticsHandle};

/// Event-name namespace prefix.
pub const NAMESPACE: &str = "overlay";

/// The overlay kind, as it appears in event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Alert,
    Toast,
}

impl OverlayKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayKind::Alert => "alert",
            OverlayKind::Toast => "toast",
        }
    }
}

/// The action or stage an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Created,
    Rendered,
    Ok,
    Cancel,
    Show,
    Shown,
    Hide,
    Hidden,
    Removed,
}

impl ActionKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Created => "created",
            ActionKind::Rendered => "rendered",
            ActionKind::Ok => "ok",
            ActionKind::Cancel => "cancel",
            ActionKind::Show => "show",
            ActionKind::Shown => "shown",
            ActionKind::Hide => "hide",
            ActionKind::Hidden => "hidden",
            ActionKind::Removed => "removed",
        }
    }
}

/// Composes the stable event name for a kind/action pair.
#[must_use]
pub fn event_name(kind: OverlayKind, action: ActionKind) -> String {
    format!("{}:{}:{}", NAMESPACE, kind.as_str(), action.as_str())
}

/// Payload delivered to listeners. Read-only; listeners get a shared
/// reference and the snapshot carries no callbacks.
#[derive(Debug, Clone)]
pub struct ActionEvent {
    pub overlay: OverlayKind,
    pub kind: ActionKind,
    pub handle_id: String,
    pub options: OptionsSnapshot,
}

impl ActionEvent {
    /// Returns the namespaced name this event is dispatched under.
    #[must_use]
    pub fn name(&self) -> String {
        event_name(self.overlay, self.kind)
    }
}

type Listener = Box<dyn FnMut(&ActionEvent)>;

/// Document-level event bus.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<String, Vec<Listener>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for an exact event name.
    pub fn subscribe(&mut self, name: impl Into<String>, listener: impl FnMut(&ActionEvent) + 'static) {
        self.listeners
            .entry(name.into())
            .or_default()
            .push(Box::new(listener));
    }

    /// Dispatches `event` to every listener registered under its name.
    ///
    /// Synchronous, in registration order. A panicking listener is caught
    /// and reported; the remaining listeners still run, and later emissions
    /// in the same session are unaffected.
    pub fn emit(&mut self, event: &ActionEvent, diagnostics: Option<&DiagnosticsHandle>) {
        let name = event.name();
        let Some(listeners) = self.listeners.get_mut(&name) else {
            return;
        };
        for listener in listeners.iter_mut() {
            let outcome = catch_unwind(AssertUnwindSafe(|| listener(event)));
            if let Err(payload) = outcome {
                if let Some(handle) = diagnostics {
                    handle.log_listener_panic(&name, panic_message(payload.as_ref()));
                }
            }
        }
    }

    /// Returns the number of listeners registered under `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.get(name).map(Vec::len).unwrap_or(0)
    }
}
