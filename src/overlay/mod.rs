// SPDX-License-Identifier: MPL-2.0
//! The overlay system: alert and toast builders composed over a shared
//! lifecycle core.
//!
//! # Components
//!
//! - [`options`] - option records, default tables and pure resolution
//! - [`provision`] - root-node provisioning with reuse by id
//! - [`lifecycle`] - the monotonic stage machine
//! - [`events`] - namespaced event bus
//! - [`guard`] - per-control re-entrancy latch
//! - [`timer`] - cancellable auto-dismiss scheduling
//!
//! [`Overlays`] owns the document, the widget engine and the session
//! registry, and is the single entry point for building overlays, routing
//! control activations and pumping native signals.
//!
//! # Usage
//!
//! ```
//! use overlay_kit::engine::SimulatedEngine;
//! use overlay_kit::overlay::{AlertOptions, Overlays};
//! use overlay_kit::theme::Severity;
//!
//! let mut overlays = Overlays::new(SimulatedEngine::new());
//! let handle = overlays.alert(
//!     "Delete item?",
//!     AlertOptions::new().with_severity(Severity::Danger),
//! );
//! overlays.pump(); // deliver the engine's shown signal
//! assert!(!handle.id.is_empty());
//! ```

mod alert;
mod events;
mod guard;
mod lifecycle;
mod options;
mod provision;
mod timer;
mod toast;

pub use events::{event_name, ActionEvent, ActionKind, EventBus, OverlayKind, NAMESPACE};
pub use guard::ActionGuard;
pub use lifecycle::{stage_for_signal, LifecycleObserver, LifecycleStage};
pub use options::{
    AlertOptions, Callback, Defaults, OptionValue, OptionsSnapshot, ResolvedAlertOptions,
    ResolvedToastOptions, ToastOptions,
};
pub use provision::{provision, Provisioned};
pub use timer::{Scheduler, TimerToken};

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::diagnostics::{panic_message, DiagnosticsHandle, WarningType};
use crate::dom::{Document, NodeId};
use crate::engine::{NativeSignal, WidgetEngine};
use crate::i18n::I18n;

/// Synchronous result of a build call.
///
/// Returned before the show transition completes; the overlay may not yet
/// be visible when the caller gets this back.
#[derive(Debug, Clone)]
pub struct OverlayHandle {
    pub node: NodeId,
    pub id: String,
    pub content: String,
    pub options: OptionsSnapshot,
    pub reused: bool,
}

/// Which control inside an overlay a node is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlAction {
    Ok,
    Cancel,
    Close,
}

#[derive(Debug)]
pub(crate) struct ControlBinding {
    overlay_id: String,
    action: ControlAction,
    guard: ActionGuard,
}

/// Handlers retained for the lifetime of one session.
pub(crate) enum SessionHandlers {
    Alert { on_ok: Callback, on_cancel: Callback },
    Toast {
        on_shown: Callback,
        on_hide: Callback,
        on_hidden: Callback,
    },
}

impl SessionHandlers {
    fn ok(&self) -> Option<Callback> {
        match self {
            SessionHandlers::Alert { on_ok, .. } => Some(on_ok.clone()),
            SessionHandlers::Toast { .. } => None,
        }
    }

    fn cancel(&self) -> Option<Callback> {
        match self {
            SessionHandlers::Alert { on_cancel, .. } => Some(on_cancel.clone()),
            SessionHandlers::Toast { .. } => None,
        }
    }

    fn shown(&self) -> Option<Callback> {
        match self {
            SessionHandlers::Toast { on_shown, .. } => Some(on_shown.clone()),
            SessionHandlers::Alert { .. } => None,
        }
    }

    fn hide(&self) -> Option<Callback> {
        match self {
            SessionHandlers::Toast { on_hide, .. } => Some(on_hide.clone()),
            SessionHandlers::Alert { .. } => None,
        }
    }

    fn hidden(&self) -> Option<Callback> {
        match self {
            SessionHandlers::Toast { on_hidden, .. } => Some(on_hidden.clone()),
            SessionHandlers::Alert { .. } => None,
        }
    }
}

/// One live overlay: the unit of lifecycle tracking, keyed by overlay id.
pub(crate) struct Session {
    kind: OverlayKind,
    node: NodeId,
    observer: LifecycleObserver,
    snapshot: OptionsSnapshot,
    handlers: SessionHandlers,
    timer: Option<TimerToken>,
}

/// Runs a caller-supplied handler, routing a panic to diagnostics instead
/// of letting it interrupt the lifecycle.
pub(crate) fn run_handler(
    diagnostics: Option<&DiagnosticsHandle>,
    overlay_id: &str,
    action: &str,
    callback: &Callback,
) {
    let outcome = catch_unwind(AssertUnwindSafe(|| callback.invoke()));
    if let Err(payload) = outcome {
        if let Some(handle) = diagnostics {
            handle.log_handler_panic(overlay_id, action, panic_message(payload.as_ref()));
        }
    }
}

/// The overlay system.
///
/// Owns the host document's node tree, the widget engine seam and the
/// session registry. Independent overlay instances interleave freely; each
/// session's ordering guarantees are scoped to its own root node.
pub struct Overlays<E: WidgetEngine> {
    pub(crate) document: Document,
    pub(crate) engine: E,
    pub(crate) bus: EventBus,
    pub(crate) scheduler: Scheduler,
    pub(crate) i18n: I18n,
    pub(crate) defaults: Defaults,
    pub(crate) sessions: HashMap<String, Session>,
    pub(crate) by_node: HashMap<NodeId, String>,
    pub(crate) controls: HashMap<NodeId, ControlBinding>,
    pub(crate) diagnostics: Option<DiagnosticsHandle>,
}

impl<E: WidgetEngine> Overlays<E> {
    /// Creates an overlay system with built-in defaults and bundled locales.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self::with_settings(engine, I18n::default(), Defaults::default())
    }

    /// Creates an overlay system with explicit i18n and default tables.
    #[must_use]
    pub fn with_settings(engine: E, i18n: I18n, defaults: Defaults) -> Self {
        Self {
            document: Document::new(),
            engine,
            bus: EventBus::new(),
            scheduler: Scheduler::new(),
            i18n,
            defaults,
            sessions: HashMap::new(),
            by_node: HashMap::new(),
            controls: HashMap::new(),
            diagnostics: None,
        }
    }

    /// Sets the diagnostics handle panicking callbacks are reported to.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Read access to the host document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Read access to the widget engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the widget engine (backdrop clicks, test drivers).
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Registers a bus listener for an exact event name
    /// (e.g. `overlay:alert:ok`).
    pub fn subscribe(&mut self, name: &str, listener: impl FnMut(&ActionEvent) + 'static) {
        self.bus.subscribe(name, listener);
    }

    /// Returns the current lifecycle stage of a live session.
    ///
    /// `None` once the session reached `Removed` and was dropped from the
    /// registry, or for ids that never existed.
    #[must_use]
    pub fn stage_of(&self, overlay_id: &str) -> Option<LifecycleStage> {
        self.sessions.get(overlay_id).and_then(|s| s.observer.stage())
    }

    /// Returns the number of live sessions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Routes a user activation of an interactive control.
    ///
    /// Activations arriving while the control's handler runs, or within its
    /// cooldown window, are discarded by the guard.
    pub fn activate(&mut self, control: NodeId) {
        let now = Instant::now();
        let (overlay_id, action) = match self.controls.get_mut(&control) {
            Some(binding) => {
                if !binding.guard.try_begin(now) {
                    return;
                }
                (binding.overlay_id.clone(), binding.action)
            }
            None => return,
        };

        let session_info = self.sessions.get(&overlay_id).map(|s| {
            (
                s.kind,
                s.node,
                s.snapshot.clone(),
                s.observer.has_reached(LifecycleStage::Hidden),
            )
        });
        let Some((kind, node, snapshot, already_hidden)) = session_info else {
            self.complete_guard(control, now);
            return;
        };
        if already_hidden {
            self.complete_guard(control, now);
            return;
        }

        match action {
            ControlAction::Ok => {
                self.emit(kind, ActionKind::Ok, &overlay_id, &snapshot);
                if let Some(cb) = self.sessions.get(&overlay_id).and_then(|s| s.handlers.ok()) {
                    run_handler(self.diagnostics.as_ref(), &overlay_id, "ok", &cb);
                }
            }
            ControlAction::Cancel => {
                self.emit(kind, ActionKind::Cancel, &overlay_id, &snapshot);
                if let Some(cb) = self
                    .sessions
                    .get(&overlay_id)
                    .and_then(|s| s.handlers.cancel())
                {
                    run_handler(self.diagnostics.as_ref(), &overlay_id, "cancel", &cb);
                }
            }
            ControlAction::Close => {}
        }

        self.complete_guard(control, now);

        // Manual dismissal: the pending auto-dismiss must not fire later.
        if let Some(token) = self
            .sessions
            .get_mut(&overlay_id)
            .and_then(|s| s.timer.take())
        {
            self.scheduler.cancel(token);
        }
        self.engine.hide(node);
    }

    /// Hides a live overlay, cancelling its pending auto-dismiss.
    ///
    /// The stage transition arrives through the engine's hidden signal on
    /// the next pump; calling this on an already-hidden overlay is a no-op.
    pub fn dismiss(&mut self, overlay_id: &str) {
        let Some((node, token)) = self
            .sessions
            .get_mut(overlay_id)
            .map(|s| (s.node, s.timer.take()))
        else {
            return;
        };
        if let Some(token) = token {
            self.scheduler.cancel(token);
        }
        self.engine.hide(node);
    }

    /// Drains native widget signals and applies the resulting stage
    /// transitions.
    pub fn pump(&mut self) {
        loop {
            let signals = self.engine.drain_signals();
            if signals.is_empty() {
                break;
            }
            for (node, signal) in signals {
                match self.by_node.get(&node).cloned() {
                    Some(overlay_id) => self.apply_signal(&overlay_id, signal),
                    None => {
                        if let Some(handle) = &self.diagnostics {
                            handle.log_warning(
                                WarningType::StaleSignal,
                                format!("native {signal:?} signal for unowned node"),
                            );
                        }
                    }
                }
            }
        }
    }

    /// Fires due auto-dismiss timers, then pumps.
    ///
    /// A due timer only requests a hide when its overlay has not already
    /// reached `Hidden`; combined with the engine's idempotent hide this
    /// keeps a late fire from double-hiding.
    pub fn tick(&mut self, now: Instant) {
        for overlay_id in self.scheduler.due(now) {
            let node = match self.sessions.get_mut(&overlay_id) {
                Some(session) => {
                    session.timer = None;
                    if session.observer.has_reached(LifecycleStage::Hidden) {
                        None
                    } else {
                        Some(session.node)
                    }
                }
                None => None,
            };
            if let Some(node) = node {
                self.engine.hide(node);
            }
        }
        self.pump();
    }

    pub(crate) fn emit(
        &mut self,
        overlay: OverlayKind,
        kind: ActionKind,
        handle_id: &str,
        snapshot: &OptionsSnapshot,
    ) {
        let event = ActionEvent {
            overlay,
            kind,
            handle_id: handle_id.to_string(),
            options: snapshot.clone(),
        };
        self.bus.emit(&event, self.diagnostics.as_ref());
    }

    pub(crate) fn register_session(&mut self, overlay_id: String, session: Session) {
        self.by_node.insert(session.node, overlay_id.clone());
        self.sessions.insert(overlay_id, session);
    }

    pub(crate) fn bind_control(&mut self, control: NodeId, overlay_id: &str, action: ControlAction) {
        self.controls.insert(
            control,
            ControlBinding {
                overlay_id: overlay_id.to_string(),
                action,
                guard: ActionGuard::new(self.defaults.guard_cooldown),
            },
        );
    }

    pub(crate) fn advance_stage(&mut self, overlay_id: &str, stage: LifecycleStage) -> bool {
        self.sessions
            .get_mut(overlay_id)
            .map(|s| s.observer.advance_to(stage))
            .unwrap_or(false)
    }

    fn complete_guard(&mut self, control: NodeId, now: Instant) {
        if let Some(binding) = self.controls.get_mut(&control) {
            binding.guard.complete(now);
        }
    }

    fn apply_signal(&mut self, overlay_id: &str, signal: NativeSignal) {
        let Some((kind, node, snapshot)) = self
            .sessions
            .get(overlay_id)
            .map(|s| (s.kind, s.node, s.snapshot.clone()))
        else {
            return;
        };

        match stage_for_signal(signal) {
            // Hide completes no stage; it only matters for the toast's
            // pre-hide emission.
            None => {
                let already_hidden = self
                    .sessions
                    .get(overlay_id)
                    .map(|s| s.observer.has_reached(LifecycleStage::Hidden))
                    .unwrap_or(true);
                if kind == OverlayKind::Toast && !already_hidden {
                    self.document.add_class(node, "overlay-msg-hide");
                    self.emit(kind, ActionKind::Hide, overlay_id, &snapshot);
                    if let Some(cb) =
                        self.sessions.get(overlay_id).and_then(|s| s.handlers.hide())
                    {
                        run_handler(self.diagnostics.as_ref(), overlay_id, "hide", &cb);
                    }
                }
            }
            Some(stage) => {
                if !self.advance_stage(overlay_id, stage) {
                    return;
                }
                match stage {
                    LifecycleStage::Shown => {
                        if kind == OverlayKind::Toast {
                            self.emit(kind, ActionKind::Shown, overlay_id, &snapshot);
                            if let Some(cb) = self
                                .sessions
                                .get(overlay_id)
                                .and_then(|s| s.handlers.shown())
                            {
                                run_handler(self.diagnostics.as_ref(), overlay_id, "shown", &cb);
                            }
                        }
                    }
                    LifecycleStage::Hidden => {
                        self.emit(kind, ActionKind::Hidden, overlay_id, &snapshot);
                        if kind == OverlayKind::Toast {
                            if let Some(cb) = self
                                .sessions
                                .get(overlay_id)
                                .and_then(|s| s.handlers.hidden())
                            {
                                run_handler(self.diagnostics.as_ref(), overlay_id, "hidden", &cb);
                            }
                        }
                        self.teardown(overlay_id);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Unlinks the root node and finalizes the session.
    ///
    /// This is the only place besides the provisioner that mutates overlay
    /// node attachment.
    fn teardown(&mut self, overlay_id: &str) {
        let Some(mut session) = self.sessions.remove(overlay_id) else {
            return;
        };
        if let Some(token) = session.timer.take() {
            self.scheduler.cancel(token);
        }
        self.document.remove(session.node);
        self.by_node.remove(&session.node);
        self.controls.retain(|_, b| b.overlay_id != overlay_id);
        self.engine.release(session.node);

        if session.observer.advance_to(LifecycleStage::Removed)
            && session.kind == OverlayKind::Alert
        {
            let snapshot = session.snapshot.clone();
            self.emit(OverlayKind::Alert, ActionKind::Removed, overlay_id, &snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BufferCapacity, DiagnosticsCollector};
    use crate::engine::SimulatedEngine;

    #[test]
    fn dismiss_of_unknown_id_is_a_no_op() {
        let mut overlays = Overlays::new(SimulatedEngine::new());
        overlays.dismiss("never-existed");
        assert_eq!(overlays.active_count(), 0);
    }

    #[test]
    fn activate_of_unbound_node_is_a_no_op() {
        let mut overlays = Overlays::new(SimulatedEngine::new());
        let stray = overlays.document.create_element("button");
        overlays.activate(stray);
    }

    #[test]
    fn signal_for_unowned_node_is_logged_not_fatal() {
        let (mut collector, handle) = DiagnosticsCollector::new(BufferCapacity::default());
        let mut overlays = Overlays::new(SimulatedEngine::new());
        overlays.set_diagnostics(handle);

        let stray = overlays.document.create_element("div");
        overlays.engine.prepare(stray, false);
        overlays.engine.show(stray);
        overlays.pump();

        collector.drain_pending();
        assert_eq!(collector.len(), 1);
    }
}
