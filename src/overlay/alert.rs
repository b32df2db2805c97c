// SPDX-License-Identifier: MPL-2.0
//! The blocking alert dialog.
//!
//! Markup: a centered dialog with a severity status strip, an icon slot,
//! an optional title, the caller's content and a footer holding the OK
//! button (plus a Cancel button when the caller supplied a cancel
//! handler). Both buttons are guarded, emit their action event, run their
//! handler and then ask the engine to hide.
//!
//! Reuse: an explicit id matching a live alert returns the existing root
//! node. Markup is not rebuilt, so option changes do not alter appearance —
//! callers wanting a different look must use a fresh id. The new call still
//! gets a fresh observation session and its handlers replace the previous
//! call's bindings.

use std::time::{Duration, Instant};

use super::provision::provision;
use super::{
    ActionKind, AlertOptions, ControlAction, LifecycleObserver, LifecycleStage, OverlayHandle,
    OverlayKind, Overlays, ResolvedAlertOptions, Session, SessionHandlers,
};
use crate::dom::{Document, NodeId};
use crate::engine::WidgetEngine;
use crate::i18n::I18n;
use crate::icons;

struct AlertControls {
    ok: NodeId,
    cancel: Option<NodeId>,
}

fn build_alert_markup(
    document: &mut Document,
    i18n: &I18n,
    root: NodeId,
    content: &str,
    resolved: &ResolvedAlertOptions,
) -> AlertControls {
    let dialog = document.create_element("div");
    document.add_class(dialog, "modal-dialog");
    document.add_class(dialog, format!("modal-{}", resolved.size.as_str()));
    document.add_class(dialog, "modal-dialog-centered");

    let content_el = document.create_element("div");
    document.add_class(content_el, "modal-content");

    let status = document.create_element("div");
    document.add_class(status, "modal-status");
    document.add_class(status, resolved.severity.bg_class());

    let body = document.create_element("div");
    document.add_class(body, "modal-body");

    let icon_slot = document.create_element("div");
    document.add_class(icon_slot, "modal-icon");
    let icon = icons::make_icon(
        document,
        &resolved.icon,
        &resolved.icon_class,
        &resolved.icon_style,
    );
    document.append_child(icon_slot, icon);

    let title = document.create_element("h3");
    document.add_class(title, "modal-title");
    document.set_text(title, resolved.title.clone());

    let message = document.create_element("div");
    document.add_class(message, "text-muted");
    document.set_text(message, content);

    let footer = document.create_element("div");
    document.add_class(footer, "modal-footer");

    let ok = document.create_element("button");
    document.add_class(ok, "btn");
    document.add_class(ok, "btn-ok");
    document.add_class(ok, format!("btn-{}", resolved.severity.as_str()));
    let ok_label = if resolved.btn_ok_text.is_empty() {
        i18n.tr("ok")
    } else {
        resolved.btn_ok_text.clone()
    };
    document.set_text(ok, ok_label);
    document.append_child(footer, ok);

    let cancel = if resolved.has_cancel {
        let cancel = document.create_element("button");
        document.add_class(cancel, "btn");
        document.add_class(cancel, "btn-cancel");
        document.set_text(cancel, i18n.tr("cancel"));
        document.append_child(footer, cancel);
        Some(cancel)
    } else {
        None
    };

    document.append_child(body, icon_slot);
    document.append_child(body, title);
    document.append_child(body, message);
    document.append_child(content_el, status);
    document.append_child(content_el, body);
    document.append_child(content_el, footer);
    document.append_child(dialog, content_el);
    document.append_child(root, dialog);

    AlertControls { ok, cancel }
}

impl<E: WidgetEngine> Overlays<E> {
    /// Builds and shows a blocking alert dialog.
    ///
    /// Returns synchronously; the dialog may not be fully visible yet. The
    /// `shown` transition, like every later stage, arrives through
    /// [`Overlays::pump`].
    pub fn alert(&mut self, content: &str, options: AlertOptions) -> OverlayHandle {
        let mut resolved = options.resolve();
        let prov = provision(&mut self.document, &resolved.id, resolved.static_backdrop);
        resolved.id = prov.id.clone();

        if prov.reused {
            return self.rebind_alert(content, prov.node, resolved);
        }

        let node = prov.node;
        let id = resolved.id.clone();
        self.document.add_class(node, "overlay-modal");
        self.document.add_class(node, "overlay-modal-alert");

        let snapshot = resolved.snapshot();
        self.register_session(
            id.clone(),
            Session {
                kind: OverlayKind::Alert,
                node,
                observer: LifecycleObserver::new(),
                snapshot: snapshot.clone(),
                handlers: SessionHandlers::Alert {
                    on_ok: resolved.on_ok.clone(),
                    on_cancel: resolved.on_cancel.clone(),
                },
                timer: None,
            },
        );
        if self.advance_stage(&id, LifecycleStage::Created) {
            self.emit(OverlayKind::Alert, ActionKind::Created, &id, &snapshot);
        }

        let controls = build_alert_markup(&mut self.document, &self.i18n, node, content, &resolved);
        self.document.append_to_body(node);
        if self.advance_stage(&id, LifecycleStage::Rendered) {
            self.emit(OverlayKind::Alert, ActionKind::Rendered, &id, &snapshot);
        }

        self.bind_control(controls.ok, &id, ControlAction::Ok);
        if let Some(cancel) = controls.cancel {
            self.bind_control(cancel, &id, ControlAction::Cancel);
        }

        self.engine.prepare(node, resolved.static_backdrop);
        self.engine.show(node);

        self.schedule_auto_dismiss(&id, resolved.timeout_ms);

        OverlayHandle {
            node,
            id,
            content: content.to_string(),
            options: snapshot,
            reused: false,
        }
    }

    /// Reuse path: layers a fresh observation session over an existing
    /// attached node without rebuilding its markup.
    fn rebind_alert(
        &mut self,
        content: &str,
        node: NodeId,
        resolved: ResolvedAlertOptions,
    ) -> OverlayHandle {
        let id = resolved.id.clone();
        let snapshot = resolved.snapshot();

        // Retire the previous session for this id; the node stays put.
        if let Some(mut old) = self.sessions.remove(&id) {
            if let Some(token) = old.timer.take() {
                self.scheduler.cancel(token);
            }
            self.by_node.remove(&old.node);
            self.controls.retain(|_, b| b.overlay_id != id);
        }

        self.register_session(
            id.clone(),
            Session {
                kind: OverlayKind::Alert,
                node,
                observer: LifecycleObserver::new(),
                snapshot: snapshot.clone(),
                handlers: SessionHandlers::Alert {
                    on_ok: resolved.on_ok.clone(),
                    on_cancel: resolved.on_cancel.clone(),
                },
                timer: None,
            },
        );

        // Created/Rendered are driven by this session; the markup is
        // already populated on the attached node.
        if self.advance_stage(&id, LifecycleStage::Created) {
            self.emit(OverlayKind::Alert, ActionKind::Created, &id, &snapshot);
        }
        if self.advance_stage(&id, LifecycleStage::Rendered) {
            self.emit(OverlayKind::Alert, ActionKind::Rendered, &id, &snapshot);
        }

        // Rebind the existing buttons to this call's handlers (replace,
        // never stack).
        if let Some(ok) = self.document.descendant_with_class(node, "btn-ok") {
            self.bind_control(ok, &id, ControlAction::Ok);
        }
        if let Some(cancel) = self.document.descendant_with_class(node, "btn-cancel") {
            self.bind_control(cancel, &id, ControlAction::Cancel);
        }

        self.engine.show(node);
        self.schedule_auto_dismiss(&id, resolved.timeout_ms);

        OverlayHandle {
            node,
            id,
            content: content.to_string(),
            options: snapshot,
            reused: true,
        }
    }

    pub(crate) fn schedule_auto_dismiss(&mut self, overlay_id: &str, timeout_ms: u64) {
        if timeout_ms == 0 {
            return;
        }
        let token = self.scheduler.schedule(
            Duration::from_millis(timeout_ms),
            overlay_id.to_string(),
            Instant::now(),
        );
        if let Some(session) = self.sessions.get_mut(overlay_id) {
            session.timer = token;
        }
    }
}
