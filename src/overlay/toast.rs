// SPDX-License-Identifier: MPL-2.0
//! The non-blocking toast notification.
//!
//! Toasts always get a fresh identity — there is no reuse path. The
//! optional header (severity background, contrast text, icon, title,
//! subtitle, close button) only renders when the title is non-empty. Each
//! toast stacks above everything already attached via an explicit z-index.

use super::provision::provision;
use super::{
    run_handler, ActionKind, ControlAction, LifecycleObserver, LifecycleStage, OverlayHandle,
    OverlayKind, Overlays, ResolvedToastOptions, Session, SessionHandlers, ToastOptions,
};
use crate::dom::{Document, NodeId};
use crate::engine::WidgetEngine;
use crate::i18n::I18n;
use crate::icons;
use crate::theme;

fn build_toast_markup(
    document: &mut Document,
    i18n: &I18n,
    root: NodeId,
    message: &str,
    resolved: &ResolvedToastOptions,
) -> Option<NodeId> {
    let mut close_control = None;

    if !resolved.title.is_empty() {
        let header = document.create_element("div");
        let bg = resolved.severity.bg_class();
        let text = theme::text_class(&bg);
        document.add_class(header, "toast-header");
        document.add_class(header, bg);
        document.add_class(header, text);

        if !resolved.icon.is_empty() {
            let icon = icons::make_icon(
                document,
                &resolved.icon,
                &resolved.icon_class,
                &resolved.icon_style,
            );
            document.add_class(icon, text);
            document.append_child(header, icon);
        }

        let title = document.create_element("strong");
        document.set_text(title, resolved.title.clone());
        document.append_child(header, title);

        let subtitle = document.create_element("small");
        document.add_class(subtitle, "text-truncate");
        document.set_text(subtitle, resolved.subtitle.clone());
        document.append_child(header, subtitle);

        if resolved.close_btn {
            let close = document.create_element("button");
            document.add_class(close, "btn-close");
            if text == "text-white" {
                document.add_class(close, "btn-close-white");
            }
            document.set_attr(close, "aria-label", i18n.tr("close"));
            document.append_child(header, close);
            close_control = Some(close);
        }

        document.append_child(root, header);
    }

    let body = document.create_element("div");
    document.add_class(body, "toast-body");
    document.add_class(body, "bg-white");
    document.set_text(body, message);
    document.append_child(root, body);

    close_control
}

impl<E: WidgetEngine> Overlays<E> {
    /// Builds and shows a toast notification.
    ///
    /// `on_show` runs synchronously during this call; `on_shown`,
    /// `on_hide` and `on_hidden` fire from [`Overlays::pump`] /
    /// [`Overlays::tick`] as the engine's transitions complete. A zero
    /// `timeout` disables auto-dismiss entirely.
    pub fn toast(&mut self, message: &str, options: ToastOptions) -> OverlayHandle {
        let resolved = options.resolve(&self.defaults);
        let prov = provision(&mut self.document, "", false);
        let node = prov.node;
        let id = prov.id;
        let snapshot = resolved.snapshot(&id);

        self.document.add_class(node, "toast");
        self.document.add_class(node, "overlay-msg");
        self.document
            .add_class(node, format!("overlay-msg-{}", resolved.position.as_str()));
        self.document.set_attr(node, "role", "alert");
        let z = self.document.max_z_index() + 1;
        self.document.set_z_index(node, z);

        self.register_session(
            id.clone(),
            Session {
                kind: OverlayKind::Toast,
                node,
                observer: LifecycleObserver::new(),
                snapshot: snapshot.clone(),
                handlers: SessionHandlers::Toast {
                    on_shown: resolved.on_shown.clone(),
                    on_hide: resolved.on_hide.clone(),
                    on_hidden: resolved.on_hidden.clone(),
                },
                timer: None,
            },
        );
        if self.advance_stage(&id, LifecycleStage::Created) {
            self.emit(OverlayKind::Toast, ActionKind::Created, &id, &snapshot);
        }

        let close_control =
            build_toast_markup(&mut self.document, &self.i18n, node, message, &resolved);
        self.document.append_to_body(node);
        if self.advance_stage(&id, LifecycleStage::Rendered) {
            self.emit(OverlayKind::Toast, ActionKind::Rendered, &id, &snapshot);
        }

        if let Some(close) = close_control {
            self.bind_control(close, &id, ControlAction::Close);
        }

        self.emit(OverlayKind::Toast, ActionKind::Show, &id, &snapshot);
        run_handler(self.diagnostics.as_ref(), &id, "show", &resolved.on_show);

        self.engine.prepare(node, false);
        self.engine.show(node);

        self.schedule_auto_dismiss(&id, resolved.timeout_ms);

        OverlayHandle {
            node,
            id,
            content: message.to_string(),
            options: snapshot,
            reused: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimulatedEngine;
    use crate::theme::{Severity, ToastPosition};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    fn system() -> Overlays<SimulatedEngine> {
        // Pin the locale so label assertions don't depend on the OS.
        let i18n = crate::i18n::I18n::new(Some("en-US".to_string()), &crate::config::Config::default());
        Overlays::with_settings(SimulatedEngine::new(), i18n, crate::overlay::Defaults::default())
    }

    #[test]
    fn empty_title_suppresses_header() {
        let mut overlays = system();
        let handle = overlays.toast("Saved", ToastOptions::new());
        assert!(overlays
            .document()
            .descendant_with_class(handle.node, "toast-header")
            .is_none());
        let body = overlays
            .document()
            .descendant_with_class(handle.node, "toast-body")
            .expect("body");
        assert_eq!(overlays.document().node(body).unwrap().text(), "Saved");
    }

    #[test]
    fn titled_toast_renders_contrasting_header() {
        let mut overlays = system();
        let handle = overlays.toast(
            "Saved",
            ToastOptions::new()
                .with_title("Done")
                .with_severity(Severity::Success),
        );
        let header = overlays
            .document()
            .descendant_with_class(handle.node, "toast-header")
            .expect("header");
        let header_node = overlays.document().node(header).unwrap();
        assert!(header_node.has_class("bg-success"));
        assert!(header_node.has_class("text-white"));
    }

    #[test]
    fn close_button_needs_title_and_flag() {
        let mut overlays = system();
        let no_title = overlays.toast("m", ToastOptions::new().with_close_btn(true));
        assert!(overlays
            .document()
            .descendant_with_class(no_title.node, "btn-close")
            .is_none());

        let with_both = overlays.toast(
            "m",
            ToastOptions::new().with_title("T").with_close_btn(true),
        );
        let close = overlays
            .document()
            .descendant_with_class(with_both.node, "btn-close")
            .expect("close button");
        assert_eq!(
            overlays.document().node(close).unwrap().attr("aria-label"),
            Some("Close")
        );
    }

    #[test]
    fn close_button_gets_white_variant_on_dark_header() {
        let mut overlays = system();
        let dark = overlays.toast(
            "m",
            ToastOptions::new()
                .with_title("T")
                .with_severity(Severity::Danger)
                .with_close_btn(true),
        );
        assert!(overlays
            .document()
            .descendant_with_class(dark.node, "btn-close-white")
            .is_some());

        let light = overlays.toast(
            "m",
            ToastOptions::new()
                .with_title("T")
                .with_severity(Severity::Warning)
                .with_close_btn(true),
        );
        let close = overlays
            .document()
            .descendant_with_class(light.node, "btn-close")
            .unwrap();
        assert!(!overlays.document().node(close).unwrap().has_class("btn-close-white"));
    }

    #[test]
    fn position_class_follows_option() {
        let mut overlays = system();
        let handle = overlays.toast(
            "m",
            ToastOptions::new().with_position(ToastPosition::TopCenter),
        );
        assert!(overlays
            .document()
            .node(handle.node)
            .unwrap()
            .has_class("overlay-msg-top-center"));
    }

    #[test]
    fn each_toast_stacks_above_the_previous() {
        let mut overlays = system();
        let first = overlays.toast("one", ToastOptions::new());
        let second = overlays.toast("two", ToastOptions::new());
        let doc = overlays.document();
        let z_first = doc.node(first.node).unwrap().z_index().unwrap();
        let z_second = doc.node(second.node).unwrap().z_index().unwrap();
        assert!(z_second > z_first);
    }

    #[test]
    fn toasts_never_reuse_identity() {
        let mut overlays = system();
        let a = overlays.toast("one", ToastOptions::new());
        let b = overlays.toast("two", ToastOptions::new());
        assert_ne!(a.id, b.id);
        assert_ne!(a.node, b.node);
        assert_eq!(overlays.document().body_len(), 2);
    }

    #[test]
    fn default_timeout_schedules_auto_dismiss() {
        let mut overlays = system();
        overlays.toast("m", ToastOptions::new());
        assert_eq!(overlays.scheduler.pending(), 1);
    }

    #[test]
    fn zero_timeout_disables_auto_dismiss() {
        let mut overlays = system();
        let handle = overlays.toast("Saved", ToastOptions::new().with_timeout(0));
        assert_eq!(overlays.scheduler.pending(), 0);

        overlays.pump();
        overlays.tick(Instant::now() + Duration::from_secs(600));
        assert!(overlays.engine().is_visible(handle.node));
        assert_eq!(overlays.stage_of(&handle.id), Some(LifecycleStage::Shown));

        // Still dismissible externally.
        overlays.dismiss(&handle.id);
        overlays.pump();
        assert_eq!(overlays.active_count(), 0);
    }

    #[test]
    fn callbacks_fire_in_lifecycle_order() {
        let mut overlays = system();
        let order = Rc::new(RefCell::new(Vec::new()));

        let push = |tag: &'static str| {
            let order = Rc::clone(&order);
            move || order.borrow_mut().push(tag)
        };
        let handle = overlays.toast(
            "m",
            ToastOptions::new()
                .with_timeout(10)
                .on_show(push("show"))
                .on_shown(push("shown"))
                .on_hide(push("hide"))
                .on_hidden(push("hidden")),
        );
        assert_eq!(*order.borrow(), vec!["show"], "on_show runs at build time");

        overlays.pump();
        overlays.tick(Instant::now() + Duration::from_millis(20));

        assert_eq!(*order.borrow(), vec!["show", "shown", "hide", "hidden"]);
        assert!(!overlays.document().is_attached(handle.node));
    }

    #[test]
    fn auto_dismissed_toast_hides_exactly_once() {
        let mut overlays = system();
        let hidden_hits = Rc::new(Cell::new(0));
        let hits_in = Rc::clone(&hidden_hits);
        overlays.toast(
            "m",
            ToastOptions::new()
                .with_timeout(10)
                .on_hidden(move || hits_in.set(hits_in.get() + 1)),
        );

        overlays.pump();
        let fire = Instant::now() + Duration::from_millis(20);
        overlays.tick(fire);
        overlays.tick(fire + Duration::from_secs(1));
        assert_eq!(hidden_hits.get(), 1);
    }

    #[test]
    fn manual_dismiss_before_timer_wins() {
        let mut overlays = system();
        let hidden_hits = Rc::new(Cell::new(0));
        let hits_in = Rc::clone(&hidden_hits);
        let handle = overlays.toast(
            "m",
            ToastOptions::new()
                .with_timeout(5000)
                .on_hidden(move || hits_in.set(hits_in.get() + 1)),
        );

        overlays.pump();
        overlays.dismiss(&handle.id);
        overlays.pump();
        assert_eq!(hidden_hits.get(), 1);
        assert_eq!(overlays.scheduler.pending(), 0, "timer must be cancelled");

        // Well past the original deadline: nothing fires again.
        overlays.tick(Instant::now() + Duration::from_secs(10));
        assert_eq!(hidden_hits.get(), 1);
    }

    #[test]
    fn close_button_dismisses_toast() {
        let mut overlays = system();
        let handle = overlays.toast(
            "m",
            ToastOptions::new()
                .with_title("T")
                .with_close_btn(true)
                .with_timeout(0),
        );
        let close = overlays
            .document()
            .descendant_with_class(handle.node, "btn-close")
            .unwrap();

        overlays.pump();
        overlays.activate(close);
        overlays.pump();
        assert_eq!(overlays.active_count(), 0);
        assert!(!overlays.document().is_attached(handle.node));
    }

    #[test]
    fn hide_event_precedes_hidden() {
        let mut overlays = system();
        let order = Rc::new(RefCell::new(Vec::new()));
        let handle = overlays.toast("m", ToastOptions::new().with_timeout(0));

        for name in ["overlay:toast:hide", "overlay:toast:hidden"] {
            let order = Rc::clone(&order);
            overlays.subscribe(name, move |event| {
                order.borrow_mut().push(event.name());
            });
        }

        overlays.pump();
        overlays.dismiss(&handle.id);
        overlays.pump();
        assert_eq!(
            *order.borrow(),
            vec![
                "overlay:toast:hide".to_string(),
                "overlay:toast:hidden".to_string()
            ]
        );
        assert!(!overlays.document().is_attached(handle.node));
    }
}
