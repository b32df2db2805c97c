// SPDX-License-Identifier: MPL-2.0
//! Option records, default tables and resolution.
//!
//! Resolution is a pure merge: for every recognized key the resolved record
//! holds the caller value when one was supplied and the declared default
//! otherwise, so downstream code never checks for absence. Unrecognized
//! keys ride along untouched in the `extra` map for forward compatibility.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{
    Config, DEFAULT_GUARD_COOLDOWN_MS, DEFAULT_TOAST_TIMEOUT_MS,
};
use crate::theme::{DialogSize, Severity, ToastPosition};

/// A caller-supplied handler, guaranteed callable.
///
/// Unset handler options resolve to a no-op, so invocation sites never need
/// a presence check.
#[derive(Clone)]
pub struct Callback {
    inner: Rc<RefCell<Box<dyn FnMut()>>>,
}

impl Callback {
    /// Wraps a closure.
    pub fn new(f: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(f))),
        }
    }

    /// The do-nothing handler.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Runs the handler.
    pub fn invoke(&self) {
        (self.inner.borrow_mut())();
    }
}

impl Default for Callback {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// Value of an unrecognized option key, preserved through resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Default-table values that the host configuration may adjust.
///
/// Caller options always win over these; these win over the built-ins.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub toast_timeout_ms: u64,
    pub toast_position: ToastPosition,
    pub guard_cooldown: Duration,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
            toast_position: ToastPosition::default(),
            guard_cooldown: Duration::from_millis(DEFAULT_GUARD_COOLDOWN_MS),
        }
    }
}

impl Defaults {
    /// Builds the default tables from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let built_in = Self::default();
        Self {
            toast_timeout_ms: config.toast_timeout_ms.unwrap_or(built_in.toast_timeout_ms),
            toast_position: config
                .toast_position
                .as_deref()
                .and_then(ToastPosition::parse)
                .unwrap_or(built_in.toast_position),
            guard_cooldown: config
                .guard_cooldown_ms
                .map(Duration::from_millis)
                .unwrap_or(built_in.guard_cooldown),
        }
    }
}

/// Caller-facing alert options. Every field is optional; unset fields fall
/// back to the alert default table during resolution.
#[derive(Debug, Clone, Default)]
pub struct AlertOptions {
    pub title: Option<String>,
    pub severity: Option<Severity>,
    pub size: Option<DialogSize>,
    pub id: Option<String>,
    pub static_backdrop: Option<bool>,
    pub btn_ok_text: Option<String>,
    pub icon: Option<String>,
    pub icon_class: Option<String>,
    pub icon_style: Option<String>,
    pub on_ok: Option<Callback>,
    pub on_cancel: Option<Callback>,
    pub timeout_ms: Option<u64>,
    pub extra: BTreeMap<String, OptionValue>,
}

impl AlertOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: DialogSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Requests reuse: a later call with the same id returns the existing
    /// root node instead of building a new one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_static_backdrop(mut self, is_static: bool) -> Self {
        self.static_backdrop = Some(is_static);
        self
    }

    #[must_use]
    pub fn with_ok_text(mut self, text: impl Into<String>) -> Self {
        self.btn_ok_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_icon_class(mut self, class: impl Into<String>) -> Self {
        self.icon_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_icon_style(mut self, style: impl Into<String>) -> Self {
        self.icon_style = Some(style.into());
        self
    }

    #[must_use]
    pub fn on_ok(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_ok = Some(Callback::new(f));
        self
    }

    /// Supplying a cancel handler also makes the cancel button render.
    #[must_use]
    pub fn on_cancel(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_cancel = Some(Callback::new(f));
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Attaches an unrecognized key, passed through resolution unmodified.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: OptionValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Merges against the alert default table. Pure; `self` is not mutated.
    #[must_use]
    pub fn resolve(&self) -> ResolvedAlertOptions {
        let severity = self.severity.unwrap_or_default();
        ResolvedAlertOptions {
            title: self.title.clone().unwrap_or_default(),
            severity,
            size: self.size.unwrap_or_default(),
            id: self.id.clone().unwrap_or_default(),
            static_backdrop: self.static_backdrop.unwrap_or(false),
            btn_ok_text: self.btn_ok_text.clone().unwrap_or_default(),
            icon: self
                .icon
                .clone()
                .unwrap_or_else(|| severity.default_alert_icon()),
            icon_class: self.icon_class.clone().unwrap_or_default(),
            icon_style: self.icon_style.clone().unwrap_or_default(),
            on_ok: self.on_ok.clone().unwrap_or_default(),
            on_cancel: self.on_cancel.clone().unwrap_or_default(),
            has_cancel: self.on_cancel.is_some(),
            timeout_ms: self.timeout_ms.unwrap_or(0),
            extra: self.extra.clone(),
        }
    }
}

/// Fully resolved alert options: every recognized key present.
#[derive(Debug, Clone)]
pub struct ResolvedAlertOptions {
    pub title: String,
    pub severity: Severity,
    pub size: DialogSize,
    pub id: String,
    pub static_backdrop: bool,
    /// Empty means "use the localized default label at render time".
    pub btn_ok_text: String,
    pub icon: String,
    pub icon_class: String,
    pub icon_style: String,
    pub on_ok: Callback,
    pub on_cancel: Callback,
    /// Whether the caller supplied a cancel handler (controls rendering).
    pub has_cancel: bool,
    pub timeout_ms: u64,
    pub extra: BTreeMap<String, OptionValue>,
}

impl ResolvedAlertOptions {
    /// Data half of the record, for event payloads.
    #[must_use]
    pub fn snapshot(&self) -> OptionsSnapshot {
        OptionsSnapshot {
            title: self.title.clone(),
            subtitle: String::new(),
            severity: self.severity,
            size: Some(self.size),
            id: self.id.clone(),
            static_backdrop: self.static_backdrop,
            btn_ok_text: self.btn_ok_text.clone(),
            icon: self.icon.clone(),
            icon_class: self.icon_class.clone(),
            icon_style: self.icon_style.clone(),
            timeout_ms: self.timeout_ms,
            position: None,
            close_btn: false,
            extra: self.extra.clone(),
        }
    }
}

/// Caller-facing toast options.
#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub position: Option<ToastPosition>,
    pub severity: Option<Severity>,
    pub close_btn: Option<bool>,
    pub icon: Option<String>,
    pub icon_class: Option<String>,
    pub icon_style: Option<String>,
    pub timeout_ms: Option<u64>,
    pub on_show: Option<Callback>,
    pub on_shown: Option<Callback>,
    pub on_hide: Option<Callback>,
    pub on_hidden: Option<Callback>,
    pub extra: BTreeMap<String, OptionValue>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A non-empty title makes the header render.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: ToastPosition) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    #[must_use]
    pub fn with_close_btn(mut self, close_btn: bool) -> Self {
        self.close_btn = Some(close_btn);
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_icon_class(mut self, class: impl Into<String>) -> Self {
        self.icon_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_icon_style(mut self, style: impl Into<String>) -> Self {
        self.icon_style = Some(style.into());
        self
    }

    /// Zero disables the auto-dismiss timer.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    #[must_use]
    pub fn on_show(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_show = Some(Callback::new(f));
        self
    }

    #[must_use]
    pub fn on_shown(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_shown = Some(Callback::new(f));
        self
    }

    #[must_use]
    pub fn on_hide(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_hide = Some(Callback::new(f));
        self
    }

    #[must_use]
    pub fn on_hidden(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_hidden = Some(Callback::new(f));
        self
    }

    /// Attaches an unrecognized key, passed through resolution unmodified.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: OptionValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Merges against the toast default table. Pure; `self` is not mutated.
    #[must_use]
    pub fn resolve(&self, defaults: &Defaults) -> ResolvedToastOptions {
        ResolvedToastOptions {
            title: self.title.clone().unwrap_or_default(),
            subtitle: self.subtitle.clone().unwrap_or_default(),
            position: self.position.unwrap_or(defaults.toast_position),
            severity: self.severity.unwrap_or_default(),
            close_btn: self.close_btn.unwrap_or(false),
            icon: self.icon.clone().unwrap_or_else(|| "point".to_string()),
            icon_class: self.icon_class.clone().unwrap_or_default(),
            icon_style: self.icon_style.clone().unwrap_or_default(),
            timeout_ms: self.timeout_ms.unwrap_or(defaults.toast_timeout_ms),
            on_show: self.on_show.clone().unwrap_or_default(),
            on_shown: self.on_shown.clone().unwrap_or_default(),
            on_hide: self.on_hide.clone().unwrap_or_default(),
            on_hidden: self.on_hidden.clone().unwrap_or_default(),
            extra: self.extra.clone(),
        }
    }
}

/// Fully resolved toast options: every recognized key present.
#[derive(Debug, Clone)]
pub struct ResolvedToastOptions {
    pub title: String,
    pub subtitle: String,
    pub position: ToastPosition,
    pub severity: Severity,
    pub close_btn: bool,
    pub icon: String,
    pub icon_class: String,
    pub icon_style: String,
    pub timeout_ms: u64,
    pub on_show: Callback,
    pub on_shown: Callback,
    pub on_hide: Callback,
    pub on_hidden: Callback,
    pub extra: BTreeMap<String, OptionValue>,
}

impl ResolvedToastOptions {
    /// Data half of the record, for event payloads.
    #[must_use]
    pub fn snapshot(&self, id: &str) -> OptionsSnapshot {
        OptionsSnapshot {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            severity: self.severity,
            size: None,
            id: id.to_string(),
            static_backdrop: false,
            btn_ok_text: String::new(),
            icon: self.icon.clone(),
            icon_class: self.icon_class.clone(),
            icon_style: self.icon_style.clone(),
            timeout_ms: self.timeout_ms,
            position: Some(self.position),
            close_btn: self.close_btn,
            extra: self.extra.clone(),
        }
    }
}

/// Read-only option data carried on every emitted event.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsSnapshot {
    pub title: String,
    pub subtitle: String,
    pub severity: Severity,
    pub size: Option<DialogSize>,
    pub id: String,
    pub static_backdrop: bool,
    pub btn_ok_text: String,
    pub icon: String,
    pub icon_class: String,
    pub icon_style: String,
    pub timeout_ms: u64,
    pub position: Option<ToastPosition>,
    pub close_btn: bool,
    pub extra: BTreeMap<String, OptionValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn alert_defaults_fill_every_key() {
        let resolved = AlertOptions::new().resolve();
        assert_eq!(resolved.title, "");
        assert_eq!(resolved.severity, Severity::Success);
        assert_eq!(resolved.size, DialogSize::Md);
        assert_eq!(resolved.id, "");
        assert!(!resolved.static_backdrop);
        assert_eq!(resolved.btn_ok_text, "");
        assert_eq!(resolved.icon, "alert-success");
        assert_eq!(resolved.timeout_ms, 0);
        assert!(!resolved.has_cancel);
    }

    #[test]
    fn caller_values_win_over_defaults() {
        let resolved = AlertOptions::new()
            .with_severity(Severity::Danger)
            .with_ok_text("Delete")
            .with_timeout(2500)
            .resolve();
        assert_eq!(resolved.severity, Severity::Danger);
        assert_eq!(resolved.btn_ok_text, "Delete");
        assert_eq!(resolved.timeout_ms, 2500);
    }

    #[test]
    fn alert_icon_derives_from_severity_when_unset() {
        let resolved = AlertOptions::new()
            .with_severity(Severity::Warning)
            .resolve();
        assert_eq!(resolved.icon, "alert-warning");

        let explicit = AlertOptions::new()
            .with_severity(Severity::Warning)
            .with_icon("custom")
            .resolve();
        assert_eq!(explicit.icon, "custom");
    }

    #[test]
    fn unknown_keys_pass_through_unmodified() {
        let resolved = AlertOptions::new()
            .with_extra("analytics-tag", OptionValue::Str("checkout".into()))
            .with_extra("attempt", OptionValue::Int(3))
            .resolve();
        assert_eq!(
            resolved.extra.get("analytics-tag"),
            Some(&OptionValue::Str("checkout".into()))
        );
        assert_eq!(resolved.extra.get("attempt"), Some(&OptionValue::Int(3)));
    }

    #[test]
    fn resolve_is_repeatable_and_does_not_mutate_input() {
        let options = AlertOptions::new().with_title("Hi");
        let first = options.resolve();
        let second = options.resolve();
        assert_eq!(first.snapshot(), second.snapshot());
        assert_eq!(options.title.as_deref(), Some("Hi"));
    }

    #[test]
    fn unset_callbacks_resolve_to_callable_noops() {
        let resolved = AlertOptions::new().resolve();
        resolved.on_ok.invoke();
        resolved.on_cancel.invoke();

        let toast = ToastOptions::new().resolve(&Defaults::default());
        toast.on_show.invoke();
        toast.on_hidden.invoke();
    }

    #[test]
    fn supplied_callback_is_invoked() {
        let hits = Rc::new(Cell::new(0));
        let hits_in = Rc::clone(&hits);
        let resolved = AlertOptions::new()
            .on_ok(move || hits_in.set(hits_in.get() + 1))
            .resolve();
        resolved.on_ok.invoke();
        resolved.on_ok.invoke();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn toast_default_table() {
        let resolved = ToastOptions::new().resolve(&Defaults::default());
        assert_eq!(resolved.title, "");
        assert_eq!(resolved.subtitle, "");
        assert_eq!(resolved.position, ToastPosition::BottomRight);
        assert_eq!(resolved.severity, Severity::Success);
        assert!(!resolved.close_btn);
        assert_eq!(resolved.icon, "point");
        assert_eq!(resolved.timeout_ms, DEFAULT_TOAST_TIMEOUT_MS);
    }

    #[test]
    fn config_adjusts_default_table_but_caller_wins() {
        let config = Config {
            language: None,
            toast_timeout_ms: Some(7000),
            toast_position: Some("top-left".to_string()),
            guard_cooldown_ms: Some(50),
        };
        let defaults = Defaults::from_config(&config);
        assert_eq!(defaults.guard_cooldown, Duration::from_millis(50));

        let from_table = ToastOptions::new().resolve(&defaults);
        assert_eq!(from_table.timeout_ms, 7000);
        assert_eq!(from_table.position, ToastPosition::TopLeft);

        let from_caller = ToastOptions::new()
            .with_timeout(100)
            .with_position(ToastPosition::BottomCenter)
            .resolve(&defaults);
        assert_eq!(from_caller.timeout_ms, 100);
        assert_eq!(from_caller.position, ToastPosition::BottomCenter);
    }

    #[test]
    fn malformed_position_token_falls_back_to_default() {
        let config = Config {
            toast_position: Some("nowhere".to_string()),
            ..Config::default()
        };
        let defaults = Defaults::from_config(&config);
        assert_eq!(defaults.toast_position, ToastPosition::BottomRight);
    }
}
