// SPDX-License-Identifier: MPL-2.0
//! Severity, sizing and placement vocabulary shared by both overlay kinds,
//! plus the background-to-text contrast helper.

/// Severity level determines the status strip color, the default icon and
/// the OK button accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully (green).
    #[default]
    Success,
    /// Informational message (blue).
    Info,
    /// Warning that doesn't block operation (orange).
    Warning,
    /// Destructive or failing action (red).
    Danger,
}

impl Severity {
    /// Returns the lowercase token used in CSS class composition.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    /// Returns the background class for this severity (`bg-success`, ...).
    #[must_use]
    pub fn bg_class(&self) -> String {
        format!("bg-{}", self.as_str())
    }

    /// Returns the icon name used when the caller left `icon` unset.
    #[must_use]
    pub fn default_alert_icon(&self) -> String {
        format!("alert-{}", self.as_str())
    }
}

/// Alert dialog size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl DialogSize {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogSize::Sm => "sm",
            DialogSize::Md => "md",
            DialogSize::Lg => "lg",
        }
    }
}

/// Screen corner or edge a toast is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl ToastPosition {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastPosition::TopLeft => "top-left",
            ToastPosition::TopCenter => "top-center",
            ToastPosition::TopRight => "top-right",
            ToastPosition::BottomLeft => "bottom-left",
            ToastPosition::BottomCenter => "bottom-center",
            ToastPosition::BottomRight => "bottom-right",
        }
    }

    /// Parses a position token (as stored in the config file). Unknown
    /// tokens resolve to `None` so callers can fall back to the default.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "top-left" => Some(ToastPosition::TopLeft),
            "top-center" => Some(ToastPosition::TopCenter),
            "top-right" => Some(ToastPosition::TopRight),
            "bottom-left" => Some(ToastPosition::BottomLeft),
            "bottom-center" => Some(ToastPosition::BottomCenter),
            "bottom-right" => Some(ToastPosition::BottomRight),
            _ => None,
        }
    }
}

/// Returns the text color class that stays readable on the given background
/// class. Light backgrounds take dark text; everything else takes white.
#[must_use]
pub fn text_class(bg_class: &str) -> &'static str {
    match bg_class {
        "bg-warning" | "bg-info" | "bg-light" | "bg-white" => "text-dark",
        _ => "text-white",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_tokens_are_distinct() {
        let tokens = [
            Severity::Success.as_str(),
            Severity::Info.as_str(),
            Severity::Warning.as_str(),
            Severity::Danger.as_str(),
        ];
        for (i, a) in tokens.iter().enumerate() {
            for b in tokens.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn bg_class_composes_token() {
        assert_eq!(Severity::Danger.bg_class(), "bg-danger");
        assert_eq!(Severity::Success.bg_class(), "bg-success");
    }

    #[test]
    fn default_alert_icon_derives_from_severity() {
        assert_eq!(Severity::Warning.default_alert_icon(), "alert-warning");
    }

    #[test]
    fn dark_backgrounds_take_white_text() {
        assert_eq!(text_class("bg-danger"), "text-white");
        assert_eq!(text_class("bg-success"), "text-white");
    }

    #[test]
    fn light_backgrounds_take_dark_text() {
        assert_eq!(text_class("bg-warning"), "text-dark");
        assert_eq!(text_class("bg-info"), "text-dark");
    }

    #[test]
    fn position_parse_round_trips() {
        for pos in [
            ToastPosition::TopLeft,
            ToastPosition::TopCenter,
            ToastPosition::TopRight,
            ToastPosition::BottomLeft,
            ToastPosition::BottomCenter,
            ToastPosition::BottomRight,
        ] {
            assert_eq!(ToastPosition::parse(pos.as_str()), Some(pos));
        }
    }

    #[test]
    fn position_parse_rejects_unknown_token() {
        assert_eq!(ToastPosition::parse("middle"), None);
    }
}
