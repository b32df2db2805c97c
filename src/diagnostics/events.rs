// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.

use std::any::Any;

use chrono::{DateTime, Utc};

/// Category of a lifecycle warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningType {
    /// A native signal arrived for a node no session owns.
    StaleSignal,
    /// Anything else.
    Other,
}

/// What happened, without the timestamp.
#[derive(Debug, Clone)]
pub enum DiagnosticEventKind {
    /// A caller-supplied action handler (`on_ok`, `on_hidden`, ...) panicked.
    HandlerPanic {
        overlay_id: String,
        action: String,
        message: String,
    },
    /// A bus listener panicked during dispatch.
    ListenerPanic {
        event_name: String,
        message: String,
    },
    /// A non-fatal lifecycle anomaly.
    Warning {
        warning_type: WarningType,
        message: String,
    },
}

/// A timestamped diagnostic event.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Stamps the event with the current wall-clock time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// Extracts a readable message from an unwind payload.
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
