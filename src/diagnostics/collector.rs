// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! The collector receives events from the overlay system and stores them in
//! a circular buffer. Producers hold a cheap cloneable handle; sends are
//! non-blocking and drop the event when the channel is full.

use crossbeam_channel::{bounded, Receiver, Sender};

use super::buffer::{BufferCapacity, CircularBuffer};
use super::events::{DiagnosticEvent, DiagnosticEventKind, WarningType};

/// Capacity of the handle-to-collector channel.
const CHANNEL_CAPACITY: usize = 256;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Events are sent via a bounded channel so logging never
/// blocks the UI thread.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs a panicking action handler.
    pub fn log_handler_panic(
        &self,
        overlay_id: impl Into<String>,
        action: impl Into<String>,
        message: impl Into<String>,
    ) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::HandlerPanic {
            overlay_id: overlay_id.into(),
            action: action.into(),
            message: message.into(),
        });
        // Non-blocking send - drop if channel is full
        let _ = self.event_tx.try_send(event);
    }

    /// Logs a panicking bus listener.
    pub fn log_listener_panic(&self, event_name: impl Into<String>, message: impl Into<String>) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::ListenerPanic {
            event_name: event_name.into(),
            message: message.into(),
        });
        let _ = self.event_tx.try_send(event);
    }

    /// Logs a lifecycle warning.
    pub fn log_warning(&self, warning_type: WarningType, message: impl Into<String>) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            warning_type,
            message: message.into(),
        });
        let _ = self.event_tx.try_send(event);
    }
}

/// Collector side: drains the channel into the bounded buffer.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    event_rx: Receiver<DiagnosticEvent>,
    buffer: CircularBuffer<DiagnosticEvent>,
}

impl DiagnosticsCollector {
    /// Creates a collector/handle pair.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> (Self, DiagnosticsHandle) {
        let (event_tx, event_rx) = bounded(CHANNEL_CAPACITY);
        (
            Self {
                event_rx,
                buffer: CircularBuffer::new(capacity),
            },
            DiagnosticsHandle { event_tx },
        )
    }

    /// Moves all pending events from the channel into the buffer.
    pub fn drain_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Returns the buffered events in chronological order.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Returns the number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true when no events are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
