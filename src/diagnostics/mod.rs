// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module: the host's default error-reporting channel.
//!
//! Failures inside caller-supplied callbacks never interrupt the overlay
//! lifecycle; they are captured and reported here instead. Events flow from
//! a cloneable [`DiagnosticsHandle`] through a bounded channel into a
//! memory-bounded circular buffer owned by [`DiagnosticsCollector`].

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{panic_message, DiagnosticEvent, DiagnosticEventKind, WarningType};
