// SPDX-License-Identifier: MPL-2.0
//! `overlay_kit` renders transient alert and toast overlays on top of a host
//! document.
//!
//! The crate owns the overlay lifecycle state machine and event-dispatch
//! contract: element creation and reuse, staged event emission
//! (`created → rendered → shown → hidden → removed`), option normalization
//! with defaults, auto-dismiss timing, and re-entrancy-safe button handling.
//! Show/hide animation and backdrop mechanics are delegated to a widget
//! engine behind the [`engine::WidgetEngine`] trait.

#![doc(html_root_url = "https://docs.rs/overlay_kit/0.2.0")]

pub mod config;
pub mod diagnostics;
pub mod dom;
pub mod engine;
pub mod error;
pub mod i18n;
pub mod icons;
pub mod overlay;
pub mod theme;

#[cfg(test)]
mod tests {
    // This is where common library tests can go
}
