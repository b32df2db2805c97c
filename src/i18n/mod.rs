// SPDX-License-Identifier: MPL-2.0
//! Internationalization support built on Fluent.
//!
//! Overlay markup is caller-supplied and passes through untranslated; the
//! bundles here only provide the default control labels ("ok", "cancel",
//! "close") used when an option leaves a label unset.

pub mod fluent;

pub use fluent::I18n;
