// SPDX-License-Identifier: MPL-2.0
//! Icon node factory.
//!
//! Icons are plain elements named by appearance (`alert-danger`, `point`,
//! `cross`), not by the action context they end up in. The factory only
//! constructs; it never attaches anything to the live tree.

use crate::dom::{Document, NodeId};

/// Builds a detached icon element.
///
/// The node carries `overlay-icon` plus an `icon-<name>` class; `class` and
/// `style` are forwarded verbatim when non-empty.
pub fn make_icon(document: &mut Document, name: &str, class: &str, style: &str) -> NodeId {
    let icon = document.create_element("i");
    document.add_class(icon, "overlay-icon");
    if !name.is_empty() {
        document.add_class(icon, format!("icon-{name}"));
    }
    if !class.is_empty() {
        document.add_class(icon, class);
    }
    if !style.is_empty() {
        document.set_attr(icon, "style", style);
    }
    icon
}
