// SPDX-License-Identifier: MPL-2.0
//! Root-node provisioning.
//!
//! Obtains the root element for an overlay: an existing attached node when
//! the caller asked for reuse by id, otherwise a fresh wrapper with a
//! stable identity. Identity never changes mid-lifecycle.

use crate::dom::{Document, NodeId};

/// Result of provisioning a root node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    pub node: NodeId,
    pub id: String,
    pub reused: bool,
}

/// Generates a document-lifetime-unique dialog id.
fn next_dialog_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!("overlay-dialog-{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Returns the root node for an overlay call.
///
/// A non-empty `requested_id` matching an attached element yields that
/// element unchanged (`reused = true`): no construction, no identity
/// reassignment. Otherwise a fresh detached wrapper is built carrying the
/// requested id (or a generated one) and the backdrop attribute the widget
/// engine reads.
pub fn provision(document: &mut Document, requested_id: &str, static_backdrop: bool) -> Provisioned {
    if !requested_id.is_empty() {
        if let Some(existing) = document.get_element_by_id(requested_id) {
            return Provisioned {
                node: existing,
                id: requested_id.to_string(),
                reused: true,
            };
        }
    }

    let id = if requested_id.is_empty() {
        next_dialog_id()
    } else {
        requested_id.to_string()
    };
    let node = document.create_element("div");
    document.set_element_id(node, id.clone());
    document.set_attr(
        node,
        "data-backdrop",
        if static_backdrop { "static" } else { "dismiss" },
    );
    Provisioned {
        node,
        id,
        reused: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_gets_generated_id() {
        let mut doc = Document::new();
        let first = provision(&mut doc, "", false);
        let second = provision(&mut doc, "", false);

        assert!(!first.reused);
        assert!(first.id.starts_with("overlay-dialog-"));
        assert_ne!(first.id, second.id, "generated ids must be unique");
        assert_ne!(first.node, second.node);
    }

    #[test]
    fn requested_id_is_kept_on_fresh_node() {
        let mut doc = Document::new();
        let prov = provision(&mut doc, "confirm-delete", true);
        assert!(!prov.reused);
        assert_eq!(prov.id, "confirm-delete");
        assert_eq!(
            doc.node(prov.node).unwrap().element_id(),
            "confirm-delete"
        );
    }

    #[test]
    fn backdrop_flag_lands_on_constructed_node_only() {
        let mut doc = Document::new();
        let pinned = provision(&mut doc, "", true);
        let loose = provision(&mut doc, "", false);
        assert_eq!(doc.node(pinned.node).unwrap().attr("data-backdrop"), Some("static"));
        assert_eq!(doc.node(loose.node).unwrap().attr("data-backdrop"), Some("dismiss"));
    }

    #[test]
    fn attached_id_is_reused_without_reconstruction() {
        let mut doc = Document::new();
        let first = provision(&mut doc, "confirm-delete", false);
        doc.append_to_body(first.node);

        let second = provision(&mut doc, "confirm-delete", true);
        assert!(second.reused);
        assert_eq!(second.node, first.node);
        // Reuse must not touch the backdrop configuration either.
        assert_eq!(
            doc.node(second.node).unwrap().attr("data-backdrop"),
            Some("dismiss")
        );
    }

    #[test]
    fn unknown_requested_id_is_fresh_construction_not_an_error() {
        let mut doc = Document::new();
        let prov = provision(&mut doc, "never-seen", false);
        assert!(!prov.reused);
        assert_eq!(prov.id, "never-seen");
    }

    #[test]
    fn detached_node_with_matching_id_is_not_reused() {
        let mut doc = Document::new();
        // Provisioned but never appended: invisible to id lookup.
        let first = provision(&mut doc, "floating", false);
        let second = provision(&mut doc, "floating", false);
        assert!(!second.reused);
        assert_ne!(first.node, second.node);
    }
}
