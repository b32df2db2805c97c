// SPDX-License-Identifier: MPL-2.0
//! Node identity and element data.

use std::collections::BTreeMap;

/// Unique identifier for a node within a document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new unique node ID.
    pub(crate) fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// A single element in the document tree.
///
/// Fields mirror what the overlay templates need: a tag, an optional
/// `id` attribute, a class list, free-form attributes, text content and
/// child links. Mutation goes through [`super::Document`] so parent/child
/// links stay consistent.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) element_id: String,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: BTreeMap<String, String>,
    pub(crate) text: String,
    pub(crate) z_index: Option<i64>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            element_id: String::new(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            z_index: None,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Returns the element's tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the element's `id` attribute (empty when unset).
    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Returns the class list in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns the attribute value for `name`, if set.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns the element's text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the explicit z-index, if one was assigned.
    #[must_use]
    pub fn z_index(&self) -> Option<i64> {
        self.z_index
    }

    /// Returns the child node ids in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_are_unique() {
        let a = NodeId::next();
        let b = NodeId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn new_node_is_bare() {
        let node = Node::new("div");
        assert_eq!(node.tag(), "div");
        assert!(node.element_id().is_empty());
        assert!(node.classes().is_empty());
        assert!(node.children().is_empty());
        assert!(node.z_index().is_none());
    }

    #[test]
    fn has_class_matches_exactly() {
        let mut node = Node::new("div");
        node.classes.push("toast-header".to_string());
        assert!(node.has_class("toast-header"));
        assert!(!node.has_class("toast"));
    }
}
