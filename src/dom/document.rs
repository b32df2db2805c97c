// SPDX-License-Identifier: MPL-2.0
//! The document arena: node storage, attachment and queries.

use std::collections::HashMap;

use super::node::{Node, NodeId};

/// An owned document tree.
///
/// Nodes are created detached, wired together with [`Document::append_child`]
/// and become part of the live tree once their root is appended to the body.
/// Removal detaches a root and drops its whole subtree from the arena, so a
/// removed node's id can never be resolved again.
#[derive(Debug, Default)]
pub struct Document {
    nodes: HashMap<NodeId, Node>,
    body: Vec<NodeId>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new detached element with the given tag.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let id = NodeId::next();
        self.nodes.insert(id, Node::new(tag));
        id
    }

    /// Returns the node data for `id`, if the node still exists.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Sets the element's `id` attribute.
    pub fn set_element_id(&mut self, id: NodeId, element_id: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.element_id = element_id.into();
        }
    }

    /// Adds a class to the element's class list (no-op on duplicates).
    pub fn add_class(&mut self, id: NodeId, class: impl Into<String>) {
        let class = class.into();
        if let Some(node) = self.nodes.get_mut(&id) {
            if !node.has_class(&class) {
                node.classes.push(class);
            }
        }
    }

    /// Sets an attribute on the element.
    pub fn set_attr(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attrs.insert(name.into(), value.into());
        }
    }

    /// Replaces the element's text content.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.text = text.into();
        }
    }

    /// Assigns an explicit z-index to the element.
    pub fn set_z_index(&mut self, id: NodeId, z: i64) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.z_index = Some(z);
        }
    }

    /// Appends `child` to `parent`'s child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    /// Inserts `child` as `parent`'s first child.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.insert(0, child);
        }
    }

    /// Attaches a root node to the document body.
    pub fn append_to_body(&mut self, id: NodeId) {
        if self.nodes.contains_key(&id) && !self.body.contains(&id) {
            self.body.push(id);
        }
    }

    /// Returns whether the node is part of the live tree (reachable from
    /// the body).
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if self.body.contains(&current) {
                return true;
            }
            match self.nodes.get(&current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Detaches a body root and drops its subtree from the arena.
    pub fn remove(&mut self, id: NodeId) {
        self.body.retain(|&root| root != id);
        self.drop_subtree(id);
    }

    fn drop_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.drop_subtree(child);
            }
        }
    }

    /// Finds an attached element by its `id` attribute.
    ///
    /// Detached nodes are invisible here, matching host-document lookup
    /// semantics: an element only resolves by id once it is in the live tree.
    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        if element_id.is_empty() {
            return None;
        }
        for &root in &self.body {
            if let Some(found) = self.find_in_subtree(root, &|n| n.element_id == element_id) {
                return Some(found);
            }
        }
        None
    }

    /// Finds the first descendant of `root` (depth-first, including `root`)
    /// carrying the given class.
    #[must_use]
    pub fn descendant_with_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.find_in_subtree(root, &|n| n.has_class(class))
    }

    /// Counts attached nodes carrying the given class across the whole tree.
    #[must_use]
    pub fn count_with_class(&self, class: &str) -> usize {
        let mut count = 0;
        for &root in &self.body {
            self.walk(root, &mut |n| {
                if n.has_class(class) {
                    count += 1;
                }
            });
        }
        count
    }

    /// Returns the highest explicit z-index among attached nodes, or 0.
    #[must_use]
    pub fn max_z_index(&self) -> i64 {
        let mut max = 0;
        for &root in &self.body {
            self.walk(root, &mut |n| {
                if let Some(z) = n.z_index {
                    max = max.max(z);
                }
            });
        }
        max
    }

    /// Returns the number of body roots.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    fn find_in_subtree(&self, root: NodeId, pred: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        let node = self.nodes.get(&root)?;
        if pred(node) {
            return Some(root);
        }
        for &child in &node.children {
            if let Some(found) = self.find_in_subtree(child, pred) {
                return Some(found);
            }
        }
        None
    }

    fn walk(&self, root: NodeId, visit: &mut dyn FnMut(&Node)) {
        if let Some(node) = self.nodes.get(&root) {
            visit(node);
            for &child in &node.children {
                self.walk(child, visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_element_starts_detached() {
        let mut doc = Document::new();
        let id = doc.create_element("div");
        assert!(!doc.is_attached(id));
        assert!(doc.node(id).is_some());
    }

    #[test]
    fn append_to_body_attaches_subtree() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(root, child);
        doc.append_to_body(root);

        assert!(doc.is_attached(root));
        assert!(doc.is_attached(child));
    }

    #[test]
    fn get_element_by_id_only_sees_attached_nodes() {
        let mut doc = Document::new();
        let detached = doc.create_element("div");
        doc.set_element_id(detached, "ghost");
        assert_eq!(doc.get_element_by_id("ghost"), None);

        doc.append_to_body(detached);
        assert_eq!(doc.get_element_by_id("ghost"), Some(detached));
    }

    #[test]
    fn get_element_by_id_ignores_empty_query() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        doc.append_to_body(root);
        assert_eq!(doc.get_element_by_id(""), None);
    }

    #[test]
    fn remove_drops_subtree_from_arena() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(root, child);
        doc.append_to_body(root);

        doc.remove(root);
        assert!(doc.node(root).is_none());
        assert!(doc.node(child).is_none());
        assert_eq!(doc.body_len(), 0);
    }

    #[test]
    fn descendant_with_class_searches_depth_first() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let footer = doc.create_element("div");
        let btn = doc.create_element("button");
        doc.add_class(footer, "modal-footer");
        doc.add_class(btn, "btn-ok");
        doc.append_child(root, footer);
        doc.append_child(footer, btn);

        assert_eq!(doc.descendant_with_class(root, "btn-ok"), Some(btn));
        assert_eq!(doc.descendant_with_class(root, "btn-cancel"), None);
    }

    #[test]
    fn max_z_index_scans_attached_nodes() {
        let mut doc = Document::new();
        assert_eq!(doc.max_z_index(), 0);

        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.set_z_index(a, 10);
        doc.set_z_index(b, 40);
        doc.append_to_body(a);
        doc.append_to_body(b);
        assert_eq!(doc.max_z_index(), 40);
    }

    #[test]
    fn add_class_is_idempotent() {
        let mut doc = Document::new();
        let id = doc.create_element("div");
        doc.add_class(id, "toast");
        doc.add_class(id, "toast");
        assert_eq!(doc.node(id).unwrap().classes().len(), 1);
    }
}
