// SPDX-License-Identifier: MPL-2.0
//! Deterministic in-crate widget engine.
//!
//! `SimulatedEngine` completes every transition instantly but still delivers
//! its signals through the drain queue, so the caller observes the same
//! two-phase behavior a real animated engine produces: request now, signal
//! on the next pump.

use std::collections::HashMap;

use super::{NativeSignal, WidgetEngine};
use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, Default)]
struct InstanceState {
    visible: bool,
    static_backdrop: bool,
}

/// Widget engine used by the test suite and the demo binary.
#[derive(Debug, Default)]
pub struct SimulatedEngine {
    instances: HashMap<NodeId, InstanceState>,
    queue: Vec<(NodeId, NativeSignal)>,
}

impl SimulatedEngine {
    /// Creates an engine with no registered instances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a user click on the backdrop behind `node`.
    ///
    /// Hides the overlay unless it was prepared with a static backdrop.
    pub fn click_backdrop(&mut self, node: NodeId) {
        let dismissible = self
            .instances
            .get(&node)
            .map(|s| s.visible && !s.static_backdrop)
            .unwrap_or(false);
        if dismissible {
            self.hide(node);
        }
    }

    /// Returns the number of signals waiting to be drained.
    #[must_use]
    pub fn pending_signals(&self) -> usize {
        self.queue.len()
    }
}

impl WidgetEngine for SimulatedEngine {
    fn prepare(&mut self, node: NodeId, static_backdrop: bool) {
        let state = self.instances.entry(node).or_default();
        state.static_backdrop = static_backdrop;
    }

    fn show(&mut self, node: NodeId) {
        let state = self.instances.entry(node).or_default();
        if !state.visible {
            state.visible = true;
            self.queue.push((node, NativeSignal::Shown));
        }
    }

    fn hide(&mut self, node: NodeId) {
        let state = self.instances.entry(node).or_default();
        if state.visible {
            state.visible = false;
            self.queue.push((node, NativeSignal::Hide));
            self.queue.push((node, NativeSignal::Hidden));
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.instances.get(&node).map(|s| s.visible).unwrap_or(false)
    }

    fn drain_signals(&mut self) -> Vec<(NodeId, NativeSignal)> {
        std::mem::take(&mut self.queue)
    }

    fn release(&mut self, node: NodeId) {
        self.instances.remove(&node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn node() -> NodeId {
        Document::new().create_element("div")
    }

    #[test]
    fn show_emits_shown_once() {
        let mut engine = SimulatedEngine::new();
        let n = node();
        engine.prepare(n, false);
        engine.show(n);
        engine.show(n);

        assert_eq!(engine.drain_signals(), vec![(n, NativeSignal::Shown)]);
    }

    #[test]
    fn hide_is_idempotent() {
        let mut engine = SimulatedEngine::new();
        let n = node();
        engine.prepare(n, false);
        engine.show(n);
        engine.hide(n);
        engine.hide(n);

        let signals = engine.drain_signals();
        let hidden_count = signals
            .iter()
            .filter(|(_, s)| *s == NativeSignal::Hidden)
            .count();
        assert_eq!(hidden_count, 1);
    }

    #[test]
    fn hide_before_show_is_a_no_op() {
        let mut engine = SimulatedEngine::new();
        let n = node();
        engine.prepare(n, false);
        engine.hide(n);
        assert!(engine.drain_signals().is_empty());
    }

    #[test]
    fn hide_emits_hide_then_hidden() {
        let mut engine = SimulatedEngine::new();
        let n = node();
        engine.prepare(n, false);
        engine.show(n);
        engine.drain_signals();
        engine.hide(n);

        assert_eq!(
            engine.drain_signals(),
            vec![(n, NativeSignal::Hide), (n, NativeSignal::Hidden)]
        );
    }

    #[test]
    fn backdrop_click_dismisses_unless_static() {
        let mut engine = SimulatedEngine::new();
        let dismissible = node();
        let pinned = node();
        engine.prepare(dismissible, false);
        engine.prepare(pinned, true);
        engine.show(dismissible);
        engine.show(pinned);
        engine.drain_signals();

        engine.click_backdrop(dismissible);
        engine.click_backdrop(pinned);

        assert!(!engine.is_visible(dismissible));
        assert!(engine.is_visible(pinned));
    }

    #[test]
    fn release_forgets_instance_state() {
        let mut engine = SimulatedEngine::new();
        let n = node();
        engine.prepare(n, false);
        engine.show(n);
        engine.release(n);
        assert!(!engine.is_visible(n));
    }
}
