use crate::mdast;
use crate::model::{Mark, Node};
use crate::registry::Registry;

use super::SerializerStack;

/// Drives one document tree → Markdown conversion.
///
/// For each tree node, the serialize rule of every mark on it runs first (in
/// mark order); a rule returning `true` consumed the node and suppresses its
/// node rule. All marks are closed again after the node, so a mark's wrapper
/// spans exactly the nodes that carry it contiguously.
pub struct SerializerState<'r> {
    registry: &'r Registry,
    stack: SerializerStack,
}

impl<'r> SerializerState<'r> {
    pub fn new(registry: &'r Registry) -> SerializerState<'r> {
        SerializerState {
            registry,
            stack: SerializerStack::new(),
        }
    }

    /// Run the full pipeline: rule dispatch over the tree, tree hooks, then
    /// Markdown printing.
    pub fn serialize(mut self, doc: &Node) -> String {
        let registry = self.registry;
        self.next_one(doc);
        let mut tree = self.stack.finish();
        for (spec, _) in registry.node_specs() {
            tree = spec.before_serialize(tree);
        }
        for (spec, _) in registry.mark_specs() {
            tree = spec.before_serialize(tree);
        }
        registry.processor().stringify(&tree)
    }

    /// Dispatch each child in order. Serialize rules call this to descend.
    pub fn next(&mut self, children: &[Node]) {
        for child in children {
            self.next_one(child);
        }
    }

    fn next_one(&mut self, node: &Node) {
        let registry = self.registry;

        let mut consumed = false;
        for mark in &node.marks {
            match registry
                .mark_specs()
                .iter()
                .find(|(spec, _)| spec.match_serialize(mark))
            {
                Some((spec, _)) => {
                    if spec.serialize_apply(self, mark, node) {
                        consumed = true;
                    }
                }
                None => {
                    tracing::warn!(ty = %mark.type_name, "no serialize rule matched mark; skipped")
                }
            }
        }

        if !consumed {
            match registry
                .node_specs()
                .iter()
                .find(|(spec, _)| spec.match_serialize(node))
            {
                Some((spec, _)) => spec.serialize_apply(self, node),
                None => {
                    tracing::warn!(ty = %node.type_name, "no serialize rule matched; node skipped")
                }
            }
        }

        for mark in node.marks.iter().rev() {
            self.stack.close_mark(mark);
        }
    }

    // Stack pass-throughs for serialize rules.

    pub fn open_node(&mut self, node: mdast::Node) {
        self.stack.open_node(node);
    }

    pub fn close_node(&mut self) {
        self.stack.close_node();
    }

    pub fn add_node(&mut self, node: mdast::Node) {
        self.stack.add_node(node);
    }

    pub fn open_mark(&mut self, mark: &Mark, wrapper: mdast::Node) {
        self.stack.open_mark(mark, wrapper);
    }
}
