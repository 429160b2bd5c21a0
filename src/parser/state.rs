use crate::error::ConvertError;
use crate::mdast;
use crate::model::{Attrs, MarkType, Node, NodeType};
use crate::registry::Registry;

use super::ParserStack;

/// Drives one Markdown → document tree conversion.
///
/// Dispatch is a linear scan over the registered types in registration
/// order: node rules first, then mark rules, first match wins. A Markdown
/// node nothing matches is logged and skipped; unknown input never fails a
/// conversion.
pub struct ParserState<'r> {
    registry: &'r Registry,
    stack: ParserStack,
}

impl<'r> ParserState<'r> {
    pub fn new(registry: &'r Registry) -> ParserState<'r> {
        ParserState {
            registry,
            stack: ParserStack::new(),
        }
    }

    /// Run the full pipeline: source hooks, Markdown parse, registered AST
    /// transforms, tree hooks, then rule dispatch over the final AST.
    pub fn parse(mut self, text: &str) -> Result<Node, ConvertError> {
        let registry = self.registry;

        let mut text = text.to_string();
        for (spec, _) in registry.node_specs() {
            text = spec.before_parse(text);
        }
        for (spec, _) in registry.mark_specs() {
            text = spec.before_parse(text);
        }

        let tree = registry.processor().parse(&text)?;
        let mut tree = registry.processor().run(tree);
        for (spec, _) in registry.node_specs() {
            tree = spec.after_parse(tree);
        }
        for (spec, _) in registry.mark_specs() {
            tree = spec.after_parse(tree);
        }

        self.next_one(&tree);
        Ok(self.stack.finish())
    }

    /// Dispatch each child in order. Parse rules call this to descend.
    pub fn next(&mut self, children: &[mdast::Node]) {
        for child in children {
            self.next_one(child);
        }
    }

    fn next_one(&mut self, node: &mdast::Node) {
        let registry = self.registry;
        for (spec, ty) in registry.node_specs() {
            if spec.match_parse(node) {
                spec.parse_apply(self, node, ty);
                return;
            }
        }
        for (spec, ty) in registry.mark_specs() {
            if spec.match_parse(node) {
                spec.parse_apply(self, node, ty);
                return;
            }
        }
        tracing::warn!(kind = node.kind(), "no parse rule matched; node skipped");
    }

    // Stack pass-throughs for parse rules.

    pub fn open_node(&mut self, ty: &NodeType, attrs: Attrs) {
        self.stack.open_node(ty, attrs);
    }

    pub fn close_node(&mut self) {
        self.stack.close_node();
    }

    pub fn add_node(&mut self, ty: &NodeType, attrs: Attrs, children: Vec<Node>) {
        self.stack.add_node(ty, attrs, children);
    }

    pub fn add_text(&mut self, value: &str) {
        self.stack.add_text(value);
    }

    pub fn open_mark(&mut self, ty: &MarkType, attrs: Attrs) {
        self.stack.open_mark(ty, attrs);
    }

    pub fn close_mark(&mut self, ty: &MarkType) {
        self.stack.close_mark(ty);
    }
}
