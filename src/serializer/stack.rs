// Markdown AST assembly stack for the serialize direction.

use crate::mdast::Node;
use crate::model::Mark;

/// Builds a Markdown AST from open/add/close calls issued by serialize
/// rules.
///
/// Marks wrap an AST container (Strong, Emphasis, …) around their text:
/// `open_mark` pushes the wrapper, `close_mark` pops it. Both are no-ops
/// when the mark is already / not in the active set, so rules stay naive
/// about overlap.
#[derive(Default)]
pub struct SerializerStack {
    frames: Vec<Node>,
    marks: Vec<Mark>,
    result: Option<Node>,
}

impl SerializerStack {
    pub fn new() -> SerializerStack {
        SerializerStack::default()
    }

    /// Open a container node; children added until `close_node` land in it.
    /// The node is pushed as given, with its (usually empty) children.
    pub fn open_node(&mut self, node: Node) {
        self.frames.push(node);
    }

    /// Close the innermost open node and attach it to its parent.
    pub fn close_node(&mut self) {
        let Some(node) = self.frames.pop() else {
            tracing::warn!("close_node with no open node");
            return;
        };
        self.add_node(node);
    }

    /// Add a complete node to the innermost open container.
    pub fn add_node(&mut self, node: Node) {
        match self.frames.last_mut() {
            Some(frame) => match frame.children_mut() {
                Some(children) => children.push(node),
                None => tracing::warn!(
                    kind = frame.kind(),
                    "open node cannot hold children; dropped"
                ),
            },
            None => self.result = Some(node),
        }
    }

    /// Open a mark wrapper unless a mark of this type is already active.
    pub fn open_mark(&mut self, mark: &Mark, wrapper: Node) {
        if mark.is_in_set(&self.marks) {
            return;
        }
        self.marks = mark.add_to_set(&self.marks);
        self.open_node(wrapper);
    }

    /// Close the wrapper a previous `open_mark` pushed; no-op when the mark
    /// was never opened.
    pub fn close_mark(&mut self, mark: &Mark) {
        if !mark.is_in_set(&self.marks) {
            return;
        }
        self.marks = mark.remove_from_set(&self.marks);
        self.close_node();
    }

    /// Close everything still open and return the finished AST.
    ///
    /// Panics when no node was ever produced; that is a programming error in
    /// the registered serialize rules, not an input condition.
    pub fn finish(mut self) -> Node {
        while !self.frames.is_empty() {
            self.close_node();
        }
        match self.result {
            Some(node) => node,
            None => panic!("serializer stack finished without producing a node"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdast;

    #[test]
    fn test_mark_wraps_text() {
        let mut stack = SerializerStack::new();
        stack.open_node(Node::Paragraph(mdast::Paragraph { children: vec![] }));
        let bold = Mark::new("bold");
        stack.open_mark(&bold, Node::Strong(mdast::Strong { children: vec![] }));
        stack.add_node(Node::text("loud"));
        stack.close_mark(&bold);
        stack.add_node(Node::text(" quiet"));
        stack.close_node();

        let Node::Paragraph(para) = stack.finish() else {
            panic!("expected paragraph");
        };
        assert!(matches!(&para.children[0], Node::Strong(_)));
        assert!(matches!(&para.children[1], Node::Text(_)));
    }

    #[test]
    fn test_reopening_active_mark_is_noop() {
        let mut stack = SerializerStack::new();
        stack.open_node(Node::Paragraph(mdast::Paragraph { children: vec![] }));
        let bold = Mark::new("bold");
        stack.open_mark(&bold, Node::Strong(mdast::Strong { children: vec![] }));
        stack.open_mark(&bold, Node::Strong(mdast::Strong { children: vec![] }));
        stack.add_node(Node::text("once"));
        stack.close_mark(&bold);
        stack.close_mark(&bold);
        stack.close_node();

        let Node::Paragraph(para) = stack.finish() else {
            panic!("expected paragraph");
        };
        assert_eq!(para.children.len(), 1);
        let Node::Strong(strong) = &para.children[0] else {
            panic!("expected strong");
        };
        assert_eq!(strong.children.len(), 1);
    }
}
