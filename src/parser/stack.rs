// Document tree assembly stack for the parse direction.

use crate::model::{mark_set_eq, Attrs, Mark, MarkType, Node, NodeType};

struct Frame {
    ty: NodeType,
    attrs: Attrs,
    children: Vec<Node>,
}

/// Builds a document tree from open/add/close calls issued by parse rules.
///
/// Marks are tracked as the current active set; text added while marks are
/// open carries them. Adjacent text leaves with equal mark sets are merged so
/// the tree never distinguishes `one text run` from `two runs split by the
/// Markdown grammar`.
#[derive(Default)]
pub struct ParserStack {
    frames: Vec<Frame>,
    marks: Vec<Mark>,
    result: Option<Node>,
}

impl ParserStack {
    pub fn new() -> ParserStack {
        ParserStack::default()
    }

    /// Open a node; children added until the matching `close_node` land in it.
    pub fn open_node(&mut self, ty: &NodeType, attrs: Attrs) {
        self.frames.push(Frame {
            ty: ty.clone(),
            attrs,
            children: Vec::new(),
        });
    }

    /// Close the innermost open node and attach it to its parent. Clears the
    /// active mark set: marks never span block boundaries.
    pub fn close_node(&mut self) {
        self.marks.clear();
        let Some(frame) = self.frames.pop() else {
            tracing::warn!("close_node with no open node");
            return;
        };
        match frame.ty.create(frame.attrs, frame.children, Vec::new()) {
            Some(node) => self.push(node),
            None => tracing::warn!(ty = frame.ty.name, "node failed validation; dropped"),
        }
    }

    /// Add a complete node (leaf or atom) without opening a frame. The node
    /// carries the currently active marks.
    pub fn add_node(&mut self, ty: &NodeType, attrs: Attrs, children: Vec<Node>) {
        match ty.create(attrs, children, self.marks.clone()) {
            Some(node) => self.push(node),
            None => tracing::warn!(ty = ty.name, "node failed validation; dropped"),
        }
    }

    /// Add a text leaf carrying the active marks, merging it into the
    /// previous sibling when that is a text leaf with an equal mark set.
    pub fn add_text(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        if let Some(frame) = self.frames.last_mut() {
            if let Some(last) = frame.children.last_mut() {
                if last.is_text() && mark_set_eq(&last.marks, &self.marks) {
                    if let Some(text) = &mut last.text {
                        text.push_str(value);
                        return;
                    }
                }
            }
        }
        self.push(Node::text(value, self.marks.clone()));
    }

    /// Activate a mark for subsequently added text.
    pub fn open_mark(&mut self, ty: &MarkType, attrs: Attrs) {
        let mark = ty.create(attrs);
        self.marks = mark.add_to_set(&self.marks);
    }

    /// Deactivate a mark.
    pub fn close_mark(&mut self, ty: &MarkType) {
        let mark = Mark::new(ty.name);
        self.marks = mark.remove_from_set(&self.marks);
    }

    /// Close everything still open and return the finished tree.
    ///
    /// Panics when no node was ever produced; that is a programming error in
    /// the registered parse rules, not an input condition.
    pub fn finish(mut self) -> Node {
        while !self.frames.is_empty() {
            self.close_node();
        }
        match self.result {
            Some(node) => node,
            None => panic!("parser stack finished without producing a node"),
        }
    }

    fn push(&mut self, node: Node) {
        match self.frames.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.result = Some(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentSpec;

    fn doc_type() -> NodeType {
        NodeType::new("doc", ContentSpec::BlocksRequired)
    }

    fn para_type() -> NodeType {
        NodeType::new("paragraph", ContentSpec::Inline)
    }

    #[test]
    fn test_basic_assembly() {
        let mut stack = ParserStack::new();
        stack.open_node(&doc_type(), Attrs::new());
        stack.open_node(&para_type(), Attrs::new());
        stack.add_text("hello");
        stack.close_node();
        let doc = stack.finish();
        assert_eq!(doc.type_name, "doc");
        assert_eq!(doc.content[0].content[0].text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_adjacent_text_merged_when_marks_equal() {
        let bold = MarkType::new("bold");
        let mut stack = ParserStack::new();
        stack.open_node(&para_type(), Attrs::new());
        stack.open_mark(&bold, Attrs::new());
        stack.add_text("a");
        stack.add_text("b");
        stack.close_mark(&bold);
        stack.add_text("c");
        stack.close_node();
        let para = stack.finish();
        assert_eq!(para.content.len(), 2);
        assert_eq!(para.content[0].text.as_deref(), Some("ab"));
        assert_eq!(para.content[0].marks.len(), 1);
        assert_eq!(para.content[1].text.as_deref(), Some("c"));
        assert!(para.content[1].marks.is_empty());
    }

    #[test]
    fn test_close_node_clears_marks() {
        let bold = MarkType::new("bold");
        let mut stack = ParserStack::new();
        stack.open_node(&doc_type(), Attrs::new());
        stack.open_node(&para_type(), Attrs::new());
        stack.open_mark(&bold, Attrs::new());
        stack.close_node();
        stack.open_node(&para_type(), Attrs::new());
        stack.add_text("plain");
        stack.close_node();
        let doc = stack.finish();
        assert!(doc.content[1].content[0].marks.is_empty());
    }
}
