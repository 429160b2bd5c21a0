// Core inline marks: bold, italic, inline code, strikethrough.

use crate::mdast;
use crate::model::{Attrs, Mark, MarkType, Node};
use crate::parser::ParserState;
use crate::registry::MarkSpec;
use crate::serializer::SerializerState;

pub struct Bold;

impl MarkSpec for Bold {
    fn name(&self) -> &'static str {
        "bold"
    }

    fn mark_type(&self) -> MarkType {
        MarkType::new("bold")
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Strong(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType) {
        let mdast::Node::Strong(strong) = node else { return };
        state.open_mark(ty, Attrs::new());
        state.next(&strong.children);
        state.close_mark(ty);
    }

    fn serialize_apply(&self, state: &mut SerializerState, mark: &Mark, _node: &Node) -> bool {
        state.open_mark(mark, mdast::Node::Strong(mdast::Strong { children: vec![] }));
        false
    }
}

pub struct Italic;

impl MarkSpec for Italic {
    fn name(&self) -> &'static str {
        "italic"
    }

    fn mark_type(&self) -> MarkType {
        MarkType::new("italic")
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Emphasis(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType) {
        let mdast::Node::Emphasis(emphasis) = node else { return };
        state.open_mark(ty, Attrs::new());
        state.next(&emphasis.children);
        state.close_mark(ty);
    }

    fn serialize_apply(&self, state: &mut SerializerState, mark: &Mark, _node: &Node) -> bool {
        state.open_mark(
            mark,
            mdast::Node::Emphasis(mdast::Emphasis { children: vec![] }),
        );
        false
    }
}

/// Inline code. The only mark that owns its text run: Markdown inline code
/// is a leaf with a value, not a container, so the serialize rule consumes
/// the text node instead of wrapping it.
pub struct Code;

impl MarkSpec for Code {
    fn name(&self) -> &'static str {
        "code"
    }

    fn mark_type(&self) -> MarkType {
        MarkType::new("code")
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::InlineCode(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType) {
        let mdast::Node::InlineCode(code) = node else { return };
        state.open_mark(ty, Attrs::new());
        state.add_text(&code.value);
        state.close_mark(ty);
    }

    fn serialize_apply(&self, state: &mut SerializerState, _mark: &Mark, node: &Node) -> bool {
        state.add_node(mdast::Node::InlineCode(mdast::InlineCode {
            value: node.text.clone().unwrap_or_default(),
        }));
        true
    }
}

pub struct Strike;

impl MarkSpec for Strike {
    fn name(&self) -> &'static str {
        "strikethrough"
    }

    fn mark_type(&self) -> MarkType {
        MarkType::new("strikethrough")
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Delete(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType) {
        let mdast::Node::Delete(delete) = node else { return };
        state.open_mark(ty, Attrs::new());
        state.next(&delete.children);
        state.close_mark(ty);
    }

    fn serialize_apply(&self, state: &mut SerializerState, mark: &Mark, _node: &Node) -> bool {
        state.open_mark(mark, mdast::Node::Delete(mdast::Delete { children: vec![] }));
        false
    }
}
