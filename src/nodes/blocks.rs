// Core block node types: document root, paragraph, text, heading,
// blockquote, horizontal rule, hard break, raw HTML.

use crate::mdast;
use crate::model::{Attrs, ContentSpec, NodeType};
use crate::parser::ParserState;
use crate::registry::NodeSpec;
use crate::serializer::SerializerState;

/// Document root. Always at least one block child.
pub struct Doc;

impl NodeSpec for Doc {
    fn name(&self) -> &'static str {
        "doc"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("doc", ContentSpec::BlocksRequired)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Root(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::Root(root) = node else { return };
        state.open_node(ty, Attrs::new());
        state.next(&root.children);
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.open_node(mdast::Node::Root(mdast::Root::default()));
        state.next(&node.content);
        state.close_node();
    }
}

pub struct Paragraph;

impl NodeSpec for Paragraph {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("paragraph", ContentSpec::Inline)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Paragraph(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::Paragraph(para) = node else { return };
        state.open_node(ty, Attrs::new());
        state.next(&para.children);
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.open_node(mdast::Node::Paragraph(mdast::Paragraph { children: vec![] }));
        state.next(&node.content);
        state.close_node();
    }
}

/// The text leaf. Marks on it are handled by the dispatcher, not here.
pub struct Text;

impl NodeSpec for Text {
    fn name(&self) -> &'static str {
        "text"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("text", ContentSpec::Empty).inline()
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Text(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, _ty: &NodeType) {
        let mdast::Node::Text(text) = node else { return };
        state.add_text(&text.value);
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.add_node(mdast::Node::text(node.text.as_deref().unwrap_or("")));
    }
}

pub struct Heading;

impl NodeSpec for Heading {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("heading", ContentSpec::Inline).with_default("level", 1u64)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Heading(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::Heading(heading) = node else { return };
        let mut attrs = Attrs::new();
        attrs.insert("level".into(), u64::from(heading.depth).into());
        state.open_node(ty, attrs);
        state.next(&heading.children);
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        let depth = node.attr_u64("level").unwrap_or(1).clamp(1, 6) as u8;
        state.open_node(mdast::Node::Heading(mdast::Heading {
            depth,
            children: vec![],
        }));
        state.next(&node.content);
        state.close_node();
    }
}

pub struct Blockquote;

impl NodeSpec for Blockquote {
    fn name(&self) -> &'static str {
        "blockquote"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("blockquote", ContentSpec::BlocksRequired)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Blockquote(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::Blockquote(quote) = node else { return };
        state.open_node(ty, Attrs::new());
        state.next(&quote.children);
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.open_node(mdast::Node::Blockquote(mdast::Blockquote {
            children: vec![],
        }));
        state.next(&node.content);
        state.close_node();
    }
}

pub struct HorizontalRule;

impl NodeSpec for HorizontalRule {
    fn name(&self) -> &'static str {
        "horizontal_rule"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("horizontal_rule", ContentSpec::Empty)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::ThematicBreak(_))
    }

    fn parse_apply(&self, state: &mut ParserState, _node: &mdast::Node, ty: &NodeType) {
        state.add_node(ty, Attrs::new(), vec![]);
    }

    fn serialize_apply(&self, state: &mut SerializerState, _node: &crate::model::Node) {
        state.add_node(mdast::Node::ThematicBreak(mdast::ThematicBreak));
    }
}

pub struct HardBreak;

impl NodeSpec for HardBreak {
    fn name(&self) -> &'static str {
        "hard_break"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("hard_break", ContentSpec::Empty).inline()
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Break(_))
    }

    fn parse_apply(&self, state: &mut ParserState, _node: &mdast::Node, ty: &NodeType) {
        state.add_node(ty, Attrs::new(), vec![]);
    }

    fn serialize_apply(&self, state: &mut SerializerState, _node: &crate::model::Node) {
        state.add_node(mdast::Node::Break(mdast::Break));
    }
}

/// Raw HTML carried through verbatim as a text leaf child.
pub struct HtmlBlock;

impl NodeSpec for HtmlBlock {
    fn name(&self) -> &'static str {
        "html"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("html", ContentSpec::Text)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Html(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::Html(html) = node else { return };
        let children = vec![crate::model::Node::text(&html.value, vec![])];
        state.add_node(ty, Attrs::new(), children);
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.add_node(mdast::Node::Html(mdast::Html {
            value: node.text_content(),
        }));
    }
}
