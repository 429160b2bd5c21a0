// Verbatim content types: fenced code blocks and math.

use crate::mdast;
use crate::model::{Attrs, ContentSpec, NodeType};
use crate::parser::ParserState;
use crate::registry::NodeSpec;
use crate::serializer::SerializerState;

pub struct CodeBlock;

impl NodeSpec for CodeBlock {
    fn name(&self) -> &'static str {
        "code_block"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("code_block", ContentSpec::Text).with_default("language", "")
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Code(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::Code(code) = node else { return };
        let mut attrs = Attrs::new();
        if let Some(lang) = &code.lang {
            attrs.insert("language".into(), lang.as_str().into());
        }
        let children = if code.value.is_empty() {
            vec![]
        } else {
            vec![crate::model::Node::text(&code.value, vec![])]
        };
        state.add_node(ty, attrs, children);
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        let lang = node
            .attr_str("language")
            .filter(|l| !l.is_empty())
            .map(String::from);
        state.add_node(mdast::Node::Code(mdast::Code {
            value: node.text_content(),
            lang,
            meta: None,
        }));
    }
}

/// `$$ ... $$` display math; the source is a text leaf child.
pub struct MathBlock;

impl NodeSpec for MathBlock {
    fn name(&self) -> &'static str {
        "math_block"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("math_block", ContentSpec::Text)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Math(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::Math(math) = node else { return };
        let children = if math.value.is_empty() {
            vec![]
        } else {
            vec![crate::model::Node::text(&math.value, vec![])]
        };
        state.add_node(ty, Attrs::new(), children);
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.add_node(mdast::Node::Math(mdast::Math {
            value: node.text_content(),
            meta: None,
        }));
    }
}

/// `$ ... $` inline math. An atom: the source lives in the `value`
/// attribute, not in text content, so marks around it stay intact.
pub struct MathInline;

impl NodeSpec for MathInline {
    fn name(&self) -> &'static str {
        "math_inline"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("math_inline", ContentSpec::Empty)
            .inline()
            .with_default("value", "")
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::InlineMath(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::InlineMath(math) = node else { return };
        let mut attrs = Attrs::new();
        attrs.insert("value".into(), math.value.as_str().into());
        state.add_node(ty, attrs, vec![]);
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.add_node(mdast::Node::InlineMath(mdast::InlineMath {
            value: node.attr_str("value").unwrap_or("").to_string(),
        }));
    }
}
