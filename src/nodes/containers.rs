// Container directive node types.
//
// `details` is an ordinary container whose body is parsed Markdown;
// `diagram` registers itself as a raw container so the processor keeps its
// body verbatim (diagram sources must not go through Markdown escaping).

use crate::mdast;
use crate::model::{Attrs, ContentSpec, NodeType};
use crate::parser::ParserState;
use crate::processor::SyntaxBuilder;
use crate::registry::NodeSpec;
use crate::serializer::SerializerState;

/// Collapsible section, written as `:::details{summary="…"}`.
pub struct Details;

impl NodeSpec for Details {
    fn name(&self) -> &'static str {
        "details"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("details", ContentSpec::BlocksRequired).with_default("summary", "")
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::ContainerDirective(d) if d.name == "details")
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::ContainerDirective(directive) = node else {
            return;
        };
        let mut attrs = Attrs::new();
        for (key, value) in &directive.attributes {
            attrs.insert(key.clone(), value.as_str().into());
        }
        state.open_node(ty, attrs);
        state.next(&directive.children);
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        let mut attributes = Vec::new();
        if let Some(summary) = node.attr_str("summary").filter(|s| !s.is_empty()) {
            attributes.push(("summary".to_string(), summary.to_string()));
        }
        state.open_node(mdast::Node::ContainerDirective(mdast::ContainerDirective {
            name: "details".into(),
            attributes,
            children: vec![],
            value: None,
        }));
        state.next(&node.content);
        state.close_node();
    }
}

/// Diagram source block, written as `:::diagram{type="mermaid"}`. The source
/// text lives in the `content` attribute, untouched by Markdown.
pub struct Diagram;

impl NodeSpec for Diagram {
    fn name(&self) -> &'static str {
        "diagram"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("diagram", ContentSpec::Empty)
            .with_default("kind", "")
            .with_default("content", "")
    }

    fn register_syntax(&self, syntax: &mut SyntaxBuilder) {
        syntax.raw_container("diagram");
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::ContainerDirective(d) if d.name == "diagram")
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::ContainerDirective(directive) = node else {
            return;
        };
        let kind = directive
            .attributes
            .iter()
            .find(|(key, _)| key == "type")
            .map(|(_, value)| value.as_str())
            .unwrap_or("");
        let mut attrs = Attrs::new();
        attrs.insert("kind".into(), kind.into());
        attrs.insert(
            "content".into(),
            directive.value.as_deref().unwrap_or("").into(),
        );
        state.add_node(ty, attrs, vec![]);
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        let mut attributes = Vec::new();
        if let Some(kind) = node.attr_str("kind").filter(|k| !k.is_empty()) {
            attributes.push(("type".to_string(), kind.to_string()));
        }
        state.add_node(mdast::Node::ContainerDirective(mdast::ContainerDirective {
            name: "diagram".into(),
            attributes,
            children: vec![],
            value: Some(node.attr_str("content").unwrap_or("").to_string()),
        }));
    }
}
