// Media node types: images and embeds.

use crate::mdast;
use crate::model::{Attrs, ContentSpec, NodeType};
use crate::parser::ParserState;
use crate::processor::wrap;
use crate::registry::NodeSpec;
use crate::serializer::SerializerState;

pub struct Image;

impl NodeSpec for Image {
    fn name(&self) -> &'static str {
        "image"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("image", ContentSpec::Empty)
            .inline()
            .with_default("src", "")
            .with_default("alt", "")
            .with_default("title", "")
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Image(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::Image(image) = node else { return };
        let mut attrs = Attrs::new();
        attrs.insert("src".into(), image.url.as_str().into());
        attrs.insert("alt".into(), image.alt.as_str().into());
        if let Some(title) = &image.title {
            attrs.insert("title".into(), title.as_str().into());
        }
        state.add_node(ty, attrs, vec![]);
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.add_node(mdast::Node::Image(mdast::Image {
            url: node.attr_str("src").unwrap_or("").to_string(),
            alt: node.attr_str("alt").unwrap_or("").to_string(),
            title: node
                .attr_str("title")
                .filter(|t| !t.is_empty())
                .map(String::from),
        }));
    }
}

/// Embedded external content, written as the `:embed{src="…"}` leaf
/// directive.
///
/// The directive grammar is inline, but the document node is a block: the
/// `after_parse` hook hoists parsed directives out of their host paragraph
/// and the `before_serialize` hook puts the wrapper back.
pub struct Embed;

fn is_embed_directive(node: &mdast::Node) -> bool {
    matches!(node, mdast::Node::LeafDirective(d) if d.name == "embed")
}

impl NodeSpec for Embed {
    fn name(&self) -> &'static str {
        "embed"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("embed", ContentSpec::Empty).with_default("src", "")
    }

    fn after_parse(&self, tree: mdast::Node) -> mdast::Node {
        wrap::unwrap(tree, &is_embed_directive)
    }

    fn before_serialize(&self, tree: mdast::Node) -> mdast::Node {
        wrap::wrap(tree, &is_embed_directive)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        is_embed_directive(node)
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::LeafDirective(directive) = node else {
            return;
        };
        let mut attrs = Attrs::new();
        for (key, value) in &directive.attributes {
            attrs.insert(key.clone(), value.as_str().into());
        }
        state.add_node(ty, attrs, vec![]);
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        // Unset defaults serialize as no attribute at all.
        let attributes = node
            .attrs
            .iter()
            .filter_map(|(key, value)| {
                let value = value.as_str()?;
                if value.is_empty() {
                    return None;
                }
                Some((key.clone(), value.to_string()))
            })
            .collect();
        state.add_node(mdast::Node::LeafDirective(mdast::LeafDirective {
            name: "embed".into(),
            attributes,
        }));
    }
}
