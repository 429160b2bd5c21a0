use crate::mdast;
use crate::model::{Attrs, Mark, MarkType, Node};
use crate::parser::ParserState;
use crate::registry::MarkSpec;
use crate::serializer::SerializerState;

/// Hyperlink mark. `href` is required in practice, `title` optional.
pub struct Link;

impl MarkSpec for Link {
    fn name(&self) -> &'static str {
        "link"
    }

    fn mark_type(&self) -> MarkType {
        MarkType::new("link").with_default("href", "")
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Link(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType) {
        let mdast::Node::Link(link) = node else { return };
        let mut attrs = Attrs::new();
        attrs.insert("href".into(), link.url.as_str().into());
        if let Some(title) = &link.title {
            attrs.insert("title".into(), title.as_str().into());
        }
        state.open_mark(ty, attrs);
        state.next(&link.children);
        state.close_mark(ty);
    }

    fn serialize_apply(&self, state: &mut SerializerState, mark: &Mark, _node: &Node) -> bool {
        state.open_mark(
            mark,
            mdast::Node::Link(mdast::Link {
                url: mark.attr_str("href").unwrap_or("").to_string(),
                title: mark
                    .attr_str("title")
                    .filter(|t| !t.is_empty())
                    .map(String::from),
                children: vec![],
            }),
        );
        false
    }
}
