// Decoration marks: inline syntax outside CommonMark/GFM, parsed by the
// processor's decoration scanners and printed from its decoration table.
//
// Each mark registers its delimiter here; the shared flagged form is
// `marker flags marker content marker flags marker`.

use crate::mdast;
use crate::model::{Attrs, Mark, MarkType, Node};
use crate::parser::ParserState;
use crate::processor::SyntaxBuilder;
use crate::registry::MarkSpec;
use crate::serializer::SerializerState;

const DEFAULT_HIGHLIGHT_COLOR: &str = "yellow";

/// `==text==` / `==v-red==text==v-red==`. The flag carries the color; the
/// default color is written without flags.
pub struct Highlight;

impl MarkSpec for Highlight {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn mark_type(&self) -> MarkType {
        MarkType::new("highlight").with_default("color", DEFAULT_HIGHLIGHT_COLOR)
    }

    fn register_syntax(&self, syntax: &mut SyntaxBuilder) {
        syntax.decoration("highlight", "==", true);
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Decoration(d) if d.name == "highlight")
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType) {
        let mdast::Node::Decoration(decoration) = node else {
            return;
        };
        let mut attrs = Attrs::new();
        if let Some(color) = decoration.flags.as_deref().and_then(|f| f.strip_prefix("v-")) {
            attrs.insert("color".into(), color.into());
        }
        state.open_mark(ty, attrs);
        state.next(&decoration.children);
        state.close_mark(ty);
    }

    fn serialize_apply(&self, state: &mut SerializerState, mark: &Mark, _node: &Node) -> bool {
        let flags = mark
            .attr_str("color")
            .filter(|color| *color != DEFAULT_HIGHLIGHT_COLOR && !color.is_empty())
            .map(|color| format!("v-{color}"));
        state.open_mark(
            mark,
            mdast::Node::Decoration(mdast::Decoration {
                name: "highlight".into(),
                flags,
                children: vec![],
            }),
        );
        false
    }
}

/// Plain (unflagged) decoration marks share one shape; a macro would hide
/// more than it saves at three call sites.
struct PlainDecoration;

impl PlainDecoration {
    fn parse(
        state: &mut ParserState,
        node: &mdast::Node,
        ty: &MarkType,
        name: &str,
    ) {
        let mdast::Node::Decoration(decoration) = node else {
            return;
        };
        if decoration.name != name {
            return;
        }
        state.open_mark(ty, Attrs::new());
        state.next(&decoration.children);
        state.close_mark(ty);
    }

    fn serialize(state: &mut SerializerState, mark: &Mark, name: &str) {
        state.open_mark(
            mark,
            mdast::Node::Decoration(mdast::Decoration {
                name: name.into(),
                flags: None,
                children: vec![],
            }),
        );
    }
}

/// `+text+`.
pub struct Underline;

impl MarkSpec for Underline {
    fn name(&self) -> &'static str {
        "underline"
    }

    fn mark_type(&self) -> MarkType {
        MarkType::new("underline")
    }

    fn register_syntax(&self, syntax: &mut SyntaxBuilder) {
        syntax.decoration("underline", "+", false);
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Decoration(d) if d.name == "underline")
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType) {
        PlainDecoration::parse(state, node, ty, "underline");
    }

    fn serialize_apply(&self, state: &mut SerializerState, mark: &Mark, _node: &Node) -> bool {
        PlainDecoration::serialize(state, mark, "underline");
        false
    }
}

/// `~text~`. Works because single-tilde GFM strikethrough is disabled in
/// the parse options.
pub struct Subscript;

impl MarkSpec for Subscript {
    fn name(&self) -> &'static str {
        "subscript"
    }

    fn mark_type(&self) -> MarkType {
        MarkType::new("subscript")
    }

    fn register_syntax(&self, syntax: &mut SyntaxBuilder) {
        syntax.decoration("subscript", "~", false);
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Decoration(d) if d.name == "subscript")
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType) {
        PlainDecoration::parse(state, node, ty, "subscript");
    }

    fn serialize_apply(&self, state: &mut SerializerState, mark: &Mark, _node: &Node) -> bool {
        PlainDecoration::serialize(state, mark, "subscript");
        false
    }
}

/// `^text^`.
pub struct Superscript;

impl MarkSpec for Superscript {
    fn name(&self) -> &'static str {
        "superscript"
    }

    fn mark_type(&self) -> MarkType {
        MarkType::new("superscript")
    }

    fn register_syntax(&self, syntax: &mut SyntaxBuilder) {
        syntax.decoration("superscript", "^", false);
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Decoration(d) if d.name == "superscript")
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType) {
        PlainDecoration::parse(state, node, ty, "superscript");
    }

    fn serialize_apply(&self, state: &mut SerializerState, mark: &Mark, _node: &Node) -> bool {
        PlainDecoration::serialize(state, mark, "superscript");
        false
    }
}
