// Conversion from the `markdown` crate's mdast into the crate's own AST.
//
// Reference-style links and images are resolved against their definitions
// here, so the rest of the engine only ever sees resolved `Link`/`Image`
// nodes. Constructs with no counterpart (footnotes, frontmatter) are dropped
// with a diagnostic, never an error.

use std::collections::HashMap;

use markdown::mdast as raw;

use crate::mdast::{self, Node};

type Definitions = HashMap<String, (String, Option<String>)>;

/// Convert a raw parse tree's root into this crate's AST children.
pub(crate) fn convert_root(node: raw::Node) -> Vec<Node> {
    let mut defs = Definitions::new();
    collect_definitions(&node, &mut defs);
    match node {
        raw::Node::Root(root) => convert_all(root.children, &defs),
        other => convert(other, &defs),
    }
}

fn collect_definitions(node: &raw::Node, defs: &mut Definitions) {
    if let raw::Node::Definition(def) = node {
        defs.entry(def.identifier.clone())
            .or_insert_with(|| (def.url.clone(), def.title.clone()));
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_definitions(child, defs);
        }
    }
}

fn convert_all(children: Vec<raw::Node>, defs: &Definitions) -> Vec<Node> {
    children
        .into_iter()
        .flat_map(|child| convert(child, defs))
        .collect()
}

fn convert(node: raw::Node, defs: &Definitions) -> Vec<Node> {
    let converted = match node {
        raw::Node::Root(n) => Node::Root(mdast::Root {
            children: convert_all(n.children, defs),
        }),
        raw::Node::Paragraph(n) => Node::Paragraph(mdast::Paragraph {
            children: convert_all(n.children, defs),
        }),
        raw::Node::Heading(n) => Node::Heading(mdast::Heading {
            depth: n.depth,
            children: convert_all(n.children, defs),
        }),
        raw::Node::Blockquote(n) => Node::Blockquote(mdast::Blockquote {
            children: convert_all(n.children, defs),
        }),
        raw::Node::List(n) => Node::List(mdast::List {
            ordered: n.ordered,
            start: n.start,
            spread: n.spread,
            children: convert_all(n.children, defs),
        }),
        raw::Node::ListItem(n) => Node::ListItem(mdast::ListItem {
            spread: n.spread,
            checked: n.checked,
            children: convert_all(n.children, defs),
        }),
        raw::Node::Code(n) => Node::Code(mdast::Code {
            value: n.value,
            lang: n.lang,
            meta: n.meta,
        }),
        raw::Node::Math(n) => Node::Math(mdast::Math {
            value: n.value,
            meta: n.meta,
        }),
        raw::Node::InlineMath(n) => Node::InlineMath(mdast::InlineMath { value: n.value }),
        raw::Node::Text(n) => Node::Text(mdast::Text { value: n.value }),
        raw::Node::Emphasis(n) => Node::Emphasis(mdast::Emphasis {
            children: convert_all(n.children, defs),
        }),
        raw::Node::Strong(n) => Node::Strong(mdast::Strong {
            children: convert_all(n.children, defs),
        }),
        raw::Node::Delete(n) => Node::Delete(mdast::Delete {
            children: convert_all(n.children, defs),
        }),
        raw::Node::InlineCode(n) => Node::InlineCode(mdast::InlineCode { value: n.value }),
        raw::Node::Break(_) => Node::Break(mdast::Break),
        raw::Node::ThematicBreak(_) => Node::ThematicBreak(mdast::ThematicBreak),
        raw::Node::Html(n) => Node::Html(mdast::Html { value: n.value }),
        raw::Node::Link(n) => Node::Link(mdast::Link {
            url: n.url,
            title: n.title,
            children: convert_all(n.children, defs),
        }),
        raw::Node::Image(n) => Node::Image(mdast::Image {
            url: n.url,
            title: n.title,
            alt: n.alt,
        }),
        raw::Node::LinkReference(n) => match defs.get(&n.identifier) {
            Some((url, title)) => Node::Link(mdast::Link {
                url: url.clone(),
                title: title.clone(),
                children: convert_all(n.children, defs),
            }),
            None => {
                // Undefined reference: unwrap to its visible content.
                return convert_all(n.children, defs);
            }
        },
        raw::Node::ImageReference(n) => match defs.get(&n.identifier) {
            Some((url, title)) => Node::Image(mdast::Image {
                url: url.clone(),
                title: title.clone(),
                alt: n.alt,
            }),
            None => Node::text(n.alt),
        },
        raw::Node::Definition(_) => return Vec::new(),
        raw::Node::Table(n) => Node::Table(mdast::Table {
            align: n.align.into_iter().map(convert_align).collect(),
            children: convert_all(n.children, defs),
        }),
        raw::Node::TableRow(n) => Node::TableRow(mdast::TableRow {
            children: convert_all(n.children, defs),
        }),
        raw::Node::TableCell(n) => Node::TableCell(mdast::TableCell {
            children: convert_all(n.children, defs),
        }),
        other => {
            tracing::warn!("dropping unsupported markdown construct during conversion: {other:?}");
            return Vec::new();
        }
    };
    vec![converted]
}

fn convert_align(align: raw::AlignKind) -> Option<mdast::AlignKind> {
    match align {
        raw::AlignKind::Left => Some(mdast::AlignKind::Left),
        raw::AlignKind::Right => Some(mdast::AlignKind::Right),
        raw::AlignKind::Center => Some(mdast::AlignKind::Center),
        raw::AlignKind::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Node> {
        let ast = markdown::to_mdast(text, &markdown::ParseOptions::gfm()).expect("gfm parses");
        convert_root(ast)
    }

    #[test]
    fn test_reference_link_resolved() {
        let nodes = parse("[site][1]\n\n[1]: https://example.com");
        assert_eq!(nodes.len(), 1);
        let Node::Paragraph(p) = &nodes[0] else {
            panic!("expected paragraph");
        };
        match &p.children[0] {
            Node::Link(link) => assert_eq!(link.url, "https://example.com"),
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_undefined_reference_stays_visible() {
        // With no matching definition the text must survive in some form,
        // whether the parser emits a reference node or literal text.
        let nodes = parse("[missing][nope]");
        let Node::Paragraph(p) = &nodes[0] else {
            panic!("expected paragraph");
        };
        let text: String = p
            .children
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) => Some(t.value.as_str()),
                _ => None,
            })
            .collect();
        assert!(text.contains("missing"));
    }
}
