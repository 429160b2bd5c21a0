// Paragraph wrap/unwrap transforms.
//
// Inline-only Markdown syntax (leaf directives) sometimes represents
// block-level document nodes. `wrap` runs before printing and gives every
// matching node a synthetic paragraph so the inline syntax has a host;
// `unwrap` runs after parsing and hoists matching nodes back out of
// paragraphs, splitting the remaining content around them.

use crate::mdast::{self, Node};

/// Ensure every node matching `pred` that is not already a direct child of a
/// paragraph gets wrapped in a synthetic paragraph.
pub fn wrap(node: Node, pred: &dyn Fn(&Node) -> bool) -> Node {
    walk_wrap(node, pred)
}

fn walk_wrap(mut node: Node, pred: &dyn Fn(&Node) -> bool) -> Node {
    let is_paragraph = matches!(node, Node::Paragraph(_));
    if let Some(children) = node.children_mut() {
        let old = std::mem::take(children);
        *children = old
            .into_iter()
            .map(|child| {
                if pred(&child) && !is_paragraph {
                    Node::Paragraph(mdast::Paragraph {
                        children: vec![child],
                    })
                } else {
                    walk_wrap(child, pred)
                }
            })
            .collect();
    }
    node
}

/// Hoist nodes matching `pred` out of paragraphs: within each paragraph, runs
/// of matching children become siblings of the paragraph, and the remaining
/// content is split into paragraphs around them. Paragraphs left with only
/// whitespace are dropped.
pub fn unwrap(node: Node, pred: &dyn Fn(&Node) -> bool) -> Node {
    walk_unwrap(node, pred)
}

fn walk_unwrap(mut node: Node, pred: &dyn Fn(&Node) -> bool) -> Node {
    if let Some(children) = node.children_mut() {
        let old = std::mem::take(children);
        let mut out: Vec<Node> = Vec::new();
        for child in old {
            match child {
                Node::Paragraph(p) if p.children.iter().any(pred) => {
                    split_paragraph(p.children, pred, &mut out);
                }
                other => out.push(walk_unwrap(other, pred)),
            }
        }
        *children = out;
    }
    node
}

fn split_paragraph(children: Vec<Node>, pred: &dyn Fn(&Node) -> bool, out: &mut Vec<Node>) {
    let mut run: Vec<Node> = Vec::new();
    for child in children {
        if pred(&child) {
            flush_run(&mut run, out);
            out.push(child);
        } else {
            run.push(child);
        }
    }
    flush_run(&mut run, out);
}

fn flush_run(run: &mut Vec<Node>, out: &mut Vec<Node>) {
    if run.is_empty() {
        return;
    }
    let children = std::mem::take(run);
    if is_whitespace_only(&children) {
        return;
    }
    out.push(Node::Paragraph(mdast::Paragraph { children }));
}

fn is_whitespace_only(nodes: &[Node]) -> bool {
    nodes.iter().all(|n| match n {
        Node::Text(t) => t.value.trim().is_empty(),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_embed(node: &Node) -> bool {
        matches!(node, Node::LeafDirective(d) if d.name == "embed")
    }

    fn embed() -> Node {
        Node::LeafDirective(mdast::LeafDirective {
            name: "embed".into(),
            attributes: vec![("src".into(), "https://example.com".into())],
        })
    }

    #[test]
    fn test_unwrap_hoists_lone_directive() {
        let tree = Node::Root(mdast::Root {
            children: vec![Node::Paragraph(mdast::Paragraph {
                children: vec![embed()],
            })],
        });
        let tree = unwrap(tree, &is_embed);
        let Node::Root(root) = tree else { unreachable!() };
        assert_eq!(root.children.len(), 1);
        assert!(is_embed(&root.children[0]));
    }

    #[test]
    fn test_unwrap_splits_surrounding_text() {
        let tree = Node::Root(mdast::Root {
            children: vec![Node::Paragraph(mdast::Paragraph {
                children: vec![Node::text("before"), embed(), Node::text("after")],
            })],
        });
        let tree = unwrap(tree, &is_embed);
        let Node::Root(root) = tree else { unreachable!() };
        assert_eq!(root.children.len(), 3);
        assert!(matches!(&root.children[0], Node::Paragraph(_)));
        assert!(is_embed(&root.children[1]));
        assert!(matches!(&root.children[2], Node::Paragraph(_)));
    }

    #[test]
    fn test_wrap_reverses_unwrap() {
        let tree = Node::Root(mdast::Root {
            children: vec![embed()],
        });
        let tree = wrap(tree, &is_embed);
        let Node::Root(root) = tree else { unreachable!() };
        assert_eq!(root.children.len(), 1);
        let Node::Paragraph(p) = &root.children[0] else {
            panic!("expected synthetic paragraph");
        };
        assert!(is_embed(&p.children[0]));
    }

    #[test]
    fn test_wrap_leaves_paragraph_children_alone() {
        let tree = Node::Paragraph(mdast::Paragraph {
            children: vec![embed()],
        });
        let tree = wrap(tree, &is_embed);
        let Node::Paragraph(p) = tree else { unreachable!() };
        assert!(is_embed(&p.children[0]));
    }
}
