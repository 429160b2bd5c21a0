// Directive syntax: inline leaf directives (`:name{key="value"}`) and
// block container directives (`:::name{...}` ... `:::`).
//
// The base Markdown grammar has no directive construct, so containers are
// recognized by a line-oriented region scan before CommonMark parsing, and
// leaf directives by a text-node scan afterwards. Anything malformed stays
// literal text.

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::Regex;

use crate::mdast::{self, Node};

// ---------------------------------------------------------------------------
// Attribute syntax
// ---------------------------------------------------------------------------

/// Parse `key="value"` pairs (quotes optional for space-free values),
/// preserving encounter order.
pub(crate) fn parse_attributes(src: &str) -> Vec<(String, String)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_-]*)\s*=\s*(?:"([^"]*)"|([^\s"]+))"#)
            .expect("valid attribute pattern")
    });
    re.captures_iter(src)
        .map(|caps| {
            let key = caps[1].to_string();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (key, value)
        })
        .collect()
}

/// Print attributes back as `key="value"` pairs, space separated.
pub(crate) fn print_attributes(attributes: &[(String, String)]) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Leaf directives
// ---------------------------------------------------------------------------

fn leaf_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r":([A-Za-z][A-Za-z0-9_-]*)\{([^}]*)\}").expect("valid leaf directive pattern")
    })
}

/// Recognize `:name{...}` leaf directives throughout a parsed tree.
///
/// Attribute values are usually URLs, and the GFM autolink-literal pass has
/// already turned those into `Link` nodes by the time this runs: the
/// directive arrives as a text fragment ending in an unclosed `:name{`,
/// a link, and a closing fragment. Such spans are stitched back together
/// from their inline siblings before scanning.
pub(crate) fn rewrite_leaf_directives(mut node: Node) -> Node {
    if let Some(children) = node.children_mut() {
        let old = std::mem::take(children);
        *children = scan_children(old);
    }
    node
}

fn scan_children(children: Vec<Node>) -> Vec<Node> {
    let mut queue: VecDeque<Node> = children.into();
    let mut out: Vec<Node> = Vec::new();

    while let Some(child) = queue.pop_front() {
        let Node::Text(text) = child else {
            out.push(rewrite_leaf_directives(child));
            continue;
        };

        if let Some((combined, consumed)) = stitch(&text.value, &queue) {
            if let Some(nodes) = scan_leaf_directives(&combined) {
                queue.drain(..consumed);
                out.extend(nodes);
                continue;
            }
        }

        match scan_leaf_directives(&text.value) {
            Some(nodes) => out.extend(nodes),
            None => out.push(Node::Text(text)),
        }
    }
    out
}

/// Append following siblings' literal text until the open directive closes.
/// Returns the combined text and the number of siblings folded in.
fn stitch(value: &str, rest: &VecDeque<Node>) -> Option<(String, usize)> {
    if !has_open_directive(value) {
        return None;
    }
    let mut combined = value.to_string();
    for (taken, node) in rest.iter().enumerate() {
        let piece = literal_text(node)?;
        combined.push_str(piece);
        if piece.contains('}') {
            return Some((combined, taken + 1));
        }
    }
    None
}

/// Whether the text contains a directive opener with no `}` after it.
fn has_open_directive(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r":[A-Za-z][A-Za-z0-9_-]*\{").expect("valid directive opener pattern")
    });
    re.find_iter(value).any(|m| {
        !value[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric())
            && !value[m.end()..].contains('}')
    })
}

/// The literal source an inline node stands for, when reconstructible.
fn literal_text(node: &Node) -> Option<&str> {
    match node {
        Node::Text(t) => Some(&t.value),
        // An autolink literal reads exactly as its visible text.
        Node::Link(link) => match link.children.as_slice() {
            [Node::Text(t)] => Some(&t.value),
            _ => None,
        },
        _ => None,
    }
}

/// Text-node visitor splitting `:name{...}` occurrences out of a text run.
fn scan_leaf_directives(value: &str) -> Option<Vec<Node>> {
    let mut out: Vec<Node> = Vec::new();
    let mut last = 0usize;

    for caps in leaf_re().captures_iter(value) {
        let whole = caps.get(0).expect("match");
        // A URL scheme or mid-word colon is not a directive.
        if value[..whole.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric())
        {
            continue;
        }
        if whole.start() > last {
            out.push(Node::text(&value[last..whole.start()]));
        }
        out.push(Node::LeafDirective(mdast::LeafDirective {
            name: caps[1].to_string(),
            attributes: parse_attributes(&caps[2]),
        }));
        last = whole.end();
    }

    if out.is_empty() {
        return None;
    }
    if last < value.len() {
        out.push(Node::text(&value[last..]));
    }
    Some(out)
}

// ---------------------------------------------------------------------------
// Container directives
// ---------------------------------------------------------------------------

/// One segment of source text after the container region scan.
pub(crate) enum Region {
    /// Plain Markdown, handed to the CommonMark parser.
    Markdown(String),
    /// A `:::name` ... `:::` block.
    Container {
        name: String,
        attributes: Vec<(String, String)>,
        body: String,
    },
}

fn container_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^:::([A-Za-z][A-Za-z0-9_-]*)\s*(\{[^}]*\})?\s*$")
            .expect("valid container directive pattern")
    })
}

fn is_container_close(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed == ":::"
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Split source text into plain-Markdown and container-directive regions.
///
/// Openers inside fenced code blocks are ignored; an opener with no matching
/// close falls back to literal text.
pub(crate) fn split_regions(text: &str) -> Vec<Region> {
    let lines: Vec<&str> = text.lines().collect();
    let mut regions = Vec::new();
    let mut plain: Vec<&str> = Vec::new();
    let mut in_fence = false;
    let mut i = 0usize;

    while i < lines.len() {
        let line = lines[i];
        if is_fence(line) {
            in_fence = !in_fence;
        }
        let opener = if in_fence {
            None
        } else {
            container_open_re().captures(line)
        };

        let Some(caps) = opener else {
            plain.push(line);
            i += 1;
            continue;
        };

        let Some(close) = find_close(&lines, i + 1) else {
            // Unterminated: keep the opener as literal text.
            plain.push(line);
            i += 1;
            continue;
        };

        if !plain.is_empty() {
            regions.push(Region::Markdown(plain.join("\n")));
            plain.clear();
        }
        let attributes = caps
            .get(2)
            .map(|m| {
                let inner = m.as_str();
                parse_attributes(&inner[1..inner.len() - 1])
            })
            .unwrap_or_default();
        regions.push(Region::Container {
            name: caps[1].to_string(),
            attributes,
            body: lines[i + 1..close].join("\n"),
        });
        i = close + 1;
    }

    if !plain.is_empty() {
        regions.push(Region::Markdown(plain.join("\n")));
    }
    regions
}

/// Find the matching `:::` close for an opener, honoring nesting and fences.
fn find_close(lines: &[&str], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_fence = false;
    for (offset, line) in lines[from..].iter().enumerate() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if container_open_re().is_match(line) {
            depth += 1;
        } else if is_container_close(line) {
            if depth == 0 {
                return Some(from + offset);
            }
            depth -= 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_preserve_order() {
        let attrs = parse_attributes(r#"src="https://example.com" title="My Page""#);
        assert_eq!(
            attrs,
            vec![
                ("src".to_string(), "https://example.com".to_string()),
                ("title".to_string(), "My Page".to_string()),
            ]
        );
    }

    #[test]
    fn test_attributes_tolerate_missing_quotes() {
        let attrs = parse_attributes("src=https://example.com title=\"My Page\"");
        assert_eq!(attrs[0].1, "https://example.com");
        assert_eq!(attrs[1].1, "My Page");
    }

    #[test]
    fn test_leaf_scan() {
        let nodes = scan_leaf_directives(r#"see :embed{src="https://example.com"} here"#).unwrap();
        assert_eq!(nodes.len(), 3);
        match &nodes[1] {
            Node::LeafDirective(d) => {
                assert_eq!(d.name, "embed");
                assert_eq!(d.attributes[0].0, "src");
            }
            other => panic!("expected leaf directive, got {:?}", other),
        }
    }

    #[test]
    fn test_leaf_scan_stitches_across_autolinks() {
        // The Markdown parser splits a URL-valued attribute into a Link
        // node between two text fragments.
        let para = Node::Paragraph(mdast::Paragraph {
            children: vec![
                Node::text(":embed{src=\""),
                Node::Link(mdast::Link {
                    url: "https://example.com".into(),
                    title: None,
                    children: vec![Node::text("https://example.com")],
                }),
                Node::text("\" title=\"My Page\"}"),
            ],
        });
        let Node::Paragraph(p) = rewrite_leaf_directives(para) else {
            panic!("expected paragraph");
        };
        assert_eq!(p.children.len(), 1);
        match &p.children[0] {
            Node::LeafDirective(d) => {
                assert_eq!(d.name, "embed");
                assert_eq!(
                    d.attributes,
                    vec![
                        ("src".to_string(), "https://example.com".to_string()),
                        ("title".to_string(), "My Page".to_string()),
                    ]
                );
            }
            other => panic!("expected leaf directive, got {:?}", other),
        }
    }

    #[test]
    fn test_stitch_keeps_unrelated_links() {
        // A link before the opener is not part of the directive span.
        let para = Node::Paragraph(mdast::Paragraph {
            children: vec![
                Node::Link(mdast::Link {
                    url: "https://example.com".into(),
                    title: None,
                    children: vec![Node::text("docs")],
                }),
                Node::text(" then :embed{src=\""),
                Node::Link(mdast::Link {
                    url: "https://example.com/v".into(),
                    title: None,
                    children: vec![Node::text("https://example.com/v")],
                }),
                Node::text("\"}"),
            ],
        });
        let Node::Paragraph(p) = rewrite_leaf_directives(para) else {
            panic!("expected paragraph");
        };
        assert_eq!(p.children.len(), 3);
        assert!(matches!(&p.children[0], Node::Link(_)));
        assert_eq!(p.children[1], Node::text(" then "));
        assert!(matches!(&p.children[2], Node::LeafDirective(_)));
    }

    #[test]
    fn test_leaf_scan_skips_urls() {
        assert!(scan_leaf_directives("https://example.com{x}").is_none());
        assert!(scan_leaf_directives("plain text").is_none());
    }

    #[test]
    fn test_split_regions_basic() {
        let regions = split_regions("before\n\n:::details{summary=\"More\"}\ninner\n:::\n\nafter");
        assert_eq!(regions.len(), 3);
        match &regions[1] {
            Region::Container { name, attributes, body } => {
                assert_eq!(name, "details");
                assert_eq!(attributes[0], ("summary".to_string(), "More".to_string()));
                assert_eq!(body, "inner");
            }
            _ => panic!("expected container region"),
        }
    }

    #[test]
    fn test_unterminated_container_stays_literal() {
        let regions = split_regions(":::details\nno close");
        assert_eq!(regions.len(), 1);
        assert!(matches!(&regions[0], Region::Markdown(text) if text.contains(":::details")));
    }

    #[test]
    fn test_fenced_code_not_a_directive() {
        let regions = split_regions("```\n:::details\n:::\n```");
        assert_eq!(regions.len(), 1);
        assert!(matches!(regions[0], Region::Markdown(_)));
    }

    #[test]
    fn test_nested_containers() {
        let regions = split_regions(":::outer\n:::inner\nx\n:::\n:::");
        assert_eq!(regions.len(), 1);
        match &regions[0] {
            Region::Container { name, body, .. } => {
                assert_eq!(name, "outer");
                assert_eq!(body, ":::inner\nx\n:::");
            }
            _ => panic!("expected container region"),
        }
    }
}
