// Markdown AST processor.
//
// Turns Markdown source into this crate's AST and back:
//   parse:     directive region scan → CommonMark+GFM+math parse → own AST
//              → leaf directive scan
//   run:       registered AST-transform extensions (decorations, …)
//   stringify: AST → Markdown text, consulting the decoration table
//
// Syntax extensions are gathered from all registered node/mark types in an
// explicit build step (`SyntaxBuilder`), then the finished processor is
// handed to both conversion directions. Nothing is registered on a shared
// singleton.

pub(crate) mod decoration;
pub(crate) mod directive;
mod from_raw;
pub mod wrap;

use std::collections::HashSet;

use crate::error::ConvertError;
use crate::mdast::{self, Node};
use crate::stringify::{self, StringifyOptions};

pub use decoration::DecorationSyntax;

/// When an extension's transform runs relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BeforeInit,
    AfterInit,
}

/// An AST-rewriting extension applied by [`MarkdownProcessor::run`].
pub type TreeTransform = Box<dyn Fn(Node) -> Node + Send + Sync>;

/// Collects syntax contributions from node/mark implementations before the
/// processor is built.
#[derive(Default)]
pub struct SyntaxBuilder {
    decorations: Vec<DecorationSyntax>,
    raw_containers: Vec<String>,
    before_init: Vec<TreeTransform>,
    after_init: Vec<TreeTransform>,
}

impl SyntaxBuilder {
    pub fn new() -> SyntaxBuilder {
        SyntaxBuilder::default()
    }

    /// Register a flagged decoration syntax (see [`DecorationSyntax`]).
    /// Adds both the parse-side text scanner and the print-side table entry.
    pub fn decoration(&mut self, name: &str, marker: &str, allow_flags: bool) {
        let syntax = DecorationSyntax::new(name, marker, allow_flags);
        let scanner = syntax.clone();
        self.before_init.push(Box::new(move |tree| {
            rewrite_text_nodes(tree, &|value| scanner.scan(value))
        }));
        self.decorations.push(syntax);
    }

    /// Mark a container directive name as raw: its body is kept verbatim
    /// instead of being parsed as Markdown.
    pub fn raw_container(&mut self, name: &str) {
        self.raw_containers.push(name.to_string());
    }

    /// Register a custom AST transform.
    pub fn transform(&mut self, phase: Phase, f: TreeTransform) {
        match phase {
            Phase::BeforeInit => self.before_init.push(f),
            Phase::AfterInit => self.after_init.push(f),
        }
    }

    pub(crate) fn build(self, options: StringifyOptions) -> MarkdownProcessor {
        MarkdownProcessor {
            decorations: self.decorations,
            raw_containers: self.raw_containers.into_iter().collect(),
            before_init: self.before_init,
            after_init: self.after_init,
            options,
        }
    }
}

/// The assembled Markdown text ⇄ AST processor.
pub struct MarkdownProcessor {
    decorations: Vec<DecorationSyntax>,
    raw_containers: HashSet<String>,
    before_init: Vec<TreeTransform>,
    after_init: Vec<TreeTransform>,
    options: StringifyOptions,
}

impl MarkdownProcessor {
    /// Parse Markdown source into a raw AST (before `run` transforms).
    pub fn parse(&self, text: &str) -> Result<Node, ConvertError> {
        let mut children = Vec::new();
        for region in directive::split_regions(text) {
            match region {
                directive::Region::Markdown(source) => {
                    let ast = markdown::to_mdast(&source, &parse_options())
                        .map_err(|e| ConvertError::Parse(e.to_string()))?;
                    children.extend(from_raw::convert_root(ast));
                }
                directive::Region::Container {
                    name,
                    attributes,
                    body,
                } => {
                    let (value, inner) = if self.raw_containers.contains(&name) {
                        (Some(body), Vec::new())
                    } else {
                        let Node::Root(root) = self.parse(&body)? else {
                            unreachable!("parse always yields a root");
                        };
                        (None, root.children)
                    };
                    children.push(Node::ContainerDirective(mdast::ContainerDirective {
                        name,
                        attributes,
                        children: inner,
                        value,
                    }));
                }
            }
        }
        let tree = Node::Root(mdast::Root { children });
        // Leaf directives are part of the base grammar, not an extension.
        Ok(directive::rewrite_leaf_directives(tree))
    }

    /// Apply registered AST-transform extensions, `BeforeInit` phase first,
    /// insertion order within each phase.
    pub fn run(&self, tree: Node) -> Node {
        let tree = self.before_init.iter().fold(tree, |t, f| f(t));
        self.after_init.iter().fold(tree, |t, f| f(t))
    }

    /// Print an AST back to Markdown text.
    pub fn stringify(&self, tree: &Node) -> String {
        stringify::stringify(tree, &self.options, &self.decorations)
    }
}

fn parse_options() -> markdown::ParseOptions {
    let mut options = markdown::ParseOptions::gfm();
    options.constructs.math_flow = true;
    options.constructs.math_text = true;
    // `~single~` is reserved for the subscript decoration.
    options.gfm_strikethrough_single_tilde = false;
    options
}

/// Walk a tree, replacing text nodes by whatever `f` splits them into.
/// `f` returning `None` leaves the node untouched.
pub(crate) fn rewrite_text_nodes(
    mut node: Node,
    f: &dyn Fn(&str) -> Option<Vec<Node>>,
) -> Node {
    if let Some(children) = node.children_mut() {
        let old = std::mem::take(children);
        for child in old {
            match child {
                Node::Text(text) => match f(&text.value) {
                    Some(replacement) => children.extend(replacement),
                    None => children.push(Node::Text(text)),
                },
                other => children.push(rewrite_text_nodes(other, f)),
            }
        }
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> MarkdownProcessor {
        let mut syntax = SyntaxBuilder::new();
        syntax.decoration("highlight", "==", true);
        syntax.raw_container("diagram");
        syntax.build(StringifyOptions::default())
    }

    #[test]
    fn test_parse_heading_and_paragraph() {
        let tree = processor().parse("# Title\n\nBody text.").unwrap();
        let Node::Root(root) = tree else { unreachable!() };
        assert!(matches!(&root.children[0], Node::Heading(h) if h.depth == 1));
        assert!(matches!(&root.children[1], Node::Paragraph(_)));
    }

    #[test]
    fn test_run_applies_decoration_extension() {
        let p = processor();
        let tree = p.parse("a ==b== c").unwrap();
        let tree = p.run(tree);
        let Node::Root(root) = tree else { unreachable!() };
        let Node::Paragraph(para) = &root.children[0] else {
            panic!("expected paragraph");
        };
        assert!(para
            .children
            .iter()
            .any(|c| matches!(c, Node::Decoration(d) if d.name == "highlight")));
    }

    #[test]
    fn test_container_directive_parsed_recursively() {
        let tree = processor()
            .parse(":::details{summary=\"More\"}\nSome **bold** inside.\n:::")
            .unwrap();
        let Node::Root(root) = tree else { unreachable!() };
        let Node::ContainerDirective(dir) = &root.children[0] else {
            panic!("expected container directive");
        };
        assert_eq!(dir.name, "details");
        assert!(dir.value.is_none());
        assert!(matches!(&dir.children[0], Node::Paragraph(_)));
    }

    #[test]
    fn test_raw_container_keeps_body_verbatim() {
        let tree = processor()
            .parse(":::diagram{type=\"mermaid\"}\ngraph TD; A-->B;\n:::")
            .unwrap();
        let Node::Root(root) = tree else { unreachable!() };
        let Node::ContainerDirective(dir) = &root.children[0] else {
            panic!("expected container directive");
        };
        assert_eq!(dir.value.as_deref(), Some("graph TD; A-->B;"));
        assert!(dir.children.is_empty());
    }

    #[test]
    fn test_leaf_directive_with_url_attribute() {
        // The URL becomes an autolink-literal Link mid-directive; the scan
        // must still see one directive.
        let tree = processor()
            .parse(":embed{src=\"https://example.com\" title=\"My Page\"}")
            .unwrap();
        let Node::Root(root) = tree else { unreachable!() };
        let Node::Paragraph(para) = &root.children[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(para.children.len(), 1);
        let Node::LeafDirective(dir) = &para.children[0] else {
            panic!("expected leaf directive, got {:?}", para.children[0]);
        };
        assert_eq!(dir.attributes.len(), 2);
        assert_eq!(dir.attributes[0], ("src".into(), "https://example.com".into()));
        assert_eq!(dir.attributes[1], ("title".into(), "My Page".into()));
    }

    #[test]
    fn test_leaf_directive_in_base_grammar() {
        let tree = processor().parse(":embed{src=\"https://example.com\"}").unwrap();
        let Node::Root(root) = tree else { unreachable!() };
        let Node::Paragraph(para) = &root.children[0] else {
            panic!("expected paragraph");
        };
        assert!(matches!(&para.children[0], Node::LeafDirective(d) if d.name == "embed"));
    }
}
