// Node and mark type registry.
//
// Every document node and mark type is one trait object pairing a schema
// descriptor with its parse and serialize rules. The registry owns the
// registration list and the syntax processor built from it; conversion
// dispatch is a linear scan in registration order, first match wins.
// Registration order therefore matters where match predicates overlap
// (task items register before plain list items).

use crate::mdast;
use crate::model::{Mark, MarkType, Node, NodeType};
use crate::parser::ParserState;
use crate::processor::{MarkdownProcessor, SyntaxBuilder};
use crate::serializer::SerializerState;
use crate::stringify::StringifyOptions;

/// A document node type: schema descriptor plus conversion rules.
pub trait NodeSpec: Send + Sync {
    /// Schema name, unique within a registry.
    fn name(&self) -> &'static str;

    /// Schema descriptor (content expression, attribute defaults).
    fn node_type(&self) -> NodeType;

    /// Contribute syntax extensions (decorations, raw containers, AST
    /// transforms) to the processor.
    fn register_syntax(&self, _syntax: &mut SyntaxBuilder) {}

    /// Rewrite Markdown source before it is parsed.
    fn before_parse(&self, text: String) -> String {
        text
    }

    /// Rewrite the Markdown AST after parsing, before rule dispatch.
    fn after_parse(&self, tree: mdast::Node) -> mdast::Node {
        tree
    }

    /// Rewrite the Markdown AST after rule dispatch, before printing.
    fn before_serialize(&self, tree: mdast::Node) -> mdast::Node {
        tree
    }

    /// Whether this type's parse rule handles the given Markdown node.
    fn match_parse(&self, node: &mdast::Node) -> bool;

    /// Convert a matched Markdown node via the state's stack primitives.
    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType);

    /// Whether this type's serialize rule handles the given tree node.
    fn match_serialize(&self, node: &Node) -> bool {
        node.type_name == self.name()
    }

    /// Convert a matched tree node via the state's stack primitives.
    fn serialize_apply(&self, state: &mut SerializerState, node: &Node);
}

/// A mark type: schema descriptor plus conversion rules.
pub trait MarkSpec: Send + Sync {
    fn name(&self) -> &'static str;

    fn mark_type(&self) -> MarkType;

    fn register_syntax(&self, _syntax: &mut SyntaxBuilder) {}

    /// Rewrite Markdown source before it is parsed.
    fn before_parse(&self, text: String) -> String {
        text
    }

    /// Rewrite the Markdown AST after parsing, before rule dispatch.
    fn after_parse(&self, tree: mdast::Node) -> mdast::Node {
        tree
    }

    /// Rewrite the Markdown AST after rule dispatch, before printing.
    fn before_serialize(&self, tree: mdast::Node) -> mdast::Node {
        tree
    }

    /// Whether this type's parse rule handles the given Markdown node.
    fn match_parse(&self, node: &mdast::Node) -> bool;

    /// Convert a matched Markdown node via the state's stack primitives.
    /// Typically opens the mark, descends, and closes it again.
    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &MarkType);

    /// Whether this type's serialize rule handles the given mark.
    fn match_serialize(&self, mark: &Mark) -> bool {
        mark.type_name == self.name()
    }

    /// Serialize a mark found on `node`. Runs before the node's own rule;
    /// returning `true` means the mark rule consumed the node and the node
    /// rule must not run (inline code swallows its text this way).
    fn serialize_apply(&self, state: &mut SerializerState, mark: &Mark, node: &Node) -> bool;
}

/// Assembles a [`Registry`] from node and mark registrations.
pub struct RegistryBuilder {
    nodes: Vec<Box<dyn NodeSpec>>,
    marks: Vec<Box<dyn MarkSpec>>,
    options: StringifyOptions,
}

impl RegistryBuilder {
    pub fn new() -> RegistryBuilder {
        RegistryBuilder {
            nodes: Vec::new(),
            marks: Vec::new(),
            options: StringifyOptions::default(),
        }
    }

    pub fn node(mut self, spec: impl NodeSpec + 'static) -> Self {
        self.nodes.push(Box::new(spec));
        self
    }

    pub fn mark(mut self, spec: impl MarkSpec + 'static) -> Self {
        self.marks.push(Box::new(spec));
        self
    }

    pub fn options(mut self, options: StringifyOptions) -> Self {
        self.options = options;
        self
    }

    /// Gather syntax contributions from every registration and build the
    /// processor. Nothing is shared between registries built separately.
    pub fn build(self) -> Registry {
        let mut syntax = SyntaxBuilder::new();
        for spec in &self.nodes {
            spec.register_syntax(&mut syntax);
        }
        for spec in &self.marks {
            spec.register_syntax(&mut syntax);
        }
        let processor = syntax.build(self.options);

        let nodes = self
            .nodes
            .into_iter()
            .map(|spec| {
                let ty = spec.node_type();
                (spec, ty)
            })
            .collect();
        let marks = self
            .marks
            .into_iter()
            .map(|spec| {
                let ty = spec.mark_type();
                (spec, ty)
            })
            .collect();

        Registry {
            nodes,
            marks,
            processor,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        RegistryBuilder::new()
    }
}

/// The built type registry shared by both conversion directions.
pub struct Registry {
    nodes: Vec<(Box<dyn NodeSpec>, NodeType)>,
    marks: Vec<(Box<dyn MarkSpec>, MarkType)>,
    processor: MarkdownProcessor,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry with the full built-in node and mark palette.
    pub fn with_defaults() -> Registry {
        Self::builder_with_defaults().build()
    }

    /// The built-in palette as a builder, for callers that add their own
    /// types or options on top.
    pub fn builder_with_defaults() -> RegistryBuilder {
        use crate::marks;
        use crate::nodes;

        RegistryBuilder::new()
            .node(nodes::Doc)
            .node(nodes::Paragraph)
            .node(nodes::Text)
            .node(nodes::Heading)
            .node(nodes::Blockquote)
            .node(nodes::CodeBlock)
            .node(nodes::MathBlock)
            .node(nodes::MathInline)
            .node(nodes::HorizontalRule)
            .node(nodes::HardBreak)
            .node(nodes::Image)
            .node(nodes::BulletList)
            .node(nodes::OrderedList)
            // Task items must precede plain list items: both match ListItem
            // and the task predicate is the narrower one.
            .node(nodes::TaskItem)
            .node(nodes::ListItem)
            .node(nodes::Table)
            .node(nodes::TableRow)
            .node(nodes::TableCell)
            .node(nodes::Details)
            .node(nodes::Diagram)
            .node(nodes::Embed)
            .node(nodes::HtmlBlock)
            .mark(marks::Bold)
            .mark(marks::Italic)
            .mark(marks::Code)
            .mark(marks::Strike)
            .mark(marks::Link)
            .mark(marks::Highlight)
            .mark(marks::Underline)
            .mark(marks::Subscript)
            .mark(marks::Superscript)
    }

    /// Look up a node type descriptor by schema name.
    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.nodes
            .iter()
            .find(|(spec, _)| spec.name() == name)
            .map(|(_, ty)| ty)
    }

    /// Look up a mark type descriptor by schema name.
    pub fn mark_type(&self, name: &str) -> Option<&MarkType> {
        self.marks
            .iter()
            .find(|(spec, _)| spec.name() == name)
            .map(|(_, ty)| ty)
    }

    pub(crate) fn node_specs(&self) -> &[(Box<dyn NodeSpec>, NodeType)] {
        &self.nodes
    }

    pub(crate) fn mark_specs(&self) -> &[(Box<dyn MarkSpec>, MarkType)] {
        &self.marks
    }

    pub(crate) fn processor(&self) -> &MarkdownProcessor {
        &self.processor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_register_known_types() {
        let registry = Registry::with_defaults();
        assert!(registry.node_type("doc").is_some());
        assert!(registry.node_type("paragraph").is_some());
        assert!(registry.node_type("task_item").is_some());
        assert!(registry.mark_type("bold").is_some());
        assert!(registry.mark_type("highlight").is_some());
        assert!(registry.node_type("nonexistent").is_none());
    }

    struct ShoutMark;

    impl MarkSpec for ShoutMark {
        fn name(&self) -> &'static str {
            "shout"
        }

        fn mark_type(&self) -> MarkType {
            MarkType::new("shout")
        }

        fn before_parse(&self, text: String) -> String {
            text.replace("!!", "**")
        }

        fn match_parse(&self, _node: &mdast::Node) -> bool {
            false
        }

        fn parse_apply(&self, _state: &mut ParserState, _node: &mdast::Node, _ty: &MarkType) {}

        fn serialize_apply(&self, _state: &mut SerializerState, _mark: &Mark, _node: &Node) -> bool {
            false
        }
    }

    #[test]
    fn test_mark_spec_source_hook_runs() {
        let registry = Registry::builder_with_defaults().mark(ShoutMark).build();
        let doc = ParserState::new(&registry).parse("a !!b!!").unwrap();
        let para = &doc.content[0];
        let shouted = para
            .content
            .iter()
            .find(|n| n.text.as_deref() == Some("b"))
            .expect("rewritten span present");
        assert_eq!(shouted.marks[0].type_name, "bold");
    }

    #[test]
    fn test_task_item_registered_before_list_item() {
        let registry = Registry::with_defaults();
        let task = registry
            .node_specs()
            .iter()
            .position(|(spec, _)| spec.name() == "task_item");
        let item = registry
            .node_specs()
            .iter()
            .position(|(spec, _)| spec.name() == "list_item");
        assert!(task < item);
    }
}
