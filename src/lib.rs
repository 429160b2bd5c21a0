// Bidirectional Markdown ⇄ document tree conversion engine.
//
// A registry of node and mark types drives both directions: parsing builds
// the typed document tree from Markdown (CommonMark + GFM + directives +
// decorations), serializing prints the tree back. `Editor` bundles a
// registry with a current document for hosts that hold one document at a
// time.

pub mod error;
pub mod mdast;
pub mod model;
pub mod parser;
pub mod processor;
pub mod registry;
pub mod serializer;
pub mod stringify;

pub mod marks;
pub mod nodes;

use std::sync::OnceLock;

use regex::Regex;

pub use error::ConvertError;
pub use model::{Attrs, ContentSpec, Mark, MarkType, Node, NodeType};
pub use parser::ParserState;
pub use processor::{MarkdownProcessor, Phase, SyntaxBuilder};
pub use registry::{MarkSpec, NodeSpec, Registry, RegistryBuilder};
pub use serializer::SerializerState;
pub use stringify::StringifyOptions;

/// Parse Markdown with the default type palette.
pub fn parse(text: &str) -> Result<Node, ConvertError> {
    let registry = Registry::with_defaults();
    ParserState::new(&registry).parse(text)
}

/// Serialize a document with the default type palette.
pub fn serialize(doc: &Node) -> String {
    let registry = Registry::with_defaults();
    SerializerState::new(&registry).serialize(doc)
}

/// Callback invoked when the editor's document is replaced.
pub type ChangeHook = Box<dyn Fn(&Node) + Send + Sync>;

/// A registry paired with a current document.
pub struct Editor {
    registry: Registry,
    doc: Node,
    on_change: Option<ChangeHook>,
}

impl Editor {
    /// An editor over the default type palette, holding an empty document.
    pub fn new() -> Editor {
        Editor::with_registry(Registry::with_defaults())
    }

    pub fn with_registry(registry: Registry) -> Editor {
        let doc = empty_doc(&registry);
        Editor {
            registry,
            doc,
            on_change: None,
        }
    }

    /// The current document as Markdown.
    pub fn get(&self) -> String {
        SerializerState::new(&self.registry).serialize(&self.doc)
    }

    /// Replace the document by parsing `text`. `emit_change` controls
    /// whether the change hook fires; hosts echoing their own edits back
    /// pass `false` to avoid feedback loops.
    pub fn set(&mut self, text: &str, emit_change: bool) -> Result<(), ConvertError> {
        self.doc = ParserState::new(&self.registry).parse(text)?;
        if emit_change {
            if let Some(hook) = &self.on_change {
                hook(&self.doc);
            }
        }
        Ok(())
    }

    pub fn document(&self) -> &Node {
        &self.doc
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn on_change(&mut self, hook: ChangeHook) {
        self.on_change = Some(hook);
    }

    /// Serialize an arbitrary subtree, e.g. a selection, with this editor's
    /// registry.
    pub fn serialize_fragment(&self, node: &Node) -> String {
        SerializerState::new(&self.registry).serialize(node)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}

fn empty_doc(registry: &Registry) -> Node {
    registry
        .node_type("doc")
        .and_then(|ty| ty.create(Attrs::new(), vec![], vec![]))
        .unwrap_or_else(|| Node::new("doc"))
}

/// Cheap heuristic for "is this pasted text Markdown?". Looks for fenced
/// code, inline links, ATX headings, or more than one list-marker line.
/// False negatives are fine; hosts use this to decide between parsing and
/// inserting plain text.
pub fn looks_like_markdown(text: &str) -> bool {
    static LINK: OnceLock<Regex> = OnceLock::new();
    static HEADING: OnceLock<Regex> = OnceLock::new();
    static LIST_LINE: OnceLock<Regex> = OnceLock::new();

    if text.contains("```") {
        return true;
    }

    let link = LINK.get_or_init(|| Regex::new(r"\[[^\]]+\]\([^)]+\)").unwrap());
    if link.is_match(text) {
        return true;
    }

    let heading = HEADING.get_or_init(|| Regex::new(r"(?m)^#{1,6} \S").unwrap());
    if heading.is_match(text) {
        return true;
    }

    let list_line = LIST_LINE.get_or_init(|| Regex::new(r"(?m)^\s*(?:[-*+]|\d+[.)]) \S").unwrap());
    list_line.find_iter(text).take(2).count() > 1
}
