// MDAST node types — based on https://github.com/syntax-tree/mdast
//
// The Markdown abstract syntax tree this engine parses into and prints from.
// Core CommonMark + GFM shapes plus the custom constructs the directive and
// decoration syntax layers produce (`LeafDirective`, `ContainerDirective`,
// `Decoration`). Parent nodes own their children; leaf nodes hold a `value`.
//
// These trees live only for the duration of one parse or one stringify call;
// the long-lived representation is the document tree in `model`.

/// Alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignKind {
    Left,
    Right,
    Center,
}

// ---------------------------------------------------------------------------
// Node structs
// ---------------------------------------------------------------------------

/// Document root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Root {
    pub children: Vec<Node>,
}

/// Block quote (`> ...`).
#[derive(Debug, Clone, PartialEq)]
pub struct Blockquote {
    pub children: Vec<Node>,
}

/// Fenced or indented code block.
#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub value: String,
    pub lang: Option<String>,
    pub meta: Option<String>,
}

/// ATX or setext heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub depth: u8, // 1–6
    pub children: Vec<Node>,
}

/// Raw HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct Html {
    pub value: String,
}

/// Ordered or unordered list.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u32>,
    pub spread: bool,
    pub children: Vec<Node>,
}

/// Item inside a list. `checked` is set for GFM task-list items.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub spread: bool,
    pub checked: Option<bool>,
    pub children: Vec<Node>,
}

/// Thematic break (`***`, `---`, `___`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThematicBreak;

/// Paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub children: Vec<Node>,
}

/// Plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
}

/// Emphasis (`*text*` or `_text_`).
#[derive(Debug, Clone, PartialEq)]
pub struct Emphasis {
    pub children: Vec<Node>,
}

/// Strong emphasis (`**text**` or `__text__`).
#[derive(Debug, Clone, PartialEq)]
pub struct Strong {
    pub children: Vec<Node>,
}

/// Inline code (`` `code` ``).
#[derive(Debug, Clone, PartialEq)]
pub struct InlineCode {
    pub value: String,
}

/// Hard line break (`\` or two spaces at end of line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Break;

/// Hyperlink (`[text](url "title")`).
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub children: Vec<Node>,
}

/// Image (`![alt](url "title")`).
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub url: String,
    pub title: Option<String>,
    pub alt: String,
}

// GFM extensions ---------------------------------------------------------

/// Strikethrough (`~~text~~`).
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub children: Vec<Node>,
}

/// GFM table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub align: Vec<Option<AlignKind>>,
    pub children: Vec<Node>, // TableRow
}

/// Row in a GFM table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub children: Vec<Node>, // TableCell
}

/// Cell in a GFM table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub children: Vec<Node>,
}

// Math -------------------------------------------------------------------

/// Math block (`$$ ... $$`).
#[derive(Debug, Clone, PartialEq)]
pub struct Math {
    pub value: String,
    pub meta: Option<String>,
}

/// Inline math (`$ ... $`).
#[derive(Debug, Clone, PartialEq)]
pub struct InlineMath {
    pub value: String,
}

// Custom syntax ----------------------------------------------------------

/// Generic flagged decoration (`==text==`, `==flag==text==flag==`, `+text+`).
///
/// Produced by the decoration syntax extensions registered on the processor;
/// `name` keys into the decoration table for printing, `flags` carries the
/// optional short tag between the opening delimiters.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub name: String,
    pub flags: Option<String>,
    pub children: Vec<Node>,
}

/// Inline leaf directive (`:name{key="value" ...}`).
#[derive(Debug, Clone, PartialEq)]
pub struct LeafDirective {
    pub name: String,
    /// Key/value pairs in encounter order.
    pub attributes: Vec<(String, String)>,
}

/// Container directive (`:::name{...}` ... `:::`).
///
/// `value` holds the verbatim body for names registered as raw containers
/// (diagram sources and the like); otherwise `children` holds parsed blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerDirective {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    pub value: Option<String>,
}

// ---------------------------------------------------------------------------
// Node enum
// ---------------------------------------------------------------------------

/// A node in the Markdown abstract syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Document
    Root(Root),

    // Flow (block) content
    Blockquote(Blockquote),
    Code(Code),
    Heading(Heading),
    Html(Html),
    List(List),
    ListItem(ListItem),
    ThematicBreak(ThematicBreak),
    Paragraph(Paragraph),
    Math(Math),
    ContainerDirective(ContainerDirective),

    // Phrasing (inline) content
    Break(Break),
    Delete(Delete),
    Emphasis(Emphasis),
    Image(Image),
    InlineCode(InlineCode),
    InlineMath(InlineMath),
    Link(Link),
    Strong(Strong),
    Text(Text),
    Decoration(Decoration),
    LeafDirective(LeafDirective),

    // Table (GFM)
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
}

impl Node {
    /// Returns a reference to this node's children, if it has any.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root(n) => Some(&n.children),
            Node::Blockquote(n) => Some(&n.children),
            Node::Heading(n) => Some(&n.children),
            Node::List(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::Emphasis(n) => Some(&n.children),
            Node::Strong(n) => Some(&n.children),
            Node::Delete(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::Table(n) => Some(&n.children),
            Node::TableRow(n) => Some(&n.children),
            Node::TableCell(n) => Some(&n.children),
            Node::Decoration(n) => Some(&n.children),
            Node::ContainerDirective(n) => Some(&n.children),
            _ => None,
        }
    }

    /// Returns a mutable reference to this node's children, if it has any.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(n) => Some(&mut n.children),
            Node::Blockquote(n) => Some(&mut n.children),
            Node::Heading(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Delete(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            Node::Table(n) => Some(&mut n.children),
            Node::TableRow(n) => Some(&mut n.children),
            Node::TableCell(n) => Some(&mut n.children),
            Node::Decoration(n) => Some(&mut n.children),
            Node::ContainerDirective(n) => Some(&mut n.children),
            _ => None,
        }
    }

    /// Whether this node is phrasing (inline) content.
    pub fn is_phrasing(&self) -> bool {
        matches!(
            self,
            Node::Break(_)
                | Node::Delete(_)
                | Node::Emphasis(_)
                | Node::Image(_)
                | Node::InlineCode(_)
                | Node::InlineMath(_)
                | Node::Link(_)
                | Node::Strong(_)
                | Node::Text(_)
                | Node::Decoration(_)
                | Node::LeafDirective(_)
        )
    }

    /// A short, stable name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Root(_) => "root",
            Node::Blockquote(_) => "blockquote",
            Node::Code(_) => "code",
            Node::Heading(_) => "heading",
            Node::Html(_) => "html",
            Node::List(_) => "list",
            Node::ListItem(_) => "listItem",
            Node::ThematicBreak(_) => "thematicBreak",
            Node::Paragraph(_) => "paragraph",
            Node::Math(_) => "math",
            Node::ContainerDirective(_) => "containerDirective",
            Node::Break(_) => "break",
            Node::Delete(_) => "delete",
            Node::Emphasis(_) => "emphasis",
            Node::Image(_) => "image",
            Node::InlineCode(_) => "inlineCode",
            Node::InlineMath(_) => "inlineMath",
            Node::Link(_) => "link",
            Node::Strong(_) => "strong",
            Node::Text(_) => "text",
            Node::Decoration(_) => "decoration",
            Node::LeafDirective(_) => "leafDirective",
            Node::Table(_) => "table",
            Node::TableRow(_) => "tableRow",
            Node::TableCell(_) => "tableCell",
        }
    }

    /// Convenience constructor for a text node.
    pub fn text(value: impl Into<String>) -> Node {
        Node::Text(Text { value: value.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_phrasing() {
        let node = Node::text("hello");
        assert!(node.is_phrasing());
    }

    #[test]
    fn test_container_directive_is_not_phrasing() {
        let node = Node::ContainerDirective(ContainerDirective {
            name: "details".into(),
            attributes: vec![],
            children: vec![],
            value: None,
        });
        assert!(!node.is_phrasing());
    }

    #[test]
    fn test_leaf_directive_is_phrasing() {
        let node = Node::LeafDirective(LeafDirective {
            name: "embed".into(),
            attributes: vec![("src".into(), "https://example.com".into())],
        });
        assert!(node.is_phrasing());
    }

    #[test]
    fn test_children_access() {
        let node = Node::Paragraph(Paragraph {
            children: vec![Node::text("hello")],
        });
        assert_eq!(node.children().unwrap().len(), 1);
    }

    #[test]
    fn test_leaf_has_no_children() {
        let node = Node::text("hello");
        assert!(node.children().is_none());
    }
}
