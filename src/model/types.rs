use super::{Mark, Node};

/// Attribute map: name → scalar or structured value, encounter order
/// preserved.
pub type Attrs = serde_json::Map<String, serde_json::Value>;

/// What a node type's `content` may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSpec {
    /// No children (leaf / atom types).
    Empty,
    /// Text leaves only (`text*`).
    Text,
    /// Inline content (text and inline atoms).
    Inline,
    /// Zero or more block children (`block*`).
    Blocks,
    /// One or more block children (`block+`); an empty paragraph is filled
    /// in when none are supplied.
    BlocksRequired,
}

/// Descriptor for a document node type: name, content expression, defaults.
#[derive(Debug, Clone)]
pub struct NodeType {
    pub name: &'static str,
    pub content: ContentSpec,
    pub defaults: Attrs,
    pub inline: bool,
}

impl NodeType {
    pub fn new(name: &'static str, content: ContentSpec) -> NodeType {
        NodeType {
            name,
            content,
            defaults: Attrs::new(),
            inline: false,
        }
    }

    pub fn inline(mut self) -> NodeType {
        self.inline = true;
        self
    }

    pub fn with_default(mut self, key: &str, value: impl Into<serde_json::Value>) -> NodeType {
        self.defaults.insert(key.to_string(), value.into());
        self
    }

    /// The fill/validate primitive: construct a node from attrs + content +
    /// marks, applying defaults and filling required-but-missing children.
    ///
    /// Returns `None` when the combination cannot be validated; callers treat
    /// that as "nothing produced", not an error.
    pub fn create(&self, attrs: Attrs, content: Vec<Node>, marks: Vec<Mark>) -> Option<Node> {
        let mut merged = self.defaults.clone();
        for (key, value) in attrs {
            merged.insert(key, value);
        }

        let content = match self.content {
            ContentSpec::Empty => {
                if !content.is_empty() {
                    return None;
                }
                content
            }
            ContentSpec::Text => {
                if content.iter().any(|child| !child.is_text()) {
                    return None;
                }
                content
            }
            ContentSpec::Inline | ContentSpec::Blocks => content,
            ContentSpec::BlocksRequired => {
                if content.is_empty() {
                    vec![Node::new("paragraph")]
                } else {
                    content
                }
            }
        };

        Some(Node {
            type_name: self.name.to_string(),
            attrs: merged,
            content,
            marks,
            text: None,
        })
    }
}

/// Descriptor for a mark type.
#[derive(Debug, Clone)]
pub struct MarkType {
    pub name: &'static str,
    pub defaults: Attrs,
}

impl MarkType {
    pub fn new(name: &'static str) -> MarkType {
        MarkType {
            name,
            defaults: Attrs::new(),
        }
    }

    pub fn with_default(mut self, key: &str, value: impl Into<serde_json::Value>) -> MarkType {
        self.defaults.insert(key.to_string(), value.into());
        self
    }

    pub fn create(&self, attrs: Attrs) -> Mark {
        let mut merged = self.defaults.clone();
        for (key, value) in attrs {
            merged.insert(key, value);
        }
        Mark {
            type_name: self.name.to_string(),
            attrs: merged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_applies_defaults() {
        let ty = NodeType::new("heading", ContentSpec::Inline).with_default("level", 1u64);
        let node = ty.create(Attrs::new(), vec![], vec![]).unwrap();
        assert_eq!(node.attr_u64("level"), Some(1));

        let mut attrs = Attrs::new();
        attrs.insert("level".into(), 3u64.into());
        let node = ty.create(attrs, vec![], vec![]).unwrap();
        assert_eq!(node.attr_u64("level"), Some(3));
    }

    #[test]
    fn test_required_blocks_filled() {
        let ty = NodeType::new("doc", ContentSpec::BlocksRequired);
        let node = ty.create(Attrs::new(), vec![], vec![]).unwrap();
        assert_eq!(node.content.len(), 1);
        assert_eq!(node.content[0].type_name, "paragraph");
    }

    #[test]
    fn test_empty_rejects_children() {
        let ty = NodeType::new("horizontal_rule", ContentSpec::Empty);
        assert!(ty
            .create(Attrs::new(), vec![Node::new("paragraph")], vec![])
            .is_none());
    }

    #[test]
    fn test_text_content_rejects_blocks() {
        let ty = NodeType::new("code_block", ContentSpec::Text);
        assert!(ty
            .create(Attrs::new(), vec![Node::new("paragraph")], vec![])
            .is_none());
        assert!(ty
            .create(Attrs::new(), vec![Node::text("fn main() {}", vec![])], vec![])
            .is_some());
    }
}
