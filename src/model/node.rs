use serde::Serialize;

use super::{Attrs, Mark};

/// The well-known name of the text leaf type.
pub(crate) const TEXT_TYPE: &str = "text";

/// One node in the document tree.
///
/// Immutable value tree: replacing a subtree replaces that branch, nothing is
/// mutated in place. Text leaves carry `text` and an optional mark set; all
/// other types carry `content`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Node {
    /// Create a node with the given type and no attrs, content, or marks.
    pub fn new(type_name: impl Into<String>) -> Node {
        Node {
            type_name: type_name.into(),
            attrs: Attrs::new(),
            content: Vec::new(),
            marks: Vec::new(),
            text: None,
        }
    }

    /// Create a text leaf carrying the given mark set.
    pub fn text(value: impl Into<String>, marks: Vec<Mark>) -> Node {
        Node {
            type_name: TEXT_TYPE.into(),
            attrs: Attrs::new(),
            content: Vec::new(),
            marks,
            text: Some(value.into()),
        }
    }

    pub fn is_text(&self) -> bool {
        self.type_name == TEXT_TYPE
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.content {
            child.collect_text(out);
        }
    }

    /// String attribute accessor.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(|v| v.as_str())
    }

    /// Integer attribute accessor.
    pub fn attr_u64(&self, key: &str) -> Option<u64> {
        self.attrs.get(key).and_then(|v| v.as_u64())
    }

    /// Boolean attribute accessor.
    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        self.attrs.get(key).and_then(|v| v.as_bool())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_recurses() {
        let mut para = Node::new("paragraph");
        para.content.push(Node::text("item ", vec![]));
        para.content.push(Node::text("1", vec![]));
        let mut doc = Node::new("doc");
        doc.content.push(para);
        assert_eq!(doc.text_content(), "item 1");
    }

    #[test]
    fn test_attr_accessors() {
        let mut node = Node::new("heading");
        node.attrs.insert("level".into(), 2u64.into());
        node.attrs.insert("id".into(), "intro".into());
        assert_eq!(node.attr_u64("level"), Some(2));
        assert_eq!(node.attr_str("id"), Some("intro"));
        assert_eq!(node.attr_str("missing"), None);
    }
}
