use serde::Serialize;

use super::Attrs;

/// An inline annotation attached to a run of text (bold, link, highlight, …).
///
/// Marks are immutable values with set semantics per text run: a given type
/// appears at most once in a set. "Adding" or "removing" a mark from a set
/// produces a new set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

impl Mark {
    pub fn new(type_name: impl Into<String>) -> Mark {
        Mark {
            type_name: type_name.into(),
            attrs: Attrs::new(),
        }
    }

    /// Whether a mark of this type is in the given set.
    pub fn is_in_set(&self, set: &[Mark]) -> bool {
        set.iter().any(|m| m.type_name == self.type_name)
    }

    /// A new set with this mark added, replacing any existing mark of the
    /// same type.
    pub fn add_to_set(&self, set: &[Mark]) -> Vec<Mark> {
        let mut out: Vec<Mark> = set
            .iter()
            .filter(|m| m.type_name != self.type_name)
            .cloned()
            .collect();
        out.push(self.clone());
        out
    }

    /// A new set with all marks of this type removed.
    pub fn remove_from_set(&self, set: &[Mark]) -> Vec<Mark> {
        set.iter()
            .filter(|m| m.type_name != self.type_name)
            .cloned()
            .collect()
    }

    /// String attribute accessor.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(|v| v.as_str())
    }
}

/// Set equality: same members regardless of storage order.
pub fn mark_set_eq(a: &[Mark], b: &[Mark]) -> bool {
    a.len() == b.len() && a.iter().all(|m| b.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_replaces_same_type() {
        let mut link = Mark::new("link");
        link.attrs.insert("href".into(), "https://a.example".into());
        let mut other = Mark::new("link");
        other.attrs.insert("href".into(), "https://b.example".into());

        let set = link.add_to_set(&[]);
        let set = other.add_to_set(&set);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].attr_str("href"), Some("https://b.example"));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let bold = Mark::new("bold");
        let italic = Mark::new("italic");
        let a = vec![bold.clone(), italic.clone()];
        let b = vec![italic, bold];
        assert!(mark_set_eq(&a, &b));
        assert!(!mark_set_eq(&a, &[]));
    }

    #[test]
    fn test_remove_from_set() {
        let bold = Mark::new("bold");
        let set = bold.add_to_set(&[]);
        assert!(bold.remove_from_set(&set).is_empty());
    }
}
