// Generic flagged decoration syntax (`==text==`, `==flag==text==flag==`,
// `+text+`).
//
// Each registered decoration contributes a text-node visitor that rewrites
// runs of inline text into {text, decoration} sequences based on a regex
// scan, plus the print form the stringifier consults. Malformed syntax is
// simply not matched and passes through as literal text.

use regex::Regex;

use crate::mdast::{self, Node};

/// A registered decoration: delimiter, flag policy, and compiled scanners.
#[derive(Debug, Clone)]
pub struct DecorationSyntax {
    pub name: String,
    pub marker: String,
    pub allow_flags: bool,
    re_plain: Regex,
    re_flagged: Option<Regex>,
}

/// Flag tags are short alphanumeric/hyphen strings (`v-red`, `v2`).
const FLAGS_PATTERN: &str = "[A-Za-z0-9][A-Za-z0-9-]{0,7}";

impl DecorationSyntax {
    pub fn new(name: &str, marker: &str, allow_flags: bool) -> DecorationSyntax {
        let m = regex::escape(marker);
        // Content must start and end with non-whitespace, lazily matched so
        // the first closing delimiter wins.
        let re_plain = Regex::new(&format!(r"{m}(\S(?:.*?\S)?){m}"))
            .expect("valid decoration pattern");
        let re_flagged = if allow_flags {
            Some(
                Regex::new(&format!(
                    r"{m}({FLAGS_PATTERN}){m}(\S(?:.*?\S)?){m}({FLAGS_PATTERN}){m}"
                ))
                .expect("valid flagged decoration pattern"),
            )
        } else {
            None
        };
        DecorationSyntax {
            name: name.to_string(),
            marker: marker.to_string(),
            allow_flags,
            re_plain,
            re_flagged,
        }
    }

    /// Split a run of text into `{Text, Decoration}` nodes.
    ///
    /// Returns `None` when nothing matched (the text node is left alone).
    pub(crate) fn scan(&self, value: &str) -> Option<Vec<Node>> {
        let mut out: Vec<Node> = Vec::new();
        let mut cursor = 0usize;

        while cursor < value.len() {
            let rest = &value[cursor..];
            let flagged = self.find_flagged(rest);
            let plain = self.re_plain.find(rest);

            // Prefer a flagged match when it starts no later than the plain
            // one; otherwise the plain regex would consume the opening
            // `marker flags marker` run as content.
            let (start, end, flags, content) = match (flagged, plain) {
                (Some(f), Some(p)) if f.0 <= p.start() => f,
                (Some(f), None) => f,
                (_, Some(p)) => {
                    let caps = self.re_plain.captures(rest)?;
                    let content = caps.get(1)?.as_str().to_string();
                    (p.start(), p.end(), None, content)
                }
                (None, None) => break,
            };

            if start > 0 {
                out.push(Node::text(&rest[..start]));
            }
            out.push(Node::Decoration(mdast::Decoration {
                name: self.name.clone(),
                flags,
                children: vec![Node::text(content)],
            }));
            cursor += end;
        }

        if out.is_empty() {
            return None;
        }
        if cursor < value.len() {
            out.push(Node::text(&value[cursor..]));
        }
        Some(out)
    }

    /// Find the earliest flagged match whose opening and closing flags agree.
    fn find_flagged(&self, rest: &str) -> Option<(usize, usize, Option<String>, String)> {
        let re = self.re_flagged.as_ref()?;
        for caps in re.captures_iter(rest) {
            let open = caps.get(1)?.as_str();
            let close = caps.get(3)?.as_str();
            if open != close {
                continue;
            }
            let whole = caps.get(0)?;
            return Some((
                whole.start(),
                whole.end(),
                Some(open.to_string()),
                caps.get(2)?.as_str().to_string(),
            ));
        }
        None
    }

    /// Print form: `marker flags marker content marker flags marker` when
    /// flagged, `marker content marker` otherwise.
    pub(crate) fn print(&self, flags: Option<&str>, content: &str) -> String {
        let m = &self.marker;
        match flags {
            Some(f) => format!("{m}{f}{m}{content}{m}{f}{m}"),
            None => format!("{m}{content}{m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight() -> DecorationSyntax {
        DecorationSyntax::new("highlight", "==", true)
    }

    fn underline() -> DecorationSyntax {
        DecorationSyntax::new("underline", "+", false)
    }

    #[test]
    fn test_plain_scan() {
        let nodes = highlight().scan("a ==b== c").unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], Node::text("a "));
        match &nodes[1] {
            Node::Decoration(d) => {
                assert_eq!(d.name, "highlight");
                assert_eq!(d.flags, None);
                assert_eq!(d.children, vec![Node::text("b")]);
            }
            other => panic!("expected decoration, got {:?}", other),
        }
        assert_eq!(nodes[2], Node::text(" c"));
    }

    #[test]
    fn test_flagged_scan() {
        let nodes = highlight().scan("==v-red==text==v-red==").unwrap();
        assert_eq!(nodes.len(), 1);
        match &nodes[0] {
            Node::Decoration(d) => {
                assert_eq!(d.flags.as_deref(), Some("v-red"));
                assert_eq!(d.children, vec![Node::text("text")]);
            }
            other => panic!("expected decoration, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_passes_through() {
        assert!(highlight().scan("just ==dangling text").is_none());
        assert!(underline().scan("a + b + c").is_none());
    }

    #[test]
    fn test_underline_scan() {
        let nodes = underline().scan("+under+ after").unwrap();
        match &nodes[0] {
            Node::Decoration(d) => assert_eq!(d.name, "underline"),
            other => panic!("expected decoration, got {:?}", other),
        }
    }

    #[test]
    fn test_print_roundtrips_scan() {
        let syn = highlight();
        let printed = syn.print(Some("v-red"), "text");
        assert_eq!(printed, "==v-red==text==v-red==");
        assert!(syn.scan(&printed).is_some());
    }
}
