// Context-sensitive escaping for Markdown serialization.
//
// Phrasing text gets the characters that would trigger inline formatting
// backslash-escaped; block-start text additionally gets leading characters
// escaped that would read as block syntax. Escaping stays minimal on
// purpose: a re-parse must yield the same tree, not the same bytes.

/// Escape inline Markdown syntax characters in phrasing content.
pub(crate) fn escape_phrasing(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a leading character that would read as block syntax when this
/// text starts a block.
pub(crate) fn escape_at_break_start(value: String) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return value;
    };

    let block_start = match first {
        '#' | '>' | '+' | '-' | '=' => true,
        c if c.is_ascii_digit() => ordered_marker_follows(&value),
        _ => false,
    };

    if block_start {
        format!("\\{value}")
    } else {
        value
    }
}

/// `1. ` / `23) ` style ordered-list markers.
fn ordered_marker_follows(value: &str) -> bool {
    let rest = value.trim_start_matches(|c: char| c.is_ascii_digit());
    matches!(rest.as_bytes().first(), Some(b'.') | Some(b')'))
}
