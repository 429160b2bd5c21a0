// Inline container serialization.

use super::State;
use crate::mdast::Node;

/// Serialize a list of inline (phrasing) children flush together.
pub(crate) fn container_phrasing(state: &mut State, children: &[Node]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(children.len());

    for child in children {
        parts.push(super::handlers::handle(state, child));
    }

    // Trim spaces adjacent to hard breaks ("\\\n"): trailing before the
    // break, leading after it.
    for i in 0..parts.len() {
        if parts[i] == "\\\n" {
            if i > 0 {
                parts[i - 1] = parts[i - 1].trim_end_matches(' ').to_string();
            }
            if i + 1 < parts.len() {
                parts[i + 1] = parts[i + 1].trim_start_matches(' ').to_string();
            }
        }
    }

    parts.join("")
}
