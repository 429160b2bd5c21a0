// Block-level container serialization.
//
// Serializes block children separated by blank lines; list items get a
// tight variant with single newlines.

use super::State;
use crate::mdast::Node;

/// Serialize a list of block-level (flow) children with blank lines between
/// them. Used for root, blockquote, container directives, and similar.
pub(crate) fn container_flow(state: &mut State, children: &[Node]) -> String {
    let mut result = String::new();

    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            result.push_str("\n\n");
        }
        result.push_str(&super::handlers::handle(state, child));

        // Reset bullet alternation after any non-list node so sibling lists
        // don't needlessly switch markers.
        if !matches!(child, Node::List(_)) {
            state.bullet_last_used = None;
        }
    }

    result
}

/// Serialize block-level children for a list item.
/// `spread` = true → blank line between children, false → single newline.
pub(crate) fn container_flow_tight(state: &mut State, children: &[Node], spread: bool) -> String {
    let mut result = String::new();

    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            result.push_str(if spread { "\n\n" } else { "\n" });
        }
        result.push_str(&super::handlers::handle(state, child));
    }

    result
}
