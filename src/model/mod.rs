// The rich document tree model.
//
// Typed nodes with attrs, ordered content, and inline mark sets; the
// long-lived, editable representation this engine converts Markdown to and
// from. Derived from the node/attrs/content/marks shape used by
// ProseMirror-style editors.

mod mark;
mod node;
mod types;

pub use mark::{mark_set_eq, Mark};
pub use node::Node;
pub use types::{Attrs, ContentSpec, MarkType, NodeType};
