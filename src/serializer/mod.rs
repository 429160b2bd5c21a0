// Document tree → Markdown AST direction.
//
// `SerializerState` walks the document tree and dispatches each node to the
// first registered type whose serialize rule matches. Mark rules run before
// the node rule of the text they decorate and may consume it outright
// (inline code does). The `SerializerStack` assembles the Markdown AST,
// which is then printed by the processor.

mod stack;
mod state;

pub use stack::SerializerStack;
pub use state::SerializerState;
