// Markdown AST → document tree direction.
//
// `ParserState` walks the Markdown AST and dispatches each node to the first
// registered node or mark type whose parse rule matches it. Rules drive the
// `ParserStack` through the open/add/close primitives; the stack assembles
// the document tree bottom-up.

mod stack;
mod state;

pub use stack::ParserStack;
pub use state::ParserState;
