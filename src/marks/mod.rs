// Built-in mark types.

mod decorations;
mod inline;
mod link;

pub use decorations::{Highlight, Subscript, Superscript, Underline};
pub use inline::{Bold, Code, Italic, Strike};
pub use link::Link;
