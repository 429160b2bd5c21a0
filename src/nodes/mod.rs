// Built-in document node types.
//
// Each type pairs its schema descriptor with the parse and serialize rules
// that connect it to the Markdown AST. Grouped by concern; registration
// order lives in the registry.

mod blocks;
mod code;
mod containers;
mod lists;
mod media;
mod table;

pub use blocks::{Blockquote, Doc, HardBreak, Heading, HorizontalRule, HtmlBlock, Paragraph, Text};
pub use code::{CodeBlock, MathBlock, MathInline};
pub use containers::{Details, Diagram};
pub use lists::{BulletList, ListItem, OrderedList, TaskItem};
pub use media::{Embed, Image};
pub use table::{Table, TableCell, TableRow};
