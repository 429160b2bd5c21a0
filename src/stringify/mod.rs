// AST → Markdown string serializer.
//
// Walks the Markdown AST and emits text. All formatting choices (list
// markers, emphasis characters, fence characters, etc.) live here; custom
// syntax (decorations, directives, math) is printed by the handlers at the
// bottom of `handlers.rs`, with decoration delimiters looked up in the
// processor's registered table.

pub(crate) mod escape;
pub(crate) mod flow;
pub(crate) mod handlers;
pub(crate) mod phrasing;

use crate::mdast::Node;
use crate::processor::DecorationSyntax;

/// Serializer configuration.
#[derive(Debug, Clone)]
pub struct StringifyOptions {
    pub bullet: char,
    pub bullet_ordered: char,
    pub emphasis: char,
    pub strong: char,
    pub fence: char,
    pub rule: char,
    pub rule_repetition: u8,
    pub close_atx: bool,
    pub increment_list_marker: bool,
    pub resource_link: bool,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            bullet: '-',
            bullet_ordered: '.',
            emphasis: '*',
            strong: '*',
            fence: '`',
            rule: '-',
            rule_repetition: 3,
            close_atx: false,
            increment_list_marker: true,
            resource_link: false,
        }
    }
}

/// Serializer state threaded through all handlers.
pub(crate) struct State<'a> {
    pub options: &'a StringifyOptions,
    pub decorations: &'a [DecorationSyntax],
    /// Current list bullet (may switch to avoid conflicts).
    pub bullet_current: Option<char>,
    /// Previous list's bullet (for alternation).
    pub bullet_last_used: Option<char>,
    /// Whether the next text to be emitted starts a block; used to escape
    /// characters that would read as block syntax (`#`, `-`, `1.` …).
    pub at_break: bool,
}

impl<'a> State<'a> {
    pub fn new(options: &'a StringifyOptions, decorations: &'a [DecorationSyntax]) -> Self {
        Self {
            options,
            decorations,
            bullet_current: None,
            bullet_last_used: None,
            at_break: false,
        }
    }

    pub fn decoration(&self, name: &str) -> Option<&'a DecorationSyntax> {
        self.decorations.iter().find(|d| d.name == name)
    }
}

/// Serialize an AST to a Markdown string.
pub(crate) fn stringify(
    node: &Node,
    options: &StringifyOptions,
    decorations: &[DecorationSyntax],
) -> String {
    let mut state = State::new(options, decorations);
    let mut output = handlers::handle(&mut state, node);

    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }

    output
}
