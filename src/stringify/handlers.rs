// Node type handlers for AST → Markdown serialization.
//
// One handler per AST node type. Each takes a State and a node, returns a
// String. Custom syntax (math, decorations, directives) is printed at the
// bottom.

use super::State;
use crate::mdast::{self, Node};
use crate::processor::directive::print_attributes;

/// Dispatch to the appropriate handler for a node.
pub(crate) fn handle(state: &mut State, node: &Node) -> String {
    match node {
        Node::Root(n) => handle_root(state, n),
        Node::Paragraph(n) => handle_paragraph(state, n),
        Node::Heading(n) => handle_heading(state, n),
        Node::ThematicBreak(_) => handle_thematic_break(state),
        Node::Blockquote(n) => handle_blockquote(state, n),
        Node::List(n) => handle_list(state, n),
        Node::ListItem(n) => handle_list_item(state, n),
        Node::Code(n) => handle_code(state, n),
        Node::Html(n) => n.value.clone(),
        Node::Text(n) => handle_text(state, n),
        Node::Emphasis(n) => handle_emphasis(state, n),
        Node::Strong(n) => handle_strong(state, n),
        Node::InlineCode(n) => handle_inline_code(n),
        Node::Break(_) => "\\\n".to_string(),
        Node::Link(n) => handle_link(state, n),
        Node::Image(n) => handle_image(n),
        Node::Delete(n) => handle_delete(state, n),
        Node::Table(n) => handle_table(state, n),
        Node::TableRow(_) | Node::TableCell(_) => {
            // Handled by the table handler directly.
            String::new()
        }
        Node::Math(n) => handle_math(n),
        Node::InlineMath(n) => handle_inline_math(n),
        Node::Decoration(n) => handle_decoration(state, n),
        Node::LeafDirective(n) => handle_leaf_directive(n),
        Node::ContainerDirective(n) => handle_container_directive(state, n),
    }
}

// ---------------------------------------------------------------------------
// Flow (block) handlers
// ---------------------------------------------------------------------------

fn handle_root(state: &mut State, node: &mdast::Root) -> String {
    super::flow::container_flow(state, &node.children)
}

fn handle_paragraph(state: &mut State, node: &mdast::Paragraph) -> String {
    state.at_break = true;
    let content = super::phrasing::container_phrasing(state, &node.children);
    state.at_break = false;
    content
}

fn handle_heading(state: &mut State, node: &mdast::Heading) -> String {
    let content = super::phrasing::container_phrasing(state, &node.children);
    // ATX headings cannot span lines.
    let content = content.replace("\\\n", " ").replace('\n', " ");
    let hashes = "#".repeat(node.depth.clamp(1, 6) as usize);
    if state.options.close_atx {
        format!("{} {} {}", hashes, content, hashes)
    } else {
        format!("{} {}", hashes, content)
    }
}

fn handle_thematic_break(state: &mut State) -> String {
    std::iter::repeat(state.options.rule)
        .take(state.options.rule_repetition as usize)
        .collect()
}

fn handle_blockquote(state: &mut State, node: &mdast::Blockquote) -> String {
    let content = super::flow::container_flow(state, &node.children);
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn handle_list(state: &mut State, node: &mdast::List) -> String {
    let mut result = Vec::new();
    let old_bullet = state.bullet_current;

    if !node.ordered {
        // Alternate bullets when the previous sibling list used ours.
        let bullet = if state.bullet_last_used == Some(state.options.bullet) {
            if state.options.bullet == '*' {
                '-'
            } else {
                '*'
            }
        } else {
            state.options.bullet
        };
        state.bullet_current = Some(bullet);
    }

    for (i, child) in node.children.iter().enumerate() {
        let prefix = if node.ordered {
            let number = if state.options.increment_list_marker {
                node.start.unwrap_or(1) + i as u32
            } else {
                node.start.unwrap_or(1)
            };
            format!("{}{}", number, state.options.bullet_ordered)
        } else {
            format!("{}", state.bullet_current.unwrap_or('-'))
        };

        let content = handle_list_item_with_parent(state, child, node);
        state.bullet_last_used = None;
        let indent = " ".repeat(prefix.len() + 1);

        let mut lines: Vec<String> = content.lines().map(String::from).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }

        let first = if lines[0].is_empty() {
            prefix.clone()
        } else {
            format!("{} {}", prefix, lines[0])
        };
        let mut item = first;
        for line in &lines[1..] {
            item.push('\n');
            if !line.is_empty() {
                item.push_str(&indent);
                item.push_str(line);
            }
        }
        result.push(item);
    }

    if !node.ordered {
        state.bullet_last_used = state.bullet_current;
    }
    state.bullet_current = old_bullet;

    let separator = if node.spread { "\n\n" } else { "\n" };
    result.join(separator)
}

fn handle_list_item_with_parent(state: &mut State, node: &Node, parent: &mdast::List) -> String {
    let Node::ListItem(item) = node else {
        return handle(state, node);
    };
    let spread = parent.spread || item.spread;
    let mut content = super::flow::container_flow_tight(state, &item.children, spread);

    if let Some(checked) = item.checked {
        let checkbox = if checked { "[x]" } else { "[ ]" };
        content = if content.is_empty() {
            checkbox.to_string()
        } else {
            format!("{} {}", checkbox, content)
        };
    }

    content
}

fn handle_list_item(state: &mut State, node: &mdast::ListItem) -> String {
    // Called directly (not via handle_list); use the item's own spread.
    let mut content = super::flow::container_flow_tight(state, &node.children, node.spread);

    if let Some(checked) = node.checked {
        let checkbox = if checked { "[x]" } else { "[ ]" };
        content = if content.is_empty() {
            checkbox.to_string()
        } else {
            format!("{} {}", checkbox, content)
        };
    }

    content
}

fn handle_code(state: &mut State, node: &mdast::Code) -> String {
    let fence_char = state.options.fence;
    // Find a fence length that doesn't conflict with the content.
    let content_max = node
        .value
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.len() >= 3 && trimmed.chars().all(|c| c == fence_char) {
                Some(trimmed.len())
            } else {
                None
            }
        })
        .max()
        .unwrap_or(0);
    let fence: String = std::iter::repeat(fence_char)
        .take((content_max + 1).max(3))
        .collect();

    let info = node.lang.as_deref().unwrap_or("");
    let meta = node
        .meta
        .as_ref()
        .map(|m| format!(" {}", m))
        .unwrap_or_default();

    if node.value.is_empty() {
        format!("{fence}{info}{meta}\n{fence}")
    } else {
        format!("{fence}{info}{meta}\n{}\n{fence}", node.value)
    }
}

// ---------------------------------------------------------------------------
// Phrasing (inline) handlers
// ---------------------------------------------------------------------------

fn handle_text(state: &mut State, node: &mdast::Text) -> String {
    let escaped = super::escape::escape_phrasing(&node.value);
    if state.at_break {
        state.at_break = false;
        super::escape::escape_at_break_start(escaped)
    } else {
        escaped
    }
}

fn handle_emphasis(state: &mut State, node: &mdast::Emphasis) -> String {
    let marker = state.options.emphasis;
    let content = super::phrasing::container_phrasing(state, &node.children);
    format!("{marker}{content}{marker}")
}

fn handle_strong(state: &mut State, node: &mdast::Strong) -> String {
    let marker = state.options.strong;
    let content = super::phrasing::container_phrasing(state, &node.children);
    format!("{0}{0}{1}{0}{0}", marker, content)
}

fn handle_inline_code(node: &mdast::InlineCode) -> String {
    // Choose a backtick count that doesn't conflict with the content.
    let ticks = "`".repeat(longest_backtick_run(&node.value) + 1);

    let needs_space = node.value.starts_with('`')
        || node.value.ends_with('`')
        || (node.value.starts_with(' ')
            && node.value.ends_with(' ')
            && !node.value.trim().is_empty());

    if needs_space {
        format!("{ticks} {} {ticks}", node.value)
    } else {
        format!("{ticks}{}{ticks}", node.value)
    }
}

fn handle_link(state: &mut State, node: &mdast::Link) -> String {
    let content = super::phrasing::container_phrasing(state, &node.children);
    let content = content.trim_start();

    // Autolink form (<url>) when the visible text is the target itself.
    if !state.options.resource_link
        && !node.url.is_empty()
        && node.title.is_none()
        && node.children.len() == 1
        && matches!(&node.children[0], Node::Text(_))
        && (content == node.url.as_str() || format!("mailto:{}", content) == node.url)
        && node.url.contains(':')
        && !node
            .url
            .chars()
            .any(|c| c <= ' ' || c == '<' || c == '>' || c == '\x7f')
    {
        return format!("<{}>", content);
    }

    match &node.title {
        Some(title) => format!("[{}]({} \"{}\")", content, node.url, title),
        None => format!("[{}]({})", content, node.url),
    }
}

fn handle_image(node: &mdast::Image) -> String {
    match &node.title {
        Some(title) => format!("![{}]({} \"{}\")", node.alt, node.url, title),
        None => format!("![{}]({})", node.alt, node.url),
    }
}

fn handle_delete(state: &mut State, node: &mdast::Delete) -> String {
    let content = super::phrasing::container_phrasing(state, &node.children);
    format!("~~{}~~", content)
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

fn handle_table(state: &mut State, node: &mdast::Table) -> String {
    if node.children.is_empty() {
        return String::new();
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in &node.children {
        if let Node::TableRow(tr) = row {
            let cells: Vec<String> = tr
                .children
                .iter()
                .map(|cell| {
                    if let Node::TableCell(tc) = cell {
                        let content = super::phrasing::container_phrasing(state, &tc.children);
                        // Cell content must stay on one line and pipes must
                        // not split the cell.
                        content
                            .trim()
                            .replace("\\\n", " ")
                            .replace('\n', " ")
                            .replace('|', "\\|")
                    } else {
                        String::new()
                    }
                })
                .collect();
            rows.push(cells);
        }
    }

    if rows.is_empty() {
        return String::new();
    }

    let col_count = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut col_widths = vec![3usize; col_count];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < col_count {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }
    }

    let mut lines = Vec::new();
    lines.push(format_row(&rows[0], &col_widths, col_count, &node.align));

    let sep: Vec<String> = (0..col_count)
        .map(|i| format_separator(col_widths[i], node.align.get(i).copied().flatten()))
        .collect();
    lines.push(format!("| {} |", sep.join(" | ")));

    for row in rows.iter().skip(1) {
        lines.push(format_row(row, &col_widths, col_count, &node.align));
    }

    lines.join("\n")
}

fn format_row(
    cells: &[String],
    widths: &[usize],
    col_count: usize,
    aligns: &[Option<mdast::AlignKind>],
) -> String {
    let padded: Vec<String> = (0..col_count)
        .map(|i| {
            let content = cells.get(i).map(|s| s.as_str()).unwrap_or("");
            pad_cell(content, widths[i], aligns.get(i).copied().flatten())
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn pad_cell(content: &str, width: usize, align: Option<mdast::AlignKind>) -> String {
    use mdast::AlignKind;
    let padding = width.saturating_sub(content.chars().count());
    match align {
        Some(AlignKind::Right) => format!("{}{}", " ".repeat(padding), content),
        Some(AlignKind::Center) => {
            let left = padding.div_ceil(2);
            format!("{}{}{}", " ".repeat(left), content, " ".repeat(padding - left))
        }
        _ => format!("{}{}", content, " ".repeat(padding)),
    }
}

fn format_separator(width: usize, align: Option<mdast::AlignKind>) -> String {
    use mdast::AlignKind;
    match align {
        Some(AlignKind::Left) => format!(":{}", "-".repeat(width.saturating_sub(1))),
        Some(AlignKind::Right) => format!("{}:", "-".repeat(width.saturating_sub(1))),
        Some(AlignKind::Center) => format!(":{}:", "-".repeat(width.saturating_sub(2))),
        None => "-".repeat(width),
    }
}

// ---------------------------------------------------------------------------
// Math, decorations, directives
// ---------------------------------------------------------------------------

fn handle_math(node: &mdast::Math) -> String {
    let meta = node
        .meta
        .as_ref()
        .map(|m| format!(" {}", m))
        .unwrap_or_default();
    format!("$${meta}\n{}\n$$", node.value)
}

fn handle_inline_math(node: &mdast::InlineMath) -> String {
    format!("${}$", node.value)
}

fn handle_decoration(state: &mut State, node: &mdast::Decoration) -> String {
    let content = super::phrasing::container_phrasing(state, &node.children);
    match state.decoration(&node.name) {
        Some(syntax) => syntax.print(node.flags.as_deref(), &content),
        None => {
            tracing::warn!(name = %node.name, "no decoration syntax registered; printing bare content");
            content
        }
    }
}

fn handle_leaf_directive(node: &mdast::LeafDirective) -> String {
    format!(":{}{{{}}}", node.name, print_attributes(&node.attributes))
}

fn handle_container_directive(state: &mut State, node: &mdast::ContainerDirective) -> String {
    let attrs = if node.attributes.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", print_attributes(&node.attributes))
    };
    let body = match &node.value {
        Some(value) => value.trim_end().to_string(),
        None => super::flow::container_flow(state, &node.children),
    };
    if body.is_empty() {
        format!(":::{}{}\n:::", node.name, attrs)
    } else {
        format!(":::{}{}\n{}\n:::", node.name, attrs, body)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Find the longest consecutive run of backticks in a string.
fn longest_backtick_run(s: &str) -> usize {
    let mut max = 0;
    let mut current = 0;
    for c in s.chars() {
        if c == '`' {
            current += 1;
            max = max.max(current);
        } else {
            current = 0;
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stringify::{stringify, StringifyOptions};

    fn print(node: &Node) -> String {
        stringify(node, &StringifyOptions::default(), &[])
    }

    fn para(children: Vec<Node>) -> Node {
        Node::Paragraph(mdast::Paragraph { children })
    }

    #[test]
    fn test_heading() {
        let node = Node::Heading(mdast::Heading {
            depth: 2,
            children: vec![Node::text("Title")],
        });
        assert_eq!(print(&node), "## Title\n");
    }

    #[test]
    fn test_strong_emphasis() {
        let node = para(vec![
            Node::Strong(mdast::Strong {
                children: vec![Node::text("bold")],
            }),
            Node::text(" and "),
            Node::Emphasis(mdast::Emphasis {
                children: vec![Node::text("italic")],
            }),
        ]);
        assert_eq!(print(&node), "**bold** and *italic*\n");
    }

    #[test]
    fn test_tight_list() {
        let item = |text: &str| {
            Node::ListItem(mdast::ListItem {
                spread: false,
                checked: None,
                children: vec![para(vec![Node::text(text)])],
            })
        };
        let node = Node::List(mdast::List {
            ordered: false,
            start: None,
            spread: false,
            children: vec![item("item 1"), item("item 2")],
        });
        assert_eq!(print(&node), "- item 1\n- item 2\n");
    }

    #[test]
    fn test_task_item_checkbox() {
        let node = Node::List(mdast::List {
            ordered: false,
            start: None,
            spread: false,
            children: vec![Node::ListItem(mdast::ListItem {
                spread: false,
                checked: Some(true),
                children: vec![para(vec![Node::text("done")])],
            })],
        });
        assert_eq!(print(&node), "- [x] done\n");
    }

    #[test]
    fn test_inline_code_conflict() {
        let node = para(vec![Node::InlineCode(mdast::InlineCode {
            value: "a ` b".into(),
        })]);
        assert_eq!(print(&node), "``a ` b``\n");
    }

    #[test]
    fn test_leaf_directive() {
        let node = Node::LeafDirective(mdast::LeafDirective {
            name: "embed".into(),
            attributes: vec![("src".into(), "https://example.com".into())],
        });
        assert_eq!(print(&node), ":embed{src=\"https://example.com\"}\n");
    }

    #[test]
    fn test_container_directive_raw() {
        let node = Node::ContainerDirective(mdast::ContainerDirective {
            name: "diagram".into(),
            attributes: vec![("type".into(), "mermaid".into())],
            children: vec![],
            value: Some("graph TD; A-->B;".into()),
        });
        assert_eq!(
            print(&node),
            ":::diagram{type=\"mermaid\"}\ngraph TD; A-->B;\n:::\n"
        );
    }

    #[test]
    fn test_math_block() {
        let node = Node::Math(mdast::Math {
            value: "x^2".into(),
            meta: None,
        });
        assert_eq!(print(&node), "$$\nx^2\n$$\n");
    }

    #[test]
    fn test_table() {
        let cell = |text: &str| {
            Node::TableCell(mdast::TableCell {
                children: vec![Node::text(text)],
            })
        };
        let node = Node::Table(mdast::Table {
            align: vec![None, None],
            children: vec![
                Node::TableRow(mdast::TableRow {
                    children: vec![cell("a"), cell("b")],
                }),
                Node::TableRow(mdast::TableRow {
                    children: vec![cell("1"), cell("2")],
                }),
            ],
        });
        let printed = print(&node);
        assert!(printed.starts_with("| a"));
        assert_eq!(printed.lines().count(), 3);
    }
}
