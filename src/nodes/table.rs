// GFM table types.
//
// The table parse rule walks rows and cells itself instead of letting the
// dispatcher recurse: column alignment lives on the Markdown table node but
// is stored per cell in the document tree, and cell content gets wrapped in
// a synthetic paragraph so cells hold block content like everything else.
// Serialization undoes both.

use crate::mdast::{self, AlignKind};
use crate::model::{Attrs, ContentSpec, NodeType};
use crate::parser::ParserState;
use crate::registry::NodeSpec;
use crate::serializer::SerializerState;

pub struct Table;

impl NodeSpec for Table {
    fn name(&self) -> &'static str {
        "table"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("table", ContentSpec::BlocksRequired)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::Table(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::Table(table) = node else { return };
        let row_ty = TableRow.node_type();
        let cell_ty = TableCell.node_type();
        let para_ty = super::Paragraph.node_type();

        state.open_node(ty, Attrs::new());
        for row in &table.children {
            let mdast::Node::TableRow(tr) = row else {
                continue;
            };
            state.open_node(&row_ty, Attrs::new());
            for (i, cell) in tr.children.iter().enumerate() {
                let mdast::Node::TableCell(tc) = cell else {
                    continue;
                };
                let mut attrs = Attrs::new();
                if let Some(Some(align)) = table.align.get(i) {
                    attrs.insert("alignment".into(), align_name(*align).into());
                }
                state.open_node(&cell_ty, attrs);
                state.open_node(&para_ty, Attrs::new());
                state.next(&tc.children);
                state.close_node();
                state.close_node();
            }
            state.close_node();
        }
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        // Alignment is read off the first row; the grammar has one
        // alignment per column, not per cell.
        let align = node
            .content
            .first()
            .map(|row| {
                row.content
                    .iter()
                    .map(|cell| cell.attr_str("alignment").and_then(align_kind))
                    .collect()
            })
            .unwrap_or_default();

        state.open_node(mdast::Node::Table(mdast::Table {
            align,
            children: vec![],
        }));
        state.next(&node.content);
        state.close_node();
    }
}

pub struct TableRow;

impl NodeSpec for TableRow {
    fn name(&self) -> &'static str {
        "table_row"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("table_row", ContentSpec::BlocksRequired)
    }

    // Rows are consumed by the table parse rule.
    fn match_parse(&self, _node: &mdast::Node) -> bool {
        false
    }

    fn parse_apply(&self, _state: &mut ParserState, _node: &mdast::Node, _ty: &NodeType) {}

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.open_node(mdast::Node::TableRow(mdast::TableRow { children: vec![] }));
        state.next(&node.content);
        state.close_node();
    }
}

pub struct TableCell;

impl NodeSpec for TableCell {
    fn name(&self) -> &'static str {
        "table_cell"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("table_cell", ContentSpec::BlocksRequired)
    }

    fn match_parse(&self, _node: &mdast::Node) -> bool {
        false
    }

    fn parse_apply(&self, _state: &mut ParserState, _node: &mdast::Node, _ty: &NodeType) {}

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.open_node(mdast::Node::TableCell(mdast::TableCell { children: vec![] }));
        // Unwrap the synthetic paragraph the parse rule added.
        match node.content.as_slice() {
            [only] if only.type_name == "paragraph" => state.next(&only.content),
            other => state.next(other),
        }
        state.close_node();
    }
}

fn align_name(align: AlignKind) -> &'static str {
    match align {
        AlignKind::Left => "left",
        AlignKind::Right => "right",
        AlignKind::Center => "center",
    }
}

fn align_kind(name: &str) -> Option<AlignKind> {
    match name {
        "left" => Some(AlignKind::Left),
        "right" => Some(AlignKind::Right),
        "center" => Some(AlignKind::Center),
        _ => None,
    }
}
