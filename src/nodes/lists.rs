// List node types. Task items are plain list items whose Markdown form
// carries a GFM checkbox; they register before `list_item` so their
// narrower predicate wins.

use crate::mdast;
use crate::model::{Attrs, ContentSpec, NodeType};
use crate::parser::ParserState;
use crate::registry::NodeSpec;
use crate::serializer::SerializerState;

pub struct BulletList;

impl NodeSpec for BulletList {
    fn name(&self) -> &'static str {
        "bullet_list"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("bullet_list", ContentSpec::BlocksRequired).with_default("spread", false)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::List(list) if !list.ordered)
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::List(list) = node else { return };
        let mut attrs = Attrs::new();
        attrs.insert("spread".into(), list.spread.into());
        state.open_node(ty, attrs);
        state.next(&list.children);
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.open_node(mdast::Node::List(mdast::List {
            ordered: false,
            start: None,
            spread: node.attr_bool("spread").unwrap_or(false),
            children: vec![],
        }));
        state.next(&node.content);
        state.close_node();
    }
}

pub struct OrderedList;

impl NodeSpec for OrderedList {
    fn name(&self) -> &'static str {
        "ordered_list"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("ordered_list", ContentSpec::BlocksRequired)
            .with_default("start", 1u64)
            .with_default("spread", false)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::List(list) if list.ordered)
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::List(list) = node else { return };
        let mut attrs = Attrs::new();
        attrs.insert("start".into(), u64::from(list.start.unwrap_or(1)).into());
        attrs.insert("spread".into(), list.spread.into());
        state.open_node(ty, attrs);
        state.next(&list.children);
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        let start = node.attr_u64("start").unwrap_or(1).min(u64::from(u32::MAX)) as u32;
        state.open_node(mdast::Node::List(mdast::List {
            ordered: true,
            start: Some(start),
            spread: node.attr_bool("spread").unwrap_or(false),
            children: vec![],
        }));
        state.next(&node.content);
        state.close_node();
    }
}

pub struct ListItem;

impl NodeSpec for ListItem {
    fn name(&self) -> &'static str {
        "list_item"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("list_item", ContentSpec::BlocksRequired)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::ListItem(_))
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::ListItem(item) = node else { return };
        state.open_node(ty, Attrs::new());
        state.next(&item.children);
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.open_node(mdast::Node::ListItem(mdast::ListItem {
            spread: false,
            checked: None,
            children: vec![],
        }));
        state.next(&node.content);
        state.close_node();
    }
}

pub struct TaskItem;

impl NodeSpec for TaskItem {
    fn name(&self) -> &'static str {
        "task_item"
    }

    fn node_type(&self) -> NodeType {
        NodeType::new("task_item", ContentSpec::BlocksRequired).with_default("checked", false)
    }

    fn match_parse(&self, node: &mdast::Node) -> bool {
        matches!(node, mdast::Node::ListItem(item) if item.checked.is_some())
    }

    fn parse_apply(&self, state: &mut ParserState, node: &mdast::Node, ty: &NodeType) {
        let mdast::Node::ListItem(item) = node else { return };
        let mut attrs = Attrs::new();
        attrs.insert("checked".into(), item.checked.unwrap_or(false).into());
        state.open_node(ty, attrs);
        state.next(&item.children);
        state.close_node();
    }

    fn serialize_apply(&self, state: &mut SerializerState, node: &crate::model::Node) {
        state.open_node(mdast::Node::ListItem(mdast::ListItem {
            spread: false,
            checked: Some(node.attr_bool("checked").unwrap_or(false)),
            children: vec![],
        }));
        state.next(&node.content);
        state.close_node();
    }
}
