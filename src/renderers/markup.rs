//! Markup writer for document subtrees
//!
//! Style tokens become the `class` attribute (omitted when the element has
//! none), text content is escaped, and line breaks are written as `<br>`.

use quick_xml::escape::{escape, partial_escape};

use crate::config::ClassNames;
use crate::models::{DocumentTree, Element, NodeId, NodeKind};

/// Markup for `node` including its own tag
pub fn render_outer(tree: &DocumentTree, node: NodeId, classes: &ClassNames) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, node, classes);
    out
}

/// Markup for the children of `node`
pub fn render_inner(tree: &DocumentTree, node: NodeId, classes: &ClassNames) -> String {
    let mut out = String::new();
    for child in tree.children(node) {
        write_node(&mut out, tree, *child, classes);
    }
    out
}

fn write_node(out: &mut String, tree: &DocumentTree, node: NodeId, classes: &ClassNames) {
    match tree.kind(node) {
        Some(NodeKind::Text(text)) => write_text(out, text),
        Some(NodeKind::Element(element)) => {
            write_open_tag(out, element, classes, None);
            if element.tag.is_void() {
                return;
            }
            for child in tree.children(node) {
                write_node(out, tree, *child, classes);
            }
            write_close_tag(out, element);
        }
        None => log::warn!("render: unknown node {}", node),
    }
}

/// Space-separated class list for an element's tokens
pub fn class_attribute(element: &Element, classes: &ClassNames) -> String {
    element
        .tokens()
        .into_iter()
        .map(|token| classes.class_for(token))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn write_open_tag(
    out: &mut String,
    element: &Element,
    classes: &ClassNames,
    style: Option<&str>,
) {
    out.push('<');
    out.push_str(element.tag.name());

    let class = class_attribute(element, classes);
    if !class.is_empty() {
        write_attribute(out, "class", &class);
    }
    if let Some(style) = style {
        write_attribute(out, "style", style);
    }
    out.push('>');
}

pub(crate) fn write_close_tag(out: &mut String, element: &Element) {
    out.push_str("</");
    out.push_str(element.tag.name());
    out.push('>');
}

pub(crate) fn write_text(out: &mut String, text: &str) {
    out.push_str(&partial_escape(text));
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}
