//! Clipboard Serializer: selection-bounded styled fragment export

use super::computed_style::StyleResolver;
use crate::config::ClassNames;
use crate::errors::{EditorError, Result};
use crate::models::{DocumentTree, NodeId, NodeKind};
use crate::renderers::markup::{write_close_tag, write_open_tag, write_text};
use crate::selection::{Range, Selection};
use crate::utils::slice_chars;

/// Serialize the selected part of the document as a self-contained fragment
///
/// Only nodes intersecting the selection are cloned, boundary text nodes are
/// sliced to the selection offsets, and every cloned element carries its
/// effective style as a literal `style` attribute. Returns an empty string
/// when there is nothing usable to serialize.
pub fn serialize_selection(
    tree: &DocumentTree,
    selection: Option<&Selection>,
    resolver: &dyn StyleResolver,
    classes: &ClassNames,
) -> String {
    match try_serialize_selection(tree, selection, resolver, classes) {
        Ok(markup) => markup,
        Err(e) => {
            log::debug!("clipboard: nothing serialized: {}", e);
            String::new()
        }
    }
}

/// Serialize the selection, reporting why nothing could be serialized
pub fn try_serialize_selection(
    tree: &DocumentTree,
    selection: Option<&Selection>,
    resolver: &dyn StyleResolver,
    classes: &ClassNames,
) -> Result<String> {
    let selection = selection.ok_or(EditorError::NoSelection)?;
    for point in [selection.anchor, selection.focus] {
        if !point.is_valid(tree) {
            return Err(EditorError::InvalidBoundary {
                node: point.node,
                offset: point.offset,
            });
        }
    }

    let range = selection.range(tree);
    if range.is_collapsed() {
        return Ok(String::new());
    }

    let serializer = FragmentSerializer {
        tree,
        range,
        resolver,
        classes,
    };
    let mut out = String::new();
    for child in tree.children(tree.root()) {
        if range.intersects_node(tree, *child) {
            serializer.write_clone(&mut out, *child);
        }
    }

    log::debug!("clipboard: serialized {} byte(s)", out.len());
    Ok(out)
}

struct FragmentSerializer<'a> {
    tree: &'a DocumentTree,
    range: Range,
    resolver: &'a dyn StyleResolver,
    classes: &'a ClassNames,
}

impl FragmentSerializer<'_> {
    fn write_clone(&self, out: &mut String, node: NodeId) {
        match self.tree.kind(node) {
            Some(NodeKind::Text(text)) => write_text(out, self.slice(node, text)),
            Some(NodeKind::Element(element)) => {
                let style = self.resolver.computed_style(self.tree, node).to_inline_css();
                write_open_tag(out, element, self.classes, Some(&style));
                if element.tag.is_void() {
                    return;
                }
                for child in self.tree.children(node) {
                    if self.range.intersects_node(self.tree, *child) {
                        self.write_clone(out, *child);
                    }
                }
                write_close_tag(out, element);
            }
            None => {}
        }
    }

    fn slice<'t>(&self, node: NodeId, text: &'t str) -> &'t str {
        let start = if node == self.range.start.node {
            self.range.start.offset
        } else {
            0
        };
        let end = if node == self.range.end.node {
            self.range.end.offset
        } else {
            self.tree.node_len(node)
        };
        slice_chars(text, start, end)
    }
}
