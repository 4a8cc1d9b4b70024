//! Ordered ranges over the document tree
//!
//! A [`Range`] is the pair of boundary points a selection covers, start
//! before end. The mutating operations here (`extract_contents`,
//! `delete_contents`, `insert_node`) are the structural primitives the
//! wrapper and the cut handler are built from.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::boundary::{compare_points, BoundaryPoint};
use crate::models::{DocumentTree, NodeId};
use crate::utils::slice_chars;

/// Start/end pair in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
}

impl Range {
    /// Build a range from two points in either order
    pub fn new(tree: &DocumentTree, a: BoundaryPoint, b: BoundaryPoint) -> Self {
        if compare_points(tree, a, b) == Ordering::Greater {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    pub fn collapsed(point: BoundaryPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Nearest node containing both boundaries
    pub fn common_ancestor(&self, tree: &DocumentTree) -> Option<NodeId> {
        tree.common_ancestor(self.start.node, self.end.node)
    }

    /// Whether any part of `node` lies inside the range
    ///
    /// A node that only touches a boundary from outside does not intersect.
    /// This matches how platform selections answer a partial containment query.
    pub fn intersects_node(&self, tree: &DocumentTree, node: NodeId) -> bool {
        let (Some(before), Some(after)) = (
            BoundaryPoint::before(tree, node),
            BoundaryPoint::after(tree, node),
        ) else {
            // Top-level nodes contain every range in their tree
            return tree.is_inclusive_ancestor(node, self.start.node);
        };

        compare_points(tree, before, self.end) == Ordering::Less
            && compare_points(tree, after, self.start) == Ordering::Greater
    }

    /// Whether `node` lies entirely inside the range
    pub fn contains_node(&self, tree: &DocumentTree, node: NodeId) -> bool {
        let (Some(before), Some(after)) = (
            BoundaryPoint::before(tree, node),
            BoundaryPoint::after(tree, node),
        ) else {
            return false;
        };

        compare_points(tree, self.start, before) != Ordering::Greater
            && compare_points(tree, after, self.end) != Ordering::Greater
    }

    /// The selected text, with line breaks as newlines
    pub fn to_text(&self, tree: &DocumentTree) -> String {
        let mut out = String::new();
        if self.is_collapsed() {
            return out;
        }
        let Some(ancestor) = self.common_ancestor(tree) else {
            return out;
        };

        for node in std::iter::once(ancestor).chain(tree.descendants(ancestor)) {
            if let Some(text) = tree.text(node) {
                let is_start = node == self.start.node;
                let is_end = node == self.end.node;
                if is_start || is_end {
                    let from = if is_start { self.start.offset } else { 0 };
                    let to = if is_end { self.end.offset } else { tree.node_len(node) };
                    out.push_str(slice_chars(text, from, to));
                } else if self.contains_node(tree, node) {
                    out.push_str(text);
                }
            } else if tree.element(node).is_some_and(|e| e.tag.is_line_break())
                && self.contains_node(tree, node)
            {
                out.push('\n');
            }
        }

        out
    }

    /// Move the selected material out of the tree
    ///
    /// Returns the detached fragment (top-level nodes in order) and the point
    /// the range collapses to. Boundary text nodes give up only the selected
    /// substring; partially selected elements are split by cloning them
    /// shallowly into the fragment.
    pub fn extract_contents(&self, tree: &mut DocumentTree) -> (Vec<NodeId>, BoundaryPoint) {
        let collapse_to = self.collapse_point(tree);
        let fragment = extract(tree, self.start, self.end);
        (fragment, collapse_to)
    }

    /// Remove the selected material; returns the collapsed point
    pub fn delete_contents(&self, tree: &mut DocumentTree) -> BoundaryPoint {
        let (_, point) = self.extract_contents(tree);
        point
    }

    fn collapse_point(&self, tree: &DocumentTree) -> BoundaryPoint {
        if tree.is_inclusive_ancestor(self.start.node, self.end.node) {
            return self.start;
        }

        let mut reference = self.start.node;
        while let Some(parent) = tree.parent(reference) {
            if tree.is_inclusive_ancestor(parent, self.end.node) {
                break;
            }
            reference = parent;
        }

        BoundaryPoint::after(tree, reference).unwrap_or(self.start)
    }
}

fn extract(tree: &mut DocumentTree, start: BoundaryPoint, end: BoundaryPoint) -> Vec<NodeId> {
    let mut fragment = Vec::new();
    if start == end {
        return fragment;
    }

    if start.node == end.node && tree.is_text(start.node) {
        fragment.extend(tree.take_text_range(start.node, start.offset, end.offset));
        return fragment;
    }

    let Some(ancestor) = tree.common_ancestor(start.node, end.node) else {
        return fragment;
    };
    let range = Range { start, end };

    let first_partial = if tree.is_inclusive_ancestor(start.node, end.node) {
        None
    } else {
        tree.child_toward(ancestor, start.node)
    };
    let last_partial = if tree.is_inclusive_ancestor(end.node, start.node) {
        None
    } else {
        tree.child_toward(ancestor, end.node)
    };
    let contained: Vec<NodeId> = tree
        .children(ancestor)
        .iter()
        .copied()
        .filter(|child| range.contains_node(tree, *child))
        .collect();

    if let Some(child) = first_partial {
        if tree.is_text(child) {
            let len = tree.node_len(child);
            fragment.extend(tree.take_text_range(child, start.offset, len));
        } else if let Some(clone) = tree.shallow_clone(child) {
            let len = tree.node_len(child);
            for node in extract(tree, start, BoundaryPoint::new(child, len)) {
                tree.append_child(clone, node);
            }
            fragment.push(clone);
        }
    }

    for child in contained {
        tree.detach(child);
        fragment.push(child);
    }

    if let Some(child) = last_partial {
        if tree.is_text(child) {
            fragment.extend(tree.take_text_range(child, 0, end.offset));
        } else if let Some(clone) = tree.shallow_clone(child) {
            for node in extract(tree, BoundaryPoint::new(child, 0), end) {
                tree.append_child(clone, node);
            }
            fragment.push(clone);
        }
    }

    fragment
}

/// Insert a detached node at a boundary point
///
/// Inside a text node the text is split, except at either end where the
/// node goes before or after the text so no empty text nodes appear.
pub fn insert_node(tree: &mut DocumentTree, point: BoundaryPoint, node: NodeId) {
    if tree.is_text(point.node) {
        let Some(parent) = tree.parent(point.node) else {
            log::warn!("cannot insert next to detached text node {}", point.node);
            return;
        };
        let len = tree.node_len(point.node);
        if point.offset == 0 {
            tree.insert_before(parent, node, Some(point.node));
        } else if point.offset >= len {
            let reference = tree.next_sibling(point.node);
            tree.insert_before(parent, node, reference);
        } else {
            let reference = tree.split_text(point.node, point.offset);
            tree.insert_before(parent, node, reference);
        }
    } else {
        let reference = tree.children(point.node).get(point.offset).copied();
        tree.insert_before(point.node, node, reference);
    }
}

/// Remove empty leftovers next to `node`
///
/// Extraction can leave an emptied text node, or an element whose content
/// moved out entirely, on either side of the insertion point.
pub fn prune_empty_siblings(tree: &mut DocumentTree, node: NodeId) {
    for sibling in [tree.previous_sibling(node), tree.next_sibling(node)]
        .into_iter()
        .flatten()
    {
        if prune_if_empty(tree, sibling) {
            log::debug!("pruned empty node {} next to {}", sibling, node);
        }
    }
}

/// Detach `node` if it is an attached empty text node or an element with
/// no text and no line break; returns whether it was removed
pub fn prune_if_empty(tree: &mut DocumentTree, node: NodeId) -> bool {
    if tree.parent(node).is_none() || !is_empty_husk(tree, node) {
        return false;
    }
    tree.detach(node);
    true
}

fn is_empty_husk(tree: &DocumentTree, node: NodeId) -> bool {
    if let Some(text) = tree.text(node) {
        return text.is_empty();
    }
    let Some(element) = tree.element(node) else {
        return false;
    };
    if !element.tag.is_flattenable() {
        return false;
    }
    let has_line_break = tree
        .descendants(node)
        .into_iter()
        .any(|d| tree.element(d).is_some_and(|e| e.tag.is_line_break()));
    tree.text_content(node).is_empty() && !has_line_break
}
