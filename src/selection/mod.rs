//! Selection handling for the styling editor
//!
//! The selection is an anchor/focus pair of boundary points over the
//! [`DocumentTree`](crate::models::DocumentTree). It stands in for the
//! platform selection object: everything the editing engine needs from the
//! platform (anchor, ordered range, containment queries, select-all-children,
//! delete-from-document) is exposed here so the engine can run headless.
//!
//! ## Modules
//!
//! - `boundary`: boundary points and their ordering
//! - `range`: ordered ranges and the extract/insert primitives
//! - `resolver`: picking the current selection from the available sources

pub mod boundary;
pub mod range;
pub mod resolver;

pub use boundary::{compare_points, BoundaryPoint};
pub use range::{insert_node, prune_empty_siblings, prune_if_empty, Range};
pub use resolver::{FixedSelection, SelectionResolver, SelectionSource, SelectionSourceKind};

use serde::{Deserialize, Serialize};

use crate::models::{DocumentTree, NodeId};

/// Selection state (anchor + focus)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started
    pub anchor: BoundaryPoint,
    /// Where the selection currently ends
    pub focus: BoundaryPoint,
}

impl Selection {
    pub fn new(anchor: BoundaryPoint, focus: BoundaryPoint) -> Self {
        Self { anchor, focus }
    }

    /// Selection of `[start, end)` inside a single text node
    pub fn within(node: NodeId, start: usize, end: usize) -> Self {
        Self::new(BoundaryPoint::new(node, start), BoundaryPoint::new(node, end))
    }

    /// Create a collapsed selection (caret only)
    pub fn caret(point: BoundaryPoint) -> Self {
        Self::new(point, point)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn anchor_node(&self) -> NodeId {
        self.anchor.node
    }

    /// Both boundaries refer to live, in-bounds positions
    pub fn is_valid(&self, tree: &DocumentTree) -> bool {
        self.anchor.is_valid(tree) && self.focus.is_valid(tree)
    }

    /// Range covered by this selection, ordered start to end
    pub fn range(&self, tree: &DocumentTree) -> Range {
        Range::new(tree, self.anchor, self.focus)
    }

    /// The selection's text, as the platform would stringify it
    pub fn to_text(&self, tree: &DocumentTree) -> String {
        self.range(tree).to_text(tree)
    }

    /// Containment query; `allow_partial` accepts nodes the range only overlaps
    pub fn contains_node(&self, tree: &DocumentTree, node: NodeId, allow_partial: bool) -> bool {
        let range = self.range(tree);
        if allow_partial {
            range.intersects_node(tree, node)
        } else {
            range.contains_node(tree, node)
        }
    }

    /// Select the entire contents of `node`
    pub fn select_all_children(&mut self, tree: &DocumentTree, node: NodeId) {
        self.anchor = BoundaryPoint::new(node, 0);
        self.focus = BoundaryPoint::new(node, tree.node_len(node));
    }

    pub fn collapse_to(&mut self, point: BoundaryPoint) {
        self.anchor = point;
        self.focus = point;
    }

    /// Delete the selected material and collapse onto the deletion point
    pub fn delete_from_document(&mut self, tree: &mut DocumentTree) {
        if self.is_collapsed() {
            return;
        }
        let point = self.range(tree).delete_contents(tree);
        self.collapse_to(point);

        // Deleting can leave emptied or adjacent text nodes behind
        let mut points = [self.anchor];
        let scope = tree.element_container(point.node).unwrap_or(tree.root());
        tree.normalize_text(scope, &mut points);
        self.collapse_to(points[0]);
    }

    /// Remap the selection through text normalization below `scope`
    pub fn normalize_within(&mut self, tree: &mut DocumentTree, scope: NodeId) {
        let mut points = [self.anchor, self.focus];
        tree.normalize_text(scope, &mut points);
        self.anchor = points[0];
        self.focus = points[1];
    }
}
