//! Boundary points and their document ordering

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{DocumentTree, NodeId};

/// A position inside the tree: a container node plus an offset
///
/// For text containers the offset counts chars; for elements it counts
/// children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Point just before `node` in its parent
    pub fn before(tree: &DocumentTree, node: NodeId) -> Option<Self> {
        let parent = tree.parent(node)?;
        let index = tree.index_in_parent(node)?;
        Some(Self::new(parent, index))
    }

    /// Point just after `node` in its parent
    pub fn after(tree: &DocumentTree, node: NodeId) -> Option<Self> {
        Self::before(tree, node).map(|p| Self::new(p.node, p.offset + 1))
    }

    /// Whether the offset lies within the container
    pub fn is_valid(&self, tree: &DocumentTree) -> bool {
        tree.contains(self.node) && self.offset <= tree.node_len(self.node)
    }
}

/// Compare two boundary points in document order
pub fn compare_points(tree: &DocumentTree, a: BoundaryPoint, b: BoundaryPoint) -> Ordering {
    if a.node == b.node {
        return a.offset.cmp(&b.offset);
    }

    if tree.tree_order(a.node, b.node) == Ordering::Greater {
        return compare_points(tree, b, a).reverse();
    }

    // `a.node` precedes `b.node`; if it also contains it, the offset decides
    if let Some(child) = tree.child_toward(a.node, b.node) {
        if tree.index_in_parent(child).is_some_and(|index| index < a.offset) {
            return Ordering::Greater;
        }
    }

    Ordering::Less
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Element, Tag};

    #[test]
    fn test_compare_points_across_nesting() {
        let mut tree = DocumentTree::default();
        let root = tree.root();
        let first = tree.create_text("ab");
        let span = tree.create_element(Element::new(Tag::Span));
        let inner = tree.create_text("cd");
        tree.append_child(root, first);
        tree.append_child(root, span);
        tree.append_child(span, inner);

        let in_first = BoundaryPoint::new(first, 1);
        let in_inner = BoundaryPoint::new(inner, 0);
        let before_span = BoundaryPoint::new(root, 1);
        let after_span = BoundaryPoint::new(root, 2);

        assert_eq!(compare_points(&tree, in_first, in_inner), Ordering::Less);
        assert_eq!(compare_points(&tree, before_span, in_inner), Ordering::Less);
        assert_eq!(compare_points(&tree, after_span, in_inner), Ordering::Greater);
        assert_eq!(compare_points(&tree, in_inner, after_span), Ordering::Less);
        assert_eq!(compare_points(&tree, before_span, before_span), Ordering::Equal);
    }
}
