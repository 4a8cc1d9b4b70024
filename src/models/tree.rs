//! Arena-backed document tree
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. Parent
//! links are plain ids, so they never own anything. Detaching a node only
//! unlinks it; the slot stays in the arena so ids handed out earlier remain
//! valid (the node is just no longer reachable from the root).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::action::StyleToken;
use super::node::{Element, NodeKind, Tag};
use crate::selection::BoundaryPoint;
use crate::utils::{char_len, char_to_byte, slice_chars};

/// Address of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One arena slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

/// The live, editable document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new(Tag::Div)
    }
}

impl DocumentTree {
    /// Create a tree holding only a root element
    pub fn new(root_tag: Tag) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Element(Element::new(root_tag)),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Make the element `id` the new root; the old root becomes unreachable
    pub fn set_root(&mut self, id: NodeId) {
        if !self.is_element(id) {
            log::warn!("cannot use non-element {} as root", id);
            return;
        }
        self.detach(id);
        self.root = id;
    }

    /// Whether the id was minted by this tree
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|node| &node.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.node_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.text(id).is_some()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Replace the payload of a text node; ignored for elements
    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(Node {
            kind: NodeKind::Text(text),
            ..
        }) = self.node_mut(id)
        {
            *text = value.into();
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    // ============================================================================
    // Construction and structural mutation
    // ============================================================================

    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push(NodeKind::Element(element))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Copy a node without its children; the copy is detached
    pub fn shallow_clone(&mut self, id: NodeId) -> Option<NodeId> {
        let kind = self.kind(id)?.clone();
        Some(self.push(kind))
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child);
    }

    /// Insert `child` before `reference` (or at the end when `reference` is None)
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let index = reference
            .and_then(|r| self.children(parent).iter().position(|c| *c == r))
            .unwrap_or(self.children(parent).len());
        self.insert_child(parent, index, child);
    }

    /// Insert `child` at `index` among `parent`'s children
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            log::warn!("insert_child ignored: parent={} child={}", parent, child);
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            log::warn!("insert_child ignored: {} is an ancestor of {}", child, parent);
            return;
        }

        let mut index = index;
        if self.parent(child) == Some(parent) {
            if let Some(current) = self.index_in_parent(child) {
                if current < index {
                    index -= 1;
                }
            }
        }
        self.detach(child);

        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Unlink a node from its parent
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.nodes[parent.0].children.retain(|c| *c != id);
        self.nodes[id.0].parent = None;
    }

    /// Put `new` where `old` is and detach `old`
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        let (Some(parent), Some(index)) = (self.parent(old), self.index_in_parent(old)) else {
            return;
        };
        self.detach(old);
        self.insert_child(parent, index, new);
    }

    /// Splice a node's children into its parent in place of the node
    ///
    /// Returns the parent and the index range the children now occupy.
    pub fn unwrap_children(&mut self, id: NodeId) -> Option<(NodeId, usize, usize)> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        let children = self.children(id).to_vec();

        self.detach(id);
        for (offset, child) in children.iter().enumerate() {
            self.insert_child(parent, index + offset, *child);
        }

        Some((parent, index, index + children.len()))
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index_in_parent(id)?;
        let parent = self.parent(id)?;
        index.checked_sub(1).map(|i| self.children(parent)[i])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index_in_parent(id)?;
        let parent = self.parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Boundary length: chars for text, child count for elements
    pub fn node_len(&self, id: NodeId) -> usize {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => char_len(text),
            Some(NodeKind::Element(_)) => self.children(id).len(),
            None => 0,
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, false, &mut out);
        out
    }

    /// Text as the user sees it: line breaks contribute a newline
    pub fn visible_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, true, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, line_breaks: bool, out: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => out.push_str(text),
            Some(NodeKind::Element(element)) => {
                if line_breaks && element.tag.is_line_break() {
                    out.push('\n');
                }
                for child in self.children(id) {
                    self.collect_text(*child, line_breaks, out);
                }
            }
            None => {}
        }
    }

    /// All descendants in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Ancestors from the parent up to the top of the node's tree
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.ancestors(id).any(|a| a == self.root)
    }

    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// The node itself if it is an element, else its nearest element ancestor
    pub fn element_container(&self, id: NodeId) -> Option<NodeId> {
        if self.is_element(id) {
            return Some(id);
        }
        self.ancestors(id).find(|a| self.is_element(*a))
    }

    /// Child of `ancestor` that contains `descendant`
    pub fn child_toward(&self, ancestor: NodeId, descendant: NodeId) -> Option<NodeId> {
        let mut current = descendant;
        loop {
            let parent = self.parent(current)?;
            if parent == ancestor {
                return Some(current);
            }
            current = parent;
        }
    }

    /// Nearest node containing both `a` and `b`
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let chain: Vec<NodeId> = std::iter::once(a).chain(self.ancestors(a)).collect();
        std::iter::once(b)
            .chain(self.ancestors(b))
            .find(|candidate| chain.contains(candidate))
    }

    /// Child indices leading from the top of the node's tree to the node
    pub fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(index) = self.index_in_parent(current) {
            path.push(index);
            match self.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Resolve a child-index path from the root
    pub fn node_at_path(&self, path: &[usize]) -> Option<NodeId> {
        path.iter()
            .try_fold(self.root, |current, index| self.children(current).get(*index).copied())
    }

    /// Document order of two nodes; ancestors precede descendants
    pub fn tree_order(&self, a: NodeId, b: NodeId) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        self.path(a).cmp(&self.path(b))
    }

    /// Whether any descendant (not the node itself) carries `token`
    pub fn subtree_has_token(&self, id: NodeId, token: StyleToken) -> bool {
        self.descendants(id)
            .into_iter()
            .any(|d| self.element(d).is_some_and(|e| e.has_token(token)))
    }

    /// Whether any descendant carries any style token
    pub fn subtree_has_style(&self, id: NodeId) -> bool {
        self.descendants(id)
            .into_iter()
            .any(|d| self.element(d).is_some_and(|e| !e.is_unstyled()))
    }

    /// First attached text node whose text contains `needle`
    pub fn find_text_node(&self, needle: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.text(*id).is_some_and(|t| t.contains(needle)))
    }

    // ============================================================================
    // Text editing
    // ============================================================================

    /// Split a text node at a char offset
    ///
    /// The original keeps `[0, offset)`; the new node holding the rest is
    /// inserted right after it and returned.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Option<NodeId> {
        let text = self.text(id)?.to_string();
        let byte = char_to_byte(&text, offset);
        let tail = self.create_text(&text[byte..]);
        self.set_text(id, &text[..byte]);

        if let (Some(parent), Some(index)) = (self.parent(id), self.index_in_parent(id)) {
            self.insert_child(parent, index + 1, tail);
        }
        Some(tail)
    }

    /// Cut `[start, end)` out of a text node into a new detached text node
    pub fn take_text_range(&mut self, id: NodeId, start: usize, end: usize) -> Option<NodeId> {
        let text = self.text(id)?.to_string();
        let taken = slice_chars(&text, start, end).to_string();
        let start_byte = char_to_byte(&text, start);
        let end_byte = char_to_byte(&text, end.max(start));

        let mut remaining = String::with_capacity(text.len() - taken.len());
        remaining.push_str(&text[..start_byte]);
        remaining.push_str(&text[end_byte..]);
        self.set_text(id, remaining);

        Some(self.create_text(taken))
    }

    /// Merge adjacent text nodes and drop empty ones below `id`
    ///
    /// Boundary points that refer to merged or removed nodes are remapped so
    /// they keep addressing the same characters.
    pub fn normalize_text(&mut self, id: NodeId, points: &mut [BoundaryPoint]) {
        if !self.is_element(id) {
            return;
        }

        let mut index = 0;
        while let Some(child) = self.children(id).get(index).copied() {
            let Some(text) = self.text(child) else {
                self.normalize_text(child, points);
                index += 1;
                continue;
            };

            if text.is_empty() {
                for point in points.iter_mut() {
                    if point.node == child {
                        *point = BoundaryPoint::new(id, index);
                    } else if point.node == id && point.offset > index {
                        point.offset -= 1;
                    }
                }
                self.detach(child);
                continue;
            }

            while let Some(next) = self
                .children(id)
                .get(index + 1)
                .copied()
                .filter(|n| self.is_text(*n))
            {
                let head = self.text(child).unwrap_or_default().to_string();
                let tail = self.text(next).unwrap_or_default().to_string();
                let head_len = char_len(&head);

                for point in points.iter_mut() {
                    if point.node == next {
                        *point = BoundaryPoint::new(child, head_len + point.offset);
                    } else if point.node == id && point.offset == index + 1 {
                        *point = BoundaryPoint::new(child, head_len);
                    } else if point.node == id && point.offset > index + 1 {
                        point.offset -= 1;
                    }
                }

                self.set_text(child, head + &tail);
                self.detach(next);
            }

            index += 1;
        }
    }

    /// Nodes reachable from the root, including the root
    pub fn attached_count(&self) -> usize {
        self.descendants(self.root).len() + 1
    }
}
