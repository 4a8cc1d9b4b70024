//! Subtree normalization after a style edit
//!
//! Two passes keep the tree minimal:
//!
//! - **de-duplication** strips the just-applied token from descendants of the
//!   edited node, since an ancestor now carries it
//! - **flatten** collapses style-less wrappers back into plain text
//!
//! Both walk depth-first, handling all direct children of a node before
//! descending into any of them, and both run to completion before returning.

use crate::models::{DocumentTree, NodeId, StyleToken};

/// Strip `token` from every descendant of `root`
///
/// An element left with an empty token set simply renders without a class
/// attribute; there is no separate empty marker to clear.
pub fn dedupe_token(tree: &mut DocumentTree, token: StyleToken, root: NodeId) {
    let children = tree.children(root).to_vec();

    for child in &children {
        let stripped = tree
            .element_mut(*child)
            .is_some_and(|element| element.remove_token(token));
        if stripped {
            log::debug!("dedupe: removed redundant {:?} from {}", token, child);
        }
    }

    for child in children {
        dedupe_token(tree, token, child);
    }
}

/// What to do with a style-less wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlainWrapper {
    /// A descendant still carries the action's token; the wrapper stays
    Keep,
    /// Nothing styled inside; replace with its text
    Collapse,
    /// Only other tokens inside; splice the children into the parent
    Unwrap,
}

/// Classify `node` if it is a flattenable element with no style tokens
pub(crate) fn classify_plain_wrapper(
    tree: &DocumentTree,
    token: StyleToken,
    node: NodeId,
) -> Option<PlainWrapper> {
    let element = tree.element(node)?;
    if !element.is_unstyled() || !element.tag.is_flattenable() {
        return None;
    }

    if tree.subtree_has_token(node, token) {
        Some(PlainWrapper::Keep)
    } else if tree.subtree_has_style(node) {
        Some(PlainWrapper::Unwrap)
    } else {
        Some(PlainWrapper::Collapse)
    }
}

/// Replace `node` with a text node holding its text content
///
/// Returns the new text node, or None when there was no text and the node
/// was simply removed.
pub(crate) fn collapse_to_text(tree: &mut DocumentTree, node: NodeId) -> Option<NodeId> {
    let text = tree.text_content(node);
    if text.is_empty() {
        tree.detach(node);
        return None;
    }

    let replacement = tree.create_text(text);
    tree.replace(node, replacement);
    Some(replacement)
}

/// Collapse style-less wrappers below `root`, then merge adjacent text
pub fn flatten_plain_wrappers(tree: &mut DocumentTree, token: StyleToken, root: NodeId) {
    flatten_children(tree, token, root);
    tree.normalize_text(root, &mut []);
}

fn flatten_children(tree: &mut DocumentTree, token: StyleToken, root: NodeId) {
    let mut index = 0;
    while let Some(child) = tree.children(root).get(index).copied() {
        match classify_plain_wrapper(tree, token, child) {
            Some(PlainWrapper::Collapse) => {
                log::debug!("flatten: collapsing plain wrapper {} to text", child);
                if collapse_to_text(tree, child).is_some() {
                    index += 1;
                }
            }
            Some(PlainWrapper::Unwrap) => {
                // Spliced children land at `index` and are examined next
                log::debug!("flatten: unwrapping plain wrapper {}", child);
                tree.unwrap_children(child);
            }
            Some(PlainWrapper::Keep) | None => {
                flatten_children(tree, token, child);
                index += 1;
            }
        }
    }
}
