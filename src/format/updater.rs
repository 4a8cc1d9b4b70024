//! Selection Updater: toggle a token on an existing container in place

use super::normalize::{classify_plain_wrapper, collapse_to_text, dedupe_token, PlainWrapper};
use crate::models::{DocumentTree, NodeId, StyleAction};
use crate::selection::{BoundaryPoint, Selection};

/// Toggle `action`'s token directly on `container`
///
/// Heading tokens are exclusive: a matching level is cleared, any other
/// level is replaced. Inline marks are a plain presence toggle. The token is
/// then stripped from the container's descendants. A container left without
/// any token is folded back into its parent and the selection is remapped
/// onto the same characters.
pub(crate) fn update_container(
    tree: &mut DocumentTree,
    selection: &mut Selection,
    container: NodeId,
    action: &StyleAction,
) {
    let token = action.token;
    let Some(element) = tree.element_mut(container) else {
        log::warn!("update target {} is not an element", container);
        return;
    };

    match token.heading_level() {
        Some(level) if element.heading == Some(level) => {
            element.clear_heading();
            log::debug!("updater: cleared {:?} on {}", level, container);
        }
        Some(level) => {
            element.set_heading(level);
            log::debug!("updater: set {:?} on {}", level, container);
        }
        None if element.has_token(token) => {
            element.remove_token(token);
            log::debug!("updater: removed {:?} from {}", token, container);
        }
        None => {
            element.add_token(token);
            log::debug!("updater: added {:?} to {}", token, container);
        }
    }

    dedupe_token(tree, token, container);

    if container != tree.root() {
        fold_if_plain(tree, selection, container, action);
    }
}

/// Fold a container left without style tokens back into its parent
pub(crate) fn fold_if_plain(
    tree: &mut DocumentTree,
    selection: &mut Selection,
    container: NodeId,
    action: &StyleAction,
) {
    let (Some(parent), Some(index)) = (tree.parent(container), tree.index_in_parent(container))
    else {
        return;
    };

    match classify_plain_wrapper(tree, action.token, container) {
        Some(PlainWrapper::Collapse) => {
            match collapse_to_text(tree, container) {
                Some(text) => *selection = Selection::within(text, 0, tree.node_len(text)),
                None => selection.collapse_to(BoundaryPoint::new(parent, index)),
            }
            selection.normalize_within(tree, parent);
            log::debug!("updater: folded {} back into text", container);
        }
        Some(PlainWrapper::Unwrap) => {
            if let Some((parent, start, end)) = tree.unwrap_children(container) {
                *selection = Selection::new(
                    BoundaryPoint::new(parent, start),
                    BoundaryPoint::new(parent, end),
                );
                selection.normalize_within(tree, parent);
                log::debug!("updater: unwrapped {}", container);
            }
        }
        Some(PlainWrapper::Keep) | None => {}
    }
}
