//! Style Dispatcher: route a toolbar action to the updater or the wrapper

use super::updater::update_container;
use super::wrapper::wrap_selection;
use crate::config::StructuralContainers;
use crate::errors::{EditorError, Result};
use crate::models::{DocumentTree, NodeId, StyleAction};
use crate::selection::Selection;

/// Apply `action` to the current selection
///
/// Never fails: a missing or stale selection is logged and the call
/// becomes a no-op. Use [`try_apply_style_action`] to observe the reason.
pub fn apply_style_action(
    tree: &mut DocumentTree,
    selection: Option<&mut Selection>,
    action: &StyleAction,
    structural: &StructuralContainers,
) {
    if let Err(e) = try_apply_style_action(tree, selection, action, structural) {
        match e {
            EditorError::NoSelection => log::debug!("style action {:?} skipped: {}", action.token, e),
            _ => log::warn!("style action {:?} skipped: {}", action.token, e),
        }
    }
}

/// Apply `action`, reporting why nothing happened
pub fn try_apply_style_action(
    tree: &mut DocumentTree,
    selection: Option<&mut Selection>,
    action: &StyleAction,
    structural: &StructuralContainers,
) -> Result<()> {
    let selection = selection.ok_or(EditorError::NoSelection)?;
    check_boundaries(tree, selection)?;

    let container = tree.element_container(selection.anchor_node());
    if container.is_none() {
        log::debug!("dispatcher: {}", EditorError::UnresolvableContainer);
    }

    match container {
        Some(container) if is_toggle_target(tree, selection, container, action, structural) => {
            log::debug!("dispatcher: {:?} updates container {}", action.token, container);
            update_container(tree, selection, container, action);
        }
        _ => {
            log::debug!("dispatcher: {:?} wraps the selection", action.token);
            wrap_selection(tree, selection, container, action);
        }
    }

    log::info!("applied {:?}", action.token);
    Ok(())
}

/// The selection covers all of `container`'s text and `container` is a
/// styled non-structural element (or the action is a heading)
fn is_toggle_target(
    tree: &DocumentTree,
    selection: &Selection,
    container: NodeId,
    action: &StyleAction,
    structural: &StructuralContainers,
) -> bool {
    let Some(element) = tree.element(container) else {
        return false;
    };
    if structural.contains(&element.tag) {
        return false;
    }
    if !(element.has_token(action.token) || action.is_heading) {
        return false;
    }
    tree.visible_text(container) == selection.to_text(tree)
}

fn check_boundaries(tree: &DocumentTree, selection: &Selection) -> Result<()> {
    for point in [selection.anchor, selection.focus] {
        if !tree.contains(point.node) || !tree.is_attached(point.node) {
            return Err(EditorError::NodeNotFound(point.node));
        }
        if !point.is_valid(tree) {
            return Err(EditorError::InvalidBoundary {
                node: point.node,
                offset: point.offset,
            });
        }
    }
    Ok(())
}
