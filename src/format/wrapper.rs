//! Selection Wrapper: move the selected range into a new styled element

use super::normalize::{dedupe_token, flatten_plain_wrappers};
use super::updater::{fold_if_plain, update_container};
use crate::models::{DocumentTree, Element, NodeId, StyleAction, StyleToken};
use crate::selection::{insert_node, prune_empty_siblings, prune_if_empty, BoundaryPoint, Selection};

/// Wrap the selected range in a new element carrying `action`'s token
///
/// `container` is the dispatcher's container guess and is only used for
/// diagnostics. When the range's common ancestor is already a wrap element
/// the update happens on that element instead. Afterwards the selection
/// covers the new element's entire contents.
pub(crate) fn wrap_selection(
    tree: &mut DocumentTree,
    selection: &mut Selection,
    container: Option<NodeId>,
    action: &StyleAction,
) {
    let range = selection.range(tree);

    if let Some(ancestor) = range.common_ancestor(tree) {
        if tree.element(ancestor).is_some_and(|e| e.tag.is_wrap()) {
            log::debug!("wrapper: common ancestor {} is a wrap, updating it", ancestor);
            update_container(tree, selection, ancestor, action);
            return;
        }
    }

    let (fragment, point) = range.extract_contents(tree);
    log::debug!(
        "wrapper: extracted {} node(s) near container {:?}",
        fragment.len(),
        container
    );

    if let Some(styled) = styled_ancestor(tree, point, action.token) {
        unstyle_subrange(tree, selection, fragment, point, styled, action);
        return;
    }

    let wrapper = tree.create_element(Element::for_token(action.token));
    for node in fragment {
        tree.append_child(wrapper, node);
    }

    dedupe_token(tree, action.token, wrapper);
    flatten_plain_wrappers(tree, action.token, wrapper);

    insert_node(tree, point, wrapper);
    prune_empty_siblings(tree, wrapper);
    selection.select_all_children(tree, wrapper);
    log::debug!("wrapper: inserted {} for {:?}", wrapper, action.token);
}

/// Nearest ancestor of `point` (below the root) already carrying `token`
fn styled_ancestor(tree: &DocumentTree, point: BoundaryPoint, token: StyleToken) -> Option<NodeId> {
    let start = tree.element_container(point.node)?;
    let root = tree.root();
    std::iter::once(start)
        .chain(tree.ancestors(start))
        .take_while(|node| *node != root)
        .find(|node| tree.element(*node).is_some_and(|e| e.has_token(token)))
}

/// Take `token` off a sub-range of an element that already carries it
///
/// The styled ancestor and every element between it and the extraction
/// point are split, and the fragment goes in between, re-wrapped in copies
/// of that whole chain with only the token removed. Nesting a second copy of
/// the token would be redundant.
fn unstyle_subrange(
    tree: &mut DocumentTree,
    selection: &mut Selection,
    fragment: Vec<NodeId>,
    point: BoundaryPoint,
    styled: NodeId,
    action: &StyleAction,
) {
    let Some(split) = split_up_to(tree, point, styled) else {
        log::warn!("wrapper: could not split {} at {:?}", styled, point);
        return;
    };
    let Some(middle) = rebuild_chain(tree, &split.chain, action.token) else {
        return;
    };
    let mut innermost = middle;
    while let Some(child) = tree.children(innermost).first().copied() {
        innermost = child;
    }
    for node in fragment {
        tree.append_child(innermost, node);
    }

    dedupe_token(tree, action.token, middle);
    flatten_plain_wrappers(tree, action.token, middle);

    insert_node(tree, split.point, middle);
    for half in split.halves {
        if prune_if_empty(tree, half) {
            log::debug!("wrapper: pruned empty split half {}", half);
        }
    }
    prune_empty_siblings(tree, middle);
    selection.select_all_children(tree, middle);
    log::debug!("wrapper: removed {:?} from a sub-range of {}", action.token, styled);

    fold_if_plain(tree, selection, middle, action);
}

/// Outcome of [`split_up_to`]
struct Split {
    /// Point in the ancestor's parent between the two halves
    point: BoundaryPoint,
    /// Split elements, innermost first, ending with the ancestor
    chain: Vec<NodeId>,
    /// Every node left on either side of a cut, innermost first
    halves: Vec<NodeId>,
}

/// Split every element from `point` up to and including `ancestor`
///
/// At each level the original node keeps the left half and a shallow copy
/// inserted after it takes the right half.
fn split_up_to(tree: &mut DocumentTree, point: BoundaryPoint, ancestor: NodeId) -> Option<Split> {
    let mut point = point;
    let mut halves = Vec::new();

    if tree.is_text(point.node) {
        let text = point.node;
        let len = tree.node_len(text);
        halves.push(text);
        point = if point.offset == 0 {
            BoundaryPoint::before(tree, text)?
        } else if point.offset >= len {
            BoundaryPoint::after(tree, text)?
        } else {
            let tail = tree.split_text(text, point.offset)?;
            halves.push(tail);
            BoundaryPoint::before(tree, tail)?
        };
    }

    let mut chain = Vec::new();
    loop {
        let element = point.node;
        let right = tree.shallow_clone(element)?;
        let moving = tree
            .children(element)
            .get(point.offset..)
            .unwrap_or(&[])
            .to_vec();
        for child in moving {
            tree.append_child(right, child);
        }

        let boundary = BoundaryPoint::after(tree, element)?;
        tree.insert_child(boundary.node, boundary.offset, right);
        chain.push(element);
        halves.push(element);
        halves.push(right);

        if element == ancestor {
            return Some(Split {
                point: boundary,
                chain,
                halves,
            });
        }
        point = boundary;
    }
}

/// Nest shallow copies of `chain` (innermost first) with `token` removed
///
/// Returns the outermost copy; each copy's only child is the next one in.
fn rebuild_chain(tree: &mut DocumentTree, chain: &[NodeId], token: StyleToken) -> Option<NodeId> {
    let mut inner: Option<NodeId> = None;
    for element in chain {
        let copy = tree.shallow_clone(*element)?;
        if let Some(e) = tree.element_mut(copy) {
            e.remove_token(token);
        }
        if let Some(child) = inner {
            tree.append_child(copy, child);
        }
        inner = Some(copy);
    }
    inner
}
