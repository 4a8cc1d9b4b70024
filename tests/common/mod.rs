// Shared helpers for building editor states from markup and checking tree shape

#![allow(dead_code)]

use styled_editor_wasm::models::{DocumentTree, NodeId, StyleToken};
use styled_editor_wasm::{EditorConfig, EditorState, Selection};

const ALL_TOKENS: [StyleToken; 4] = [
    StyleToken::Heading1,
    StyleToken::Heading2,
    StyleToken::Bold,
    StyleToken::Italic,
];

pub fn state(markup: &str) -> EditorState {
    EditorState::from_markup(markup, EditorConfig::default()).expect("markup should parse")
}

/// Text node containing `needle`
pub fn text_node(state: &EditorState, needle: &str) -> NodeId {
    state
        .tree
        .find_text_node(needle)
        .unwrap_or_else(|| panic!("no text node contains {:?}", needle))
}

/// Select `needle` inside the first text node that contains it
pub fn select(state: &mut EditorState, needle: &str) {
    let node = text_node(state, needle);
    let text = state.tree.text(node).unwrap_or_default();
    let byte = text.find(needle).unwrap_or(0);
    let start = text[..byte].chars().count();
    let end = start + needle.chars().count();
    state.set_selection(Some(Selection::within(node, start, end)));
}

/// No element repeats a token held by one of its ancestors
pub fn assert_no_redundant_nesting(tree: &DocumentTree) {
    for node in tree.descendants(tree.root()) {
        let Some(element) = tree.element(node) else {
            continue;
        };
        for token in element.tokens() {
            for ancestor in tree.ancestors(node) {
                let repeated = tree.element(ancestor).is_some_and(|a| a.has_token(token));
                assert!(!repeated, "{:?} on {} repeats ancestor {}", token, node, ancestor);
            }
        }
    }
}

/// No style-less inline wrapper survives without a styled descendant
pub fn assert_no_dangling_plain_wrappers(tree: &DocumentTree) {
    for node in tree.descendants(tree.root()) {
        let Some(element) = tree.element(node) else {
            continue;
        };
        if !element.is_unstyled() || !element.tag.is_flattenable() {
            continue;
        }
        let styled_below = ALL_TOKENS
            .iter()
            .any(|token| tree.subtree_has_token(node, *token));
        assert!(styled_below, "plain wrapper {} has no styled descendant", node);
    }
}

pub fn assert_minimal(tree: &DocumentTree) {
    assert_no_redundant_nesting(tree);
    assert_no_dangling_plain_wrappers(tree);
}
