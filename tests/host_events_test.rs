// Copy, cut, Enter and toolbar handling on an EditorState

mod common;

use common::{select, state, text_node};
use styled_editor_wasm::clipboard::{ComputedStyle, StyleProperty};
use styled_editor_wasm::models::{DocumentTree, NodeId};
use styled_editor_wasm::{BoundaryPoint, Selection, StyleResolver, ToolbarAction};

/// Stands in for the page: every element renders in one fixed colour
struct RenderedColour(&'static str);

impl StyleResolver for RenderedColour {
    fn computed_style(&self, _tree: &DocumentTree, _node: NodeId) -> ComputedStyle {
        let mut style = ComputedStyle::initial();
        style.set(StyleProperty::Color, self.0);
        style
    }
}

#[test]
fn test_cut_payload_reflects_tree_before_deletion() {
    let mut state = state("<div>hello <span class=\"bold-text\">bold</span> world</div>");
    let start = text_node(&state, "hello");
    let end = text_node(&state, "world");
    state.set_selection(Some(Selection::new(
        BoundaryPoint::new(start, 2),
        BoundaryPoint::new(end, 3),
    )));

    let event = state.handle_cut();

    assert!(event.prevent_default);
    let payload = event.payload.expect("cut always produces a payload");
    assert_eq!(payload.text, "llo bold wo");
    assert!(payload.html.starts_with("llo <span class=\"bold-text\" style=\""));
    assert!(payload.html.ends_with(">bold</span> wo"));

    assert_eq!(state.markup(), "herld");
    assert_eq!(state.tree.children(state.tree.root()).len(), 1);
    assert!(state.selection().unwrap().is_collapsed());
}

#[test]
fn test_copy_leaves_tree_untouched() {
    let mut state = state("<div>copy me</div>");
    select(&mut state, "me");

    let event = state.handle_copy();

    assert!(event.prevent_default);
    assert_eq!(event.payload.unwrap().html, "me");
    assert_eq!(state.markup(), "copy me");
}

#[test]
fn test_cut_with_collapsed_selection_deletes_nothing() {
    let mut state = state("<div>abc</div>");
    let text = text_node(&state, "abc");
    state.set_selection(Some(Selection::within(text, 1, 1)));

    let event = state.handle_cut();

    assert!(event.prevent_default);
    assert_eq!(event.payload.unwrap().html, "");
    assert_eq!(state.markup(), "abc");
}

#[test]
fn test_enter_replaces_selection_with_line_break() {
    let mut state = state("<div>one two</div>");
    select(&mut state, " ");

    assert!(state.handle_keydown("Enter").prevent_default);
    assert_eq!(state.markup(), "one<br>two");

    // Typing position sits right after the break
    let caret = state.selection().unwrap().anchor;
    assert_eq!(caret, BoundaryPoint::new(state.tree.root(), 2));
}

#[test]
fn test_enter_at_end_of_styled_run() {
    let mut state = state("<div><span class=\"italic-text\">abc</span></div>");
    let text = text_node(&state, "abc");
    state.set_selection(Some(Selection::within(text, 3, 3)));

    state.handle_keydown("Enter");

    assert_eq!(state.markup(), "<span class=\"italic-text\">abc<br></span>");
}

#[test]
fn test_toolbar_buttons_apply_their_styles() {
    let mut state = state("<div>abc def</div>");
    select(&mut state, "abc");
    state.handle_toolbar(ToolbarAction::Italic);
    assert_eq!(state.markup(), "<span class=\"italic-text\">abc</span> def");

    state.handle_toolbar(ToolbarAction::Heading1);
    assert_eq!(
        state.markup(),
        "<h1 class=\"header1-text italic-text\">abc</h1> def"
    );

    state.handle_toolbar(ToolbarAction::Bold);
    state.handle_toolbar(ToolbarAction::Heading1);
    state.handle_toolbar(ToolbarAction::Italic);
    assert_eq!(state.markup(), "<span class=\"bold-text\">abc</span> def");
}

#[test]
fn test_copy_and_cut_use_the_given_style_source() {
    let mut state = state("<div>a <span class=\"bold-text\">styled</span> b</div>");
    select(&mut state, "styled");

    let copied = state.handle_copy_with(&RenderedColour("rgb(10, 20, 30)"));
    let html = copied.payload.unwrap().html;
    assert!(html.contains("color: rgb(10, 20, 30);"));
    assert!(!html.contains("font-weight: 700;"));

    let cut = state.handle_cut_with(&RenderedColour("rgb(1, 2, 3)"));
    assert!(cut.payload.unwrap().html.contains("color: rgb(1, 2, 3);"));
    assert_eq!(state.text(), "a  b");
}
