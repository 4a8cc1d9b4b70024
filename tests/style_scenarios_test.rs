// Styling scenarios run end to end: markup in, action applied, markup out

mod common;

use common::{assert_minimal, select, state, text_node};
use styled_editor_wasm::models::{HeadingLevel, Tag};
use styled_editor_wasm::{
    apply_style_action, BoundaryPoint, Selection, StructuralContainers, StyleAction, StyleToken,
};

#[test]
fn test_bold_wraps_selected_substring() {
    let mut state = state("<div>hello world</div>");
    select(&mut state, "hello");

    state.apply(&StyleAction::bold());

    assert_eq!(state.markup(), "<span class=\"bold-text\">hello</span> world");
    assert_eq!(state.selection().unwrap().to_text(&state.tree), "hello");
    assert_minimal(&state.tree);
}

#[test]
fn test_bold_twice_restores_plain_text() {
    let mut state = state("<div>hello world</div>");
    let nodes_before = state.tree.attached_count();
    select(&mut state, "hello");

    state.apply(&StyleAction::bold());
    // The wrapper left the selection on the new element, so this takes the update path
    state.apply(&StyleAction::bold());

    assert_eq!(state.markup(), "hello world");
    assert_eq!(state.tree.children(state.tree.root()).len(), 1);
    assert!(state.tree.attached_count() <= nodes_before);
    assert_eq!(state.selection().unwrap().to_text(&state.tree), "hello");
    assert_minimal(&state.tree);
}

#[test]
fn test_italic_nests_inside_bold_without_repeating_bold() {
    let mut state = state("<div><span class=\"bold-text\">hello</span></div>");
    select(&mut state, "hello");

    state.apply(&StyleAction::italic());

    assert_eq!(
        state.markup(),
        "<span class=\"bold-text\"><span class=\"italic-text\">hello</span></span>"
    );
    assert_minimal(&state.tree);
}

#[test]
fn test_bold_on_part_of_bold_run_splits_it() {
    let mut state = state("<div><span class=\"bold-text\">hello world</span></div>");
    select(&mut state, "hello");

    state.apply(&StyleAction::bold());

    assert_eq!(state.markup(), "hello<span class=\"bold-text\"> world</span>");
    assert_eq!(state.selection().unwrap().to_text(&state.tree), "hello");
    assert_minimal(&state.tree);
}

#[test]
fn test_italic_off_inside_bold_italic_run_keeps_bold() {
    let mut state = state("<div><span class=\"bold-text italic-text\">abcdef</span></div>");
    select(&mut state, "cd");

    state.apply(&StyleAction::italic());

    assert_eq!(
        state.markup(),
        "<span class=\"bold-text italic-text\">ab</span>\
         <span class=\"bold-text\">cd</span>\
         <span class=\"bold-text italic-text\">ef</span>"
    );
    assert_minimal(&state.tree);
}

#[test]
fn test_bold_off_inside_nested_run_keeps_inner_italic() {
    let mut state = state("<div><span class=\"bold-text\"><span class=\"italic-text\">abcd</span></span></div>");
    select(&mut state, "bc");

    state.apply(&StyleAction::bold());

    assert_eq!(
        state.markup(),
        "<span class=\"bold-text\"><span class=\"italic-text\">a</span></span>\
         <span class=\"italic-text\">bc</span>\
         <span class=\"bold-text\"><span class=\"italic-text\">d</span></span>"
    );
    assert_eq!(state.selection().unwrap().to_text(&state.tree), "bc");
    assert_minimal(&state.tree);
}

#[test]
fn test_bold_off_on_whole_inner_run_leaves_no_empty_halves() {
    let mut state = state("<div><span class=\"bold-text\">x<span class=\"italic-text\">abcd</span></span></div>");
    select(&mut state, "abcd");

    state.apply(&StyleAction::bold());

    assert_eq!(
        state.markup(),
        "<span class=\"bold-text\">x</span><span class=\"italic-text\">abcd</span>"
    );
    assert_eq!(state.selection().unwrap().to_text(&state.tree), "abcd");
    assert_minimal(&state.tree);
}

#[test]
fn test_heading_off_inside_heading_keeps_bold() {
    let mut state = state("<div><h1><span class=\"bold-text\">abcd</span></h1></div>");
    select(&mut state, "bc");

    state.apply(&StyleAction::heading1());

    assert_eq!(
        state.markup(),
        "<h1 class=\"header1-text\"><span class=\"bold-text\">a</span></h1>\
         <span class=\"bold-text\">bc</span>\
         <h1 class=\"header1-text\"><span class=\"bold-text\">d</span></h1>"
    );
    assert_minimal(&state.tree);
}

#[test]
fn test_italic_on_exact_wrap_contents_updates_the_wrap() {
    let mut state = state("<div><span class=\"bold-text\">title</span> rest</div>");
    let span = state.tree.children(state.tree.root())[0];
    state.set_selection(Some(Selection::new(
        BoundaryPoint::new(span, 0),
        BoundaryPoint::new(span, 1),
    )));

    state.apply(&StyleAction::italic());

    let element = state.tree.element(span).unwrap();
    assert_eq!(element.tokens(), vec![StyleToken::Bold, StyleToken::Italic]);
    assert_eq!(state.tree.children(span).len(), 1);
    assert!(state.tree.is_text(state.tree.children(span)[0]));
    assert_eq!(
        state.markup(),
        "<span class=\"bold-text italic-text\">title</span> rest"
    );
    assert_minimal(&state.tree);
}

#[test]
fn test_heading_on_whole_run_retags_wrapper() {
    let mut state = state("<div><span class=\"bold-text\">title</span> rest</div>");
    let span = state.tree.children(state.tree.root())[0];
    state.set_selection(Some(Selection::new(
        BoundaryPoint::new(span, 0),
        BoundaryPoint::new(span, 1),
    )));

    state.apply(&StyleAction::heading1());
    assert_eq!(
        state.markup(),
        "<h1 class=\"header1-text bold-text\">title</h1> rest"
    );

    // A different level replaces, the same level toggles off
    state.apply(&StyleAction::heading2());
    let element = state.tree.element(span).unwrap();
    assert_eq!(element.tag, Tag::Heading(HeadingLevel::H2));
    assert_eq!(element.tokens(), vec![StyleToken::Heading2, StyleToken::Bold]);

    state.apply(&StyleAction::heading2());
    assert_eq!(state.markup(), "<span class=\"bold-text\">title</span> rest");
    assert_minimal(&state.tree);
}

#[test]
fn test_heading_on_plain_text_wraps_in_heading_tag() {
    let mut state = state("<div>intro body</div>");
    select(&mut state, "intro");

    state.apply(&StyleAction::heading2());

    assert_eq!(state.markup(), "<h2 class=\"header2-text\">intro</h2> body");
}

#[test]
fn test_wrapping_styled_runs_strips_inner_duplicates() {
    let mut state = state(
        "<div>a <span class=\"bold-text\">b</span> c <span class=\"italic-text\">d</span> e</div>",
    );
    let start = text_node(&state, "a ");
    let end = text_node(&state, " e");
    state.set_selection(Some(Selection::new(
        BoundaryPoint::new(start, 0),
        BoundaryPoint::new(end, 2),
    )));

    state.apply(&StyleAction::bold());

    assert_eq!(
        state.markup(),
        "<span class=\"bold-text\">a b c <span class=\"italic-text\">d</span> e</span>"
    );
    assert_minimal(&state.tree);
}

#[test]
fn test_selection_across_line_break_keeps_break() {
    let mut state = state("<div>one<br>two</div>");
    let start = text_node(&state, "one");
    let end = text_node(&state, "two");
    state.set_selection(Some(Selection::new(
        BoundaryPoint::new(start, 1),
        BoundaryPoint::new(end, 2),
    )));

    state.apply(&StyleAction::italic());

    assert_eq!(
        state.markup(),
        "o<span class=\"italic-text\">ne<br>tw</span>o"
    );
    assert_eq!(state.text(), "one\ntwo");
    assert_minimal(&state.tree);
}

#[test]
fn test_collapsed_selection_creates_empty_styled_wrapper() {
    let mut state = state("<div>abc</div>");
    let text = text_node(&state, "abc");
    state.set_selection(Some(Selection::within(text, 1, 1)));

    state.apply(&StyleAction::bold());

    assert_eq!(state.markup(), "a<span class=\"bold-text\"></span>bc");
}

#[test]
fn test_structural_container_is_never_toggled() {
    let mut state = state("<div><p>whole paragraph</p></div>");
    let p = state.tree.children(state.tree.root())[0];
    state.set_selection(Some(Selection::new(
        BoundaryPoint::new(p, 0),
        BoundaryPoint::new(p, 1),
    )));

    let mut selection = state.selection;
    apply_style_action(
        &mut state.tree,
        selection.as_mut(),
        &StyleAction::heading1(),
        &StructuralContainers::parse("div,p"),
    );

    assert!(state.tree.element(p).unwrap().is_unstyled());
    assert_eq!(
        state.markup(),
        "<p><h1 class=\"header1-text\">whole paragraph</h1></p>"
    );
}

#[test]
fn test_repeated_actions_keep_tree_minimal() {
    let mut state = state("<div>the quick brown fox jumps</div>");
    let actions = [
        ("quick brown", StyleAction::bold()),
        ("brown", StyleAction::italic()),
        ("quick", StyleAction::bold()),
        ("fox", StyleAction::italic()),
        ("jumps", StyleAction::heading1()),
        ("the", StyleAction::bold()),
    ];

    for (needle, action) in actions {
        select(&mut state, needle);
        state.apply(&action);
        assert_minimal(&state.tree);
        assert_eq!(state.text(), "the quick brown fox jumps");
    }
}

#[test]
fn test_no_selection_leaves_tree_untouched() {
    let mut state = state("<div>hello <span class=\"italic-text\">x</span></div>");
    let before = state.markup();

    state.clear_selection();
    state.apply(&StyleAction::bold());

    assert_eq!(state.markup(), before);
}
