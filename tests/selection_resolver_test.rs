// Selection source priority

use styled_editor_wasm::selection::{
    FixedSelection, SelectionResolver, SelectionSourceKind,
};
use styled_editor_wasm::{BoundaryPoint, DocumentTree, Selection};

fn sample_selection() -> Selection {
    let mut tree = DocumentTree::default();
    let text = tree.create_text("abc");
    tree.append_child(tree.root(), text);
    Selection::new(BoundaryPoint::new(text, 0), BoundaryPoint::new(text, 2))
}

#[test]
fn test_window_source_wins_over_document() {
    let selection = sample_selection();
    let other = Selection::caret(selection.anchor);
    let document = FixedSelection::new(SelectionSourceKind::Document, Some(other));
    let window = FixedSelection::new(SelectionSourceKind::Window, Some(selection));

    let resolved = SelectionResolver::new()
        .with_source(&document)
        .with_source(&window)
        .resolve();

    assert_eq!(resolved, Some(selection));
}

#[test]
fn test_unavailable_sources_are_skipped() {
    let selection = sample_selection();
    let window = FixedSelection::unavailable(SelectionSourceKind::Window);
    let document = FixedSelection::unavailable(SelectionSourceKind::Document);
    let legacy = FixedSelection::new(SelectionSourceKind::LegacyTextRange, Some(selection));

    let resolved = SelectionResolver::new()
        .with_source(&legacy)
        .with_source(&window)
        .with_source(&document)
        .resolve();

    assert_eq!(resolved, Some(selection));
}

#[test]
fn test_available_source_without_selection_is_final() {
    let selection = sample_selection();
    let window = FixedSelection::new(SelectionSourceKind::Window, None);
    let document = FixedSelection::new(SelectionSourceKind::Document, Some(selection));

    let resolved = SelectionResolver::new()
        .with_source(&window)
        .with_source(&document)
        .resolve();

    assert_eq!(resolved, None);
}

#[test]
fn test_no_sources_resolve_to_none() {
    assert_eq!(SelectionResolver::new().resolve(), None);
}
