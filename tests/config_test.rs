// Configuration loading from YAML files and JSON strings

use std::io::Write;

use styled_editor_wasm::clipboard::{Selector, StyleProperty};
use styled_editor_wasm::models::Tag;
use styled_editor_wasm::{EditorConfig, EditorError, EditorState, StyleToken};

#[test]
fn test_yaml_file_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "structural_containers: [div, p]\n\
         class_names:\n  bold: strong-text\n\
         stylesheet:\n\
         \x20 - selector: .strong-text\n\
         \x20   declarations:\n\
         \x20     color: navy\n"
    )
    .unwrap();

    let config = EditorConfig::from_yaml_file(file.path()).unwrap();

    assert!(config.structural_containers.contains(&Tag::Paragraph));
    assert_eq!(config.class_names.class_for(StyleToken::Bold), "strong-text");
    assert_eq!(config.class_names.class_for(StyleToken::Italic), "italic-text");
    assert_eq!(config.stylesheet.len(), 1);
    assert_eq!(config.stylesheet[0].selector, Selector::Class("strong-text".to_string()));
    assert_eq!(
        config.stylesheet[0].declarations.get(&StyleProperty::Color).map(String::as_str),
        Some("navy")
    );
    assert!(!config.replace_default_stylesheet);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EditorConfig::from_yaml_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, EditorError::Config(_)));
}

#[test]
fn test_json_class_names_drive_markup() {
    let config = EditorConfig::from_json(r#"{"class_names": {"italic": "em"}}"#).unwrap();
    let state = EditorState::from_markup("<div><span class=\"em\">x</span></div>", config).unwrap();
    let span = state.tree.children(state.tree.root())[0];

    assert!(state.tree.element(span).unwrap().has_token(StyleToken::Italic));
    assert_eq!(state.markup(), "<span class=\"em\">x</span>");
}

#[test]
fn test_unknown_selector_is_rejected() {
    let err = EditorConfig::from_json(r#"{"stylesheet": [{"selector": "."}]}"#).unwrap_err();
    assert!(matches!(err, EditorError::Config(_)));
}
