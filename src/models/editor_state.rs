//! Editor state management
//!
//! This module contains the EditorState struct which represents the complete
//! state of one edit area: the document tree, the current selection, and the
//! configuration that shapes styling and clipboard export.

use crate::clipboard::{serialize_selection, CascadeStyleResolver, StyleResolver};
use crate::config::EditorConfig;
use crate::errors::Result;
use crate::format::apply_style_action;
use crate::models::{DocumentTree, StyleAction};
use crate::renderers::markup::render_inner;
use crate::selection::Selection;

/// Complete editor state
#[derive(Clone, Debug)]
pub struct EditorState {
    /// The document being edited
    pub tree: DocumentTree,

    /// Current selection (if any)
    pub selection: Option<Selection>,

    config: EditorConfig,

    /// Resolves effective styles for clipboard export
    styles: CascadeStyleResolver,
}

impl EditorState {
    /// Create a new editor state over a document
    pub fn new(tree: DocumentTree, config: EditorConfig) -> Self {
        let styles = CascadeStyleResolver::from_config(&config);
        Self {
            tree,
            selection: None,
            config,
            styles,
        }
    }

    /// Load the document from markup
    pub fn from_markup(markup: &str, config: EditorConfig) -> Result<Self> {
        let tree = DocumentTree::from_markup(markup, &config.class_names)?;
        Ok(Self::new(tree, config))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the configuration; the style resolver is rebuilt
    pub fn set_config(&mut self, config: EditorConfig) {
        self.styles = CascadeStyleResolver::from_config(&config);
        self.config = config;
    }

    pub fn styles(&self) -> &CascadeStyleResolver {
        &self.styles
    }

    /// Get the current selection (if any)
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Set the selection
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Apply a style action to the current selection
    pub fn apply(&mut self, action: &StyleAction) {
        apply_style_action(
            &mut self.tree,
            self.selection.as_mut(),
            action,
            &self.config.structural_containers,
        );
    }

    /// Styled fragment for the current selection
    pub fn serialize_selection(&self) -> String {
        self.serialize_selection_with(&self.styles)
    }

    /// Styled fragment, with styles read from `styles` instead of the
    /// configured stylesheet
    pub fn serialize_selection_with(&self, styles: &dyn StyleResolver) -> String {
        serialize_selection(
            &self.tree,
            self.selection.as_ref(),
            styles,
            &self.config.class_names,
        )
    }

    /// Markup of the edit area's contents
    pub fn markup(&self) -> String {
        render_inner(&self.tree, self.tree.root(), &self.config.class_names)
    }

    /// The document's text, with line breaks as newlines
    pub fn text(&self) -> String {
        self.tree.visible_text(self.tree.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StyleToken;

    #[test]
    fn test_apply_without_selection_is_noop() {
        let mut state = EditorState::from_markup("<div>hello</div>", EditorConfig::default()).unwrap();
        let before = state.markup();
        state.apply(&StyleAction::bold());
        assert_eq!(state.markup(), before);
        assert_eq!(state.serialize_selection(), "");
    }

    #[test]
    fn test_config_swap_rebuilds_styles() {
        let mut state = EditorState::new(DocumentTree::default(), EditorConfig::default());
        assert!(!state.styles().rules().is_empty());

        let config = EditorConfig {
            replace_default_stylesheet: true,
            ..EditorConfig::default()
        };
        state.set_config(config);
        assert!(state.styles().rules().is_empty());
        assert_eq!(
            state.config().class_names.class_for(StyleToken::Italic),
            "italic-text"
        );
    }
}
