//! Host-side event handling
//!
//! The edit area forwards copy, cut, keydown and toolbar events here. Each
//! handler works on the [`EditorState`] and reports what the platform should
//! do with the original event.

use serde::{Deserialize, Serialize};

use crate::clipboard::StyleResolver;
use crate::models::{EditorState, Element, StyleAction, StyleToken, Tag};
use crate::selection::{insert_node, BoundaryPoint, Selection};

/// Data placed on the clipboard
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    /// Styled fragment (`text/html`)
    pub html: String,
    /// Plain text of the same selection
    pub text: String,
}

/// Result of a copy or cut event
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClipboardEvent {
    pub payload: Option<ClipboardPayload>,
    pub prevent_default: bool,
}

/// Result of a keyboard event
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

/// The four toolbar buttons
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarAction {
    Heading1,
    Heading2,
    Bold,
    Italic,
}

impl ToolbarAction {
    pub fn style_action(self) -> StyleAction {
        match self {
            ToolbarAction::Heading1 => StyleAction::heading1(),
            ToolbarAction::Heading2 => StyleAction::heading2(),
            ToolbarAction::Bold => StyleAction::bold(),
            ToolbarAction::Italic => StyleAction::italic(),
        }
    }

    /// Button ids as used by the edit page (`head-1`, `bold`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "head-1" => Some(ToolbarAction::Heading1),
            "head-2" => Some(ToolbarAction::Heading2),
            other => StyleToken::from_name(other).map(|token| match token {
                StyleToken::Heading1 => ToolbarAction::Heading1,
                StyleToken::Heading2 => ToolbarAction::Heading2,
                StyleToken::Bold => ToolbarAction::Bold,
                StyleToken::Italic => ToolbarAction::Italic,
            }),
        }
    }
}

impl EditorState {
    /// Copy: put the styled fragment on the clipboard
    pub fn handle_copy(&self) -> ClipboardEvent {
        self.handle_copy_with(self.styles())
    }

    /// Copy with styles taken from `styles` (the live page, in a browser)
    pub fn handle_copy_with(&self, styles: &dyn StyleResolver) -> ClipboardEvent {
        ClipboardEvent {
            payload: Some(self.clipboard_payload(styles)),
            prevent_default: true,
        }
    }

    /// Cut: copy from the current tree, then delete the selected range
    pub fn handle_cut(&mut self) -> ClipboardEvent {
        let payload = self.clipboard_payload(self.styles());
        self.finish_cut(payload)
    }

    /// Cut with styles taken from `styles`
    pub fn handle_cut_with(&mut self, styles: &dyn StyleResolver) -> ClipboardEvent {
        let payload = self.clipboard_payload(styles);
        self.finish_cut(payload)
    }

    fn finish_cut(&mut self, payload: ClipboardPayload) -> ClipboardEvent {
        if let Some(selection) = self.selection.as_mut() {
            selection.delete_from_document(&mut self.tree);
            log::info!("cut {} char(s)", payload.text.chars().count());
        }

        ClipboardEvent {
            payload: Some(payload),
            prevent_default: true,
        }
    }

    /// Keydown: Enter inserts a line break instead of a new paragraph
    pub fn handle_keydown(&mut self, key: &str) -> EventOutcome {
        if key != "Enter" {
            return EventOutcome::default();
        }

        match self.selection.as_mut() {
            Some(selection) => {
                selection.delete_from_document(&mut self.tree);
                let br = self.tree.create_element(Element::new(Tag::LineBreak));
                insert_node(&mut self.tree, selection.anchor, br);
                match BoundaryPoint::after(&self.tree, br) {
                    Some(after) => *selection = Selection::caret(after),
                    None => log::warn!("line break {} was not inserted", br),
                }
                log::debug!("inserted line break {}", br);
            }
            None => log::debug!("Enter ignored: no selection"),
        }

        EventOutcome {
            prevent_default: true,
        }
    }

    /// Toolbar button: apply the matching style action
    pub fn handle_toolbar(&mut self, action: ToolbarAction) {
        log::debug!("toolbar: {:?}", action);
        self.apply(&action.style_action());
    }

    fn clipboard_payload(&self, styles: &dyn StyleResolver) -> ClipboardPayload {
        let text = self
            .selection
            .map(|selection| selection.to_text(&self.tree))
            .unwrap_or_default();
        ClipboardPayload {
            html: self.serialize_selection_with(styles),
            text,
        }
    }
}
