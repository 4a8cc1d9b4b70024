//! `RichTextEditor`: the JavaScript-facing editor bound to an edit area
//!
//! Every call captures the edit area into a fresh [`EditorState`], resolves
//! the platform selection, runs the operation, and (for mutating calls)
//! re-renders the edit area and restores the selection.

use wasm_bindgen::prelude::*;

use crate::config::EditorConfig;
use crate::host::ToolbarAction;
use crate::models::{EditorState, StyleAction, StyleToken};
use crate::selection::SelectionResolver;
use crate::{wasm_info, wasm_log, wasm_warn};

use super::helpers::{deserialize, editor_error, serialize};
use super::platform::{
    capture, restore_selection, DocumentSelectionSource, DomMap, DomStyleResolver,
    LegacyTextRangeSource, WindowSelectionSource,
};

#[wasm_bindgen]
pub struct RichTextEditor {
    edit_area: web_sys::HtmlElement,
    config: EditorConfig,
}

#[wasm_bindgen]
impl RichTextEditor {
    /// Bind to an edit area; `config` may be undefined for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(edit_area: web_sys::HtmlElement, config: JsValue) -> Result<RichTextEditor, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            deserialize::<EditorConfig>(config, "Invalid editor config")?
        };
        wasm_info!(
            "RichTextEditor bound to <{}>, structural containers {:?}",
            edit_area.tag_name().to_ascii_lowercase(),
            config.structural_containers.names()
        );
        Ok(RichTextEditor { edit_area, config })
    }

    /// Apply a style token by name (`heading-1`, `heading-2`, `bold`, `italic`)
    #[wasm_bindgen(js_name = applyStyle)]
    pub fn apply_style(&self, token: &str) -> Result<(), JsValue> {
        let token = StyleToken::from_name(token)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown style token: {}", token)))?;
        let (mut state, _) = self.session();
        state.apply(&StyleAction::from(token));
        self.commit(&state);
        Ok(())
    }

    /// Toolbar button by id (`head-1`, `head-2`, `bold`, `italic`)
    #[wasm_bindgen(js_name = toolbar)]
    pub fn toolbar(&self, button: &str) -> Result<(), JsValue> {
        let action = ToolbarAction::from_name(button)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown toolbar button: {}", button)))?;
        let (mut state, _) = self.session();
        state.handle_toolbar(action);
        self.commit(&state);
        Ok(())
    }

    /// Copy handler; returns `{ payload: { html, text }, prevent_default }`
    #[wasm_bindgen(js_name = copy)]
    pub fn copy(&self) -> Result<JsValue, JsValue> {
        let (state, map) = self.session();
        let styles = DomStyleResolver::new(&map, state.styles().clone());
        let event = state.handle_copy_with(&styles);
        wasm_log!("copy: {} byte(s) of markup", event.payload.as_ref().map_or(0, |p| p.html.len()));
        serialize(&event, "ClipboardEvent serialization error")
    }

    /// Cut handler; the payload reflects the document before deletion
    #[wasm_bindgen(js_name = cut)]
    pub fn cut(&self) -> Result<JsValue, JsValue> {
        let (mut state, map) = self.session();
        let styles = DomStyleResolver::new(&map, state.styles().clone());
        let event = state.handle_cut_with(&styles);
        self.commit(&state);
        serialize(&event, "ClipboardEvent serialization error")
    }

    /// Keydown handler; returns whether the default action must be prevented
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str) -> bool {
        if key != "Enter" {
            return false;
        }
        let (mut state, _) = self.session();
        let outcome = state.handle_keydown(key);
        self.commit(&state);
        outcome.prevent_default
    }

    /// Styled fragment for the current selection, with rendered styles
    #[wasm_bindgen(js_name = serializeSelection)]
    pub fn serialize_selection(&self) -> String {
        let (state, map) = self.session();
        let styles = DomStyleResolver::new(&map, state.styles().clone());
        state.serialize_selection_with(&styles)
    }

    /// Replace the configuration
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        self.config = deserialize::<EditorConfig>(config, "Invalid editor config")?;
        Ok(())
    }

    /// Replace the configuration from YAML text
    #[wasm_bindgen(js_name = setConfigYaml)]
    pub fn set_config_yaml(&mut self, yaml: &str) -> Result<(), JsValue> {
        self.config = EditorConfig::from_yaml(yaml)
            .map_err(|e| editor_error("setConfigYaml", e))?;
        Ok(())
    }
}

impl RichTextEditor {
    /// Capture the edit area and resolve the platform selection
    ///
    /// The map stays valid for styles until the state is mutated.
    fn session(&self) -> (EditorState, DomMap) {
        let (tree, map) = capture(&self.edit_area, &self.config.class_names);

        let window = WindowSelectionSource { tree: &tree, map: &map };
        let document = DocumentSelectionSource { tree: &tree, map: &map };
        let legacy = LegacyTextRangeSource;
        let selection = SelectionResolver::new()
            .with_source(&window)
            .with_source(&document)
            .with_source(&legacy)
            .resolve();

        let mut state = EditorState::new(tree, self.config.clone());
        state.set_selection(selection);
        (state, map)
    }

    /// Re-render the edit area and put the platform selection back
    fn commit(&self, state: &EditorState) {
        let mut tree = state.tree.clone();
        let root = tree.root();
        let mut selection = state.selection;
        match selection.as_mut() {
            Some(selection) => selection.normalize_within(&mut tree, root),
            None => tree.normalize_text(root, &mut []),
        }

        let markup = crate::renderers::markup::render_inner(&tree, root, &self.config.class_names);
        self.edit_area.set_inner_html(&markup);

        if let Some(selection) = selection {
            if let Err(e) = restore_selection(&self.edit_area, &tree, &selection) {
                wasm_warn!("could not restore selection: {}", e);
            }
        }
    }
}
