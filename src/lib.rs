//! Styling Editor WASM Module
//!
//! Selection-scoped rich text styling: headings, bold and italic applied to
//! an arbitrary selection in an editable document tree, with the tree kept
//! free of redundant or empty style wrappers after every edit, and styled
//! fragment export for the clipboard.

pub mod errors;
pub mod config;
pub mod utils;
pub mod models;
pub mod selection;
pub mod format;
pub mod clipboard;
pub mod parse;
pub mod renderers;
pub mod host;
pub mod api;

// Re-export commonly used types
pub use clipboard::{serialize_selection, CascadeStyleResolver, StyleResolver};
pub use config::{ClassNames, EditorConfig, StructuralContainers};
pub use errors::{EditorError, Result};
pub use format::apply_style_action;
pub use host::{ClipboardEvent, ClipboardPayload, EventOutcome, ToolbarAction};
pub use models::{DocumentTree, EditorState, Element, NodeId, StyleAction, StyleToken, Tag};
pub use selection::{BoundaryPoint, Selection};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            crate::wasm_warn!("logger already initialized: {}", e);
        }
    }

    log::info!("Styling editor WASM module initialized");
}
