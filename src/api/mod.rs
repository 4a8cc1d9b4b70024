//! Styling Editor WASM API
//!
//! This module provides the JavaScript-facing API for the styling editor.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serialization and error conversion
//! - `platform`: DOM capture, platform selection sources, selection restore
//! - `editor`: the `RichTextEditor` class

pub mod helpers;
pub mod platform;
pub mod editor;

pub use editor::RichTextEditor;
