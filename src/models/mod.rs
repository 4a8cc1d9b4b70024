//! Models module for the styling editor
//!
//! This module contains the document tree and the style vocabulary applied
//! to it.

pub mod action;
pub mod editor_state;
pub mod node;
pub mod tree;

// Re-export commonly used types
pub use action::{StyleAction, StyleToken};
pub use editor_state::EditorState;
pub use node::{Element, HeadingLevel, InlineMark, MarkSet, NodeKind, Tag};
pub use tree::{DocumentTree, Node, NodeId};
