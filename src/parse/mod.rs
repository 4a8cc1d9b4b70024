//! Parsing module for the styling editor
//!
//! This module reads edit-area markup into a document tree.

pub mod markup;

// Re-export commonly used types
pub use markup::parse_fragment_into;
