//! Renderers module for the styling editor
//!
//! This module writes document trees back out as markup.

pub mod markup;

// Re-export commonly used types
pub use markup::{class_attribute, render_inner, render_outer};
