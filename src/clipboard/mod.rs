//! Clipboard export
//!
//! - `computed_style`: effective style values for cloned elements
//! - `serializer`: the selection-bounded fragment writer

pub mod computed_style;
pub mod serializer;

pub use computed_style::{
    default_stylesheet, CascadeStyleResolver, ComputedStyle, Selector, StyleProperty,
    StyleResolver, StyleRule,
};
pub use serializer::{serialize_selection, try_serialize_selection};
