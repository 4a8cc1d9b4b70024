//! Utility modules for the styling editor

pub mod offsets;

pub use offsets::*;
