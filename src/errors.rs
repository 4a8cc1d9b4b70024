//! Error types for the styling editor
//!
//! Tree edits themselves never fail. These errors describe missing input
//! (no selection, stale node ids) and failures while loading markup or
//! configuration.

use crate::models::NodeId;
use thiserror::Error;

/// Top-level editor error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// There is no selection, or it has no anchor
    #[error("no selection")]
    NoSelection,

    /// The selection anchor has no element ancestor
    #[error("selection anchor has no element container")]
    UnresolvableContainer,

    /// A node id does not belong to the document
    #[error("node {0} not found in document")]
    NodeNotFound(NodeId),

    /// A boundary offset lies outside its node
    #[error("offset {offset} out of bounds for node {node}")]
    InvalidBoundary { node: NodeId, offset: usize },

    /// Markup could not be read into a document tree
    #[error("invalid markup: {0}")]
    Markup(String),

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The host platform refused an operation
    #[error("platform error: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
