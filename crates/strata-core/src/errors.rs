//! Error types for strata.

use crate::types::NodeId;
use thiserror::Error;

/// Errors while lexing a single grid value.
///
/// These never escape the template parsers: an unreadable token degrades to a
/// zero-width fixed track instead.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid length: {value:?}")]
    InvalidLength { value: String },

    #[error("Unexpected trailing input {rest:?} in {value:?}")]
    TrailingInput { value: String, rest: String },
}

/// Errors raised by a container builder while applying a rebuild.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RebuildError {
    #[error("Unknown node {node:?}")]
    UnknownNode { node: NodeId },

    #[error("Node {node:?} cannot hold children")]
    NotAContainer { node: NodeId },

    #[error("Invalid size {width}x{height} for node {node:?}")]
    InvalidSize { node: NodeId, width: f64, height: f64 },

    #[error("Node {node:?} is already attached to {parent:?}")]
    AlreadyAttached { node: NodeId, parent: NodeId },

    #[error("Appending {node:?} into {parent:?} would create a cycle")]
    Cycle { node: NodeId, parent: NodeId },

    #[error("Host rejected operation: {0}")]
    Host(String),
}

/// Errors in the captured layer data.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Layer {name:?} has no coordinates")]
    MissingCoordinates { name: String },

    #[error("Invalid capture document: {message}")]
    InvalidDocument { message: String },

    #[error("Failed to build layer: {0}")]
    Build(#[from] RebuildError),
}
