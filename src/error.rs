//! Error types for grimesh.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The mesh file violates the file grammar.
    #[error("format error on line {line}: {message}")]
    Format {
        /// 1-based line number where the problem was detected.
        line: usize,
        /// Error message.
        message: String,
    },

    /// A group index is outside `[0, count)`.
    #[error("{what} index {index} out of range (count is {count})")]
    IndexOutOfRange {
        /// What kind of entity was indexed.
        what: &'static str,
        /// The requested index.
        index: usize,
        /// The number of entities available.
        count: usize,
    },

    /// Only 2-D and 3-D meshes are supported.
    #[error("invalid mesh dimension {0} (expected 2 or 3)")]
    InvalidDimension(usize),

    /// A coordinate tuple has the wrong number of components.
    #[error("coordinate has {found} components, mesh dimension is {expected}")]
    CoordinateLength {
        /// The mesh dimension.
        expected: usize,
        /// The tuple length supplied.
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("node {node} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// The node index.
        node: usize,
    },

    /// An element references a node that does not exist.
    #[error("element {element} references invalid node index {node} (mesh has {num_nodes} nodes)")]
    InvalidNodeIndex {
        /// The element index within its group.
        element: usize,
        /// The invalid node index.
        node: usize,
        /// Number of nodes in the mesh.
        num_nodes: usize,
    },

    /// Two boundary face groups share a title.
    #[error("duplicate boundary face group title '{0}'")]
    DuplicateTitle(String),

    /// A basis name or group title cannot be written to a mesh file.
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// Build configuration is incomplete or inconsistent.
    #[error("invalid build configuration: {0}")]
    Config(String),

    /// Build configuration file could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a format error for the given line.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        MeshError::Format {
            line,
            message: message.into(),
        }
    }

    /// Returns `true` if this is a file grammar violation.
    pub fn is_format(&self) -> bool {
        matches!(self, MeshError::Format { .. })
    }
}
