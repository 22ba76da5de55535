//! Error types for figure construction and export.

use thiserror::Error;

/// Errors returned while building or exporting a figure.
#[derive(Error, Debug)]
pub enum ClownError {
    /// A primitive was asked for a negative or non-finite dimension.
    #[error("invalid geometry parameter: {primitive} {parameter} = {value}")]
    InvalidGeometry {
        /// Primitive kind ("sphere", "cylinder", ...).
        primitive: &'static str,
        /// Offending parameter name.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A node ended up with a non-finite position, rotation or scale.
    #[error("invalid transform on node '{node}': {component} is not finite")]
    InvalidTransform {
        /// Name of the node.
        node: String,
        /// "position", "rotation" or "scale".
        component: &'static str,
    },

    /// A dotted parameter path that does not name a field.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Nothing to export.
    #[error("Empty geometry")]
    EmptyGeometry,

    /// An I/O error occurred during export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for figure operations.
pub type Result<T> = std::result::Result<T, ClownError>;
