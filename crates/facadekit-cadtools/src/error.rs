//! Error types for the CAD tools crate.
//!
//! Per-object failures never reach these types: they are folded into pass
//! summaries as [`SkipReason`](crate::outcome::SkipReason)s. What remains is
//! what stops a pass as a whole.

use facadekit_core::{ConnectionError, DrawingError};
use std::io;
use thiserror::Error;

/// Errors that abort a pass.
#[derive(Error, Debug)]
pub enum CadToolError {
    /// The document could not be reached or went away mid-pass.
    #[error("Connection lost: {0}")]
    Connection(#[from] ConnectionError),

    /// The document refused a document-level query such as enumerating objects.
    #[error("Document query failed: {0}")]
    Document(DrawingError),

    /// Invalid pass options were provided.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// I/O error while writing a report.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<DrawingError> for CadToolError {
    fn from(err: DrawingError) -> Self {
        match err {
            DrawingError::Connection(conn) => CadToolError::Connection(conn),
            other => CadToolError::Document(other),
        }
    }
}

impl CadToolError {
    /// Check if the pass stopped because the document became unreachable
    pub fn is_connection_error(&self) -> bool {
        matches!(self, CadToolError::Connection(_))
    }
}

/// Result type for whole passes
pub type PassResult<T> = Result<T, CadToolError>;
