//! Error handling for FacadeKit
//!
//! Provides error types for every layer of the application:
//! - Connection errors (reaching the live drawing document)
//! - Drawing errors (per-object property and capability failures)
//! - Geometry errors (invalid shapes and facade parameters)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Only connection errors are fatal to a pass; drawing errors are caught
//! at object granularity and folded into summary counters.

use thiserror::Error;

/// Connection error type
///
/// Raised when a handle to the live document cannot be obtained or
/// validated. Retryable up to a bounded number of attempts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectionError {
    /// No document is open or the host application is not running
    #[error("Document unavailable: {reason}")]
    DocumentUnavailable {
        /// Why the document could not be reached.
        reason: String,
    },

    /// The host application rejected the call (modal dialog open, command running)
    #[error("Document busy: {reason}")]
    Busy {
        /// The rejection message reported by the host.
        reason: String,
    },

    /// Every connection attempt failed
    #[error("Could not connect after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// How many attempts were made.
        attempts: u32,
        /// The error reported by the final attempt.
        last: Box<ConnectionError>,
    },

    /// The document does not exist or its contents cannot be used
    #[error("Invalid document: {reason}")]
    InvalidDocument {
        /// What is wrong with the document.
        reason: String,
    },

    /// I/O error while reading or writing a document
    #[error("I/O error: {reason}")]
    Io {
        /// The underlying I/O failure.
        reason: String,
    },
}

impl ConnectionError {
    /// Whether another attempt could succeed
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            ConnectionError::RetriesExhausted { .. } | ConnectionError::InvalidDocument { .. }
        )
    }
}

/// Drawing error type
///
/// Represents failures of a single call against one drawing object.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawingError {
    /// The object does not expose the property (e.g. Area on a line)
    #[error("Property {property} unavailable on object {object}")]
    PropertyUnavailable {
        /// Handle of the object.
        object: String,
        /// Name of the property.
        property: String,
    },

    /// The object's type does not support the requested operation
    #[error("Object {object} does not support {capability}")]
    UnsupportedCapability {
        /// Handle of the object.
        object: String,
        /// The operation that was attempted.
        capability: String,
    },

    /// The object no longer exists (deleted or index out of range)
    #[error("Object not found: {object}")]
    ObjectNotFound {
        /// Handle or index of the missing object.
        object: String,
    },

    /// The layer does not exist in the document
    #[error("Layer not found: {layer}")]
    LayerNotFound {
        /// The layer name that was requested.
        layer: String,
    },

    /// The document refused a command or write
    #[error("Command rejected: {reason}")]
    CommandRejected {
        /// The reason given by the document.
        reason: String,
    },

    /// The connection dropped while talking to the document
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

impl DrawingError {
    /// Create a property-unavailable error
    pub fn property(object: impl ToString, property: impl Into<String>) -> Self {
        DrawingError::PropertyUnavailable {
            object: object.to_string(),
            property: property.into(),
        }
    }

    /// Create an unsupported-capability error
    pub fn unsupported(object: impl ToString, capability: impl Into<String>) -> Self {
        DrawingError::UnsupportedCapability {
            object: object.to_string(),
            capability: capability.into(),
        }
    }

    /// Create an object-not-found error
    pub fn not_found(object: impl ToString) -> Self {
        DrawingError::ObjectNotFound {
            object: object.to_string(),
        }
    }

    /// Check if this error means the document itself went away
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DrawingError::Connection(_))
    }
}

/// Geometry error type
///
/// Represents invalid shapes or generator parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A polygon needs at least four points including the closing point
    #[error("Polygon needs at least 4 points, got {count}")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// The last point does not repeat the first
    #[error("Polygon is not closed: first point ({x0}, {y0}) differs from last ({x1}, {y1})")]
    NotClosed {
        /// First point x.
        x0: f64,
        /// First point y.
        y0: f64,
        /// Last point x.
        x1: f64,
        /// Last point y.
        y1: f64,
    },

    /// Two consecutive points coincide
    #[error("Zero-length edge at point index {index}")]
    ZeroLengthEdge {
        /// Index of the second point of the degenerate edge.
        index: usize,
    },

    /// A generator parameter is out of range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Why it is invalid.
        reason: String,
    },
}

impl GeometryError {
    /// Create an invalid-parameter error
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        GeometryError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for FacadeKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Drawing error
    #[error(transparent)]
    Drawing(#[from] DrawingError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a connection error, including one surfaced by a drawing call
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Error::Connection(_) | Error::Drawing(DrawingError::Connection(_))
        )
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for single drawing calls
pub type DrawingResult<T> = std::result::Result<T, DrawingError>;

/// Result type for geometry construction
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
