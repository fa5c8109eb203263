//! Per-object outcomes.
//!
//! Every drawing call a pass makes against a single object is classified
//! into either its value or a [`SkipReason`]. Connection failures are the
//! exception: they leave the fold as `Err` and abort the pass.

use facadekit_communication::ObjectId;
use facadekit_core::{ConnectionError, DrawingError, DrawingResult};
use serde::Serialize;
use std::fmt;

/// Why a pass did not finish its work on one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The object does not expose a property the pass needed
    PropertyUnavailable { property: String },
    /// The object's type does not support the operation
    Unsupported { capability: String },
    /// The object disappeared while the pass was running
    ObjectVanished,
    /// The primary effect happened, a follow-up write did not
    PartialWrite { detail: String },
    /// The document refused the call
    Rejected { reason: String },
}

impl SkipReason {
    /// Classify a per-object drawing failure.
    ///
    /// Returns `Err` for connection failures, which must not be folded.
    pub fn from_drawing_error(err: DrawingError) -> Result<Self, ConnectionError> {
        Ok(match err {
            DrawingError::PropertyUnavailable { property, .. } => {
                SkipReason::PropertyUnavailable { property }
            }
            DrawingError::UnsupportedCapability { capability, .. } => {
                SkipReason::Unsupported { capability }
            }
            DrawingError::ObjectNotFound { .. } => SkipReason::ObjectVanished,
            DrawingError::LayerNotFound { layer } => SkipReason::Rejected {
                reason: format!("layer {} does not exist", layer),
            },
            DrawingError::CommandRejected { reason } => SkipReason::Rejected { reason },
            DrawingError::Connection(conn) => return Err(conn),
        })
    }

    /// Unsupported and missing properties mean the object is out of scope
    /// for the pass rather than broken
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            SkipReason::PropertyUnavailable { .. } | SkipReason::Unsupported { .. }
        )
    }

    /// Mark a failed follow-up write
    pub fn partial_write(err: DrawingError) -> Result<Self, ConnectionError> {
        let reason = Self::from_drawing_error(err)?;
        Ok(SkipReason::PartialWrite {
            detail: reason.to_string(),
        })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PropertyUnavailable { property } => {
                write!(f, "property {} unavailable", property)
            }
            SkipReason::Unsupported { capability } => write!(f, "{} not supported", capability),
            SkipReason::ObjectVanished => write!(f, "object no longer exists"),
            SkipReason::PartialWrite { detail } => write!(f, "partial write: {}", detail),
            SkipReason::Rejected { reason } => write!(f, "rejected: {}", reason),
        }
    }
}

/// Result of one call against one object
pub type ObjectOutcome<T> = Result<T, SkipReason>;

/// Fold a drawing call into an [`ObjectOutcome`], propagating connection loss
pub fn classify<T>(result: DrawingResult<T>) -> Result<ObjectOutcome<T>, ConnectionError> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(err) => SkipReason::from_drawing_error(err).map(Err),
    }
}

/// A skipped object and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipRecord {
    /// `None` when the object was never created or could not be resolved
    pub object: Option<ObjectId>,
    pub reason: SkipReason,
}

impl SkipRecord {
    pub fn new(object: ObjectId, reason: SkipReason) -> Self {
        Self {
            object: Some(object),
            reason,
        }
    }

    pub fn detached(reason: SkipReason) -> Self {
        Self {
            object: None,
            reason,
        }
    }
}

impl fmt::Display for SkipRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.object {
            Some(id) => write!(f, "Skipping {}: {}", id, self.reason),
            None => write!(f, "Skipping: {}", self.reason),
        }
    }
}
