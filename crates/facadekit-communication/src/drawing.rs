//! Drawing client contract
//!
//! The only boundary the FacadeKit passes depend on: a live, externally
//! mutable CAD document reached through blocking calls. Every property of
//! the host's loosely-typed object model is exposed as a named, typed
//! operation so failures come back as [`DrawingError`] values instead of
//! exceptions on arbitrary attribute access.

use facadekit_core::{DrawingResult, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of an object owned by the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

/// Drawing space an object lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    #[default]
    Model,
    Paper,
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Space::Model => write!(f, "model space"),
            Space::Paper => write!(f, "paper space"),
        }
    }
}

/// Object classification derived from the host's object name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Line,
    /// Lightweight 2-D polyline
    Polyline,
    /// Heavy 2-D polyline
    Polyline2d,
    Polyline3d,
    Circle,
    Text,
    Viewport,
    PdfUnderlay,
    DwfUnderlay,
    DgnUnderlay,
    RasterImage,
    Other(String),
}

impl ObjectKind {
    /// Classify a host object name such as `AcDbPolyline`
    pub fn from_object_name(name: &str) -> Self {
        match name {
            "AcDbLine" => ObjectKind::Line,
            "AcDbPolyline" => ObjectKind::Polyline,
            "AcDb2dPolyline" => ObjectKind::Polyline2d,
            "AcDb3dPolyline" => ObjectKind::Polyline3d,
            "AcDbCircle" => ObjectKind::Circle,
            "AcDbText" | "AcDbMText" => ObjectKind::Text,
            "AcDbViewport" => ObjectKind::Viewport,
            "AcDbPdfReference" => ObjectKind::PdfUnderlay,
            "AcDbDwfReference" => ObjectKind::DwfUnderlay,
            "AcDbDgnReference" => ObjectKind::DgnUnderlay,
            "AcDbRasterImage" => ObjectKind::RasterImage,
            other => ObjectKind::Other(other.to_string()),
        }
    }

    /// Polyline-like objects carry an open/closed flag
    pub fn is_polyline(&self) -> bool {
        matches!(
            self,
            ObjectKind::Polyline | ObjectKind::Polyline2d | ObjectKind::Polyline3d
        )
    }

    /// Embedded external references: PDF/DWF/DGN underlays and raster images
    pub fn is_external_reference(&self) -> bool {
        matches!(
            self,
            ObjectKind::PdfUnderlay
                | ObjectKind::DwfUnderlay
                | ObjectKind::DgnUnderlay
                | ObjectKind::RasterImage
        )
    }
}

/// Strip the host's `AcDb` prefix from an object name
pub fn type_tag(object_name: &str) -> &str {
    object_name.strip_prefix("AcDb").unwrap_or(object_name)
}

/// A layer that exists in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRef {
    /// Name as stored by the document
    pub name: String,
    /// Whether the call created it
    pub created: bool,
}

/// A live CAD document.
///
/// Calls block until the host answers. Implementations are not expected to
/// be thread-safe: passes must run one at a time against a document.
pub trait DrawingClient {
    /// Display name of the document
    fn document_name(&self) -> String;

    /// Handles of every object in a space, in document order
    fn objects(&self, space: Space) -> DrawingResult<Vec<ObjectId>>;

    fn object_count(&self, space: Space) -> DrawingResult<usize>;

    /// Handle of the object at `index` in a space
    fn object_at(&self, space: Space, index: usize) -> DrawingResult<ObjectId>;

    /// Host object name, e.g. `AcDbPolyline`
    fn object_name(&self, id: ObjectId) -> DrawingResult<String>;

    fn kind(&self, id: ObjectId) -> DrawingResult<ObjectKind> {
        Ok(ObjectKind::from_object_name(&self.object_name(id)?))
    }

    fn layer(&self, id: ObjectId) -> DrawingResult<String>;

    fn set_layer(&mut self, id: ObjectId, layer: &str) -> DrawingResult<()>;

    fn is_closed(&self, id: ObjectId) -> DrawingResult<bool>;

    fn set_closed(&mut self, id: ObjectId, closed: bool) -> DrawingResult<()>;

    fn is_visible(&self, id: ObjectId) -> DrawingResult<bool>;

    fn set_visible(&mut self, id: ObjectId, visible: bool) -> DrawingResult<()>;

    /// Enclosed area in square drawing units
    fn area(&self, id: ObjectId) -> DrawingResult<f64>;

    /// Viewport number; 1 is the sheet's own background viewport
    fn viewport_number(&self, id: ObjectId) -> DrawingResult<u32>;

    fn set_custom_scale(&mut self, id: ObjectId, scale: f64) -> DrawingResult<()>;

    fn set_display_locked(&mut self, id: ObjectId, locked: bool) -> DrawingResult<()>;

    /// Add a line to model space on the current layer
    fn add_line(&mut self, start: Point, end: Point) -> DrawingResult<ObjectId>;

    fn delete(&mut self, id: ObjectId) -> DrawingResult<()>;

    /// Send a command line to the host, as typed at its prompt
    fn send_command(&mut self, command: &str) -> DrawingResult<()>;

    /// Return the named layer, creating it when absent
    fn ensure_layer(&mut self, name: &str) -> DrawingResult<LayerRef>;

    /// Set a layer's ACI colour
    fn set_layer_color(&mut self, name: &str, color: u8) -> DrawingResult<()>;

    fn set_active_space(&mut self, space: Space) -> DrawingResult<()>;

    /// Regenerate and refresh the display
    fn regenerate(&mut self) -> DrawingResult<()>;

    /// Completion signal for commands the host runs in the background.
    ///
    /// `None` when the host exposes no such signal, otherwise whether a
    /// bulk operation is still running.
    fn bulk_operation_pending(&self) -> Option<bool> {
        None
    }
}
