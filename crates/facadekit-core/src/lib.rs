//! # FacadeKit Core
//!
//! Core types shared by every FacadeKit crate: the 2-D geometry value
//! types, drawing units and the error taxonomy that separates fatal
//! connection failures from per-object drawing failures.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{
    ConnectionError, DrawingError, DrawingResult, Error, GeometryError, GeometryResult, Result,
};
pub use geometry::{ring_area, Point, Polygon, Segment, Shape};
pub use units::DrawingUnits;
