//! 2-D geometry primitives
//!
//! Points, independent line segments and explicitly closed polygons.
//! All values are immutable once constructed; generators build them fresh
//! on every run.

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// One independent line with no implied connectivity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// A single closed shape whose last point repeats the first.
///
/// Invariants, checked on construction:
/// - at least four points (a triangle plus its closing point)
/// - the last point equals the first exactly
/// - no two consecutive points coincide
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from an explicitly closed point list
    pub fn new(points: Vec<Point>) -> GeometryResult<Self> {
        if points.len() < 4 {
            return Err(GeometryError::TooFewPoints {
                count: points.len(),
            });
        }

        let first = points[0];
        let last = points[points.len() - 1];
        if first != last {
            return Err(GeometryError::NotClosed {
                x0: first.x,
                y0: first.y,
                x1: last.x,
                y1: last.y,
            });
        }

        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[0] == pair[1])
            .map(|i| i + 1)
        {
            return Err(GeometryError::ZeroLengthEdge { index });
        }

        Ok(Self { points })
    }

    /// Build a polygon from an open ring, appending the closing point
    pub fn from_ring(mut ring: Vec<Point>) -> GeometryResult<Self> {
        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        Self::new(ring)
    }

    /// Axis-aligned rectangle from its lower-left and upper-right corners.
    ///
    /// Points run bottom-left, bottom-right, top-right, top-left, bottom-left.
    pub fn rectangle(min: Point, max: Point) -> GeometryResult<Self> {
        Self::new(vec![
            Point::new(min.x, min.y),
            Point::new(max.x, min.y),
            Point::new(max.x, max.y),
            Point::new(min.x, max.y),
            Point::new(min.x, min.y),
        ])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points including the closing point
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn edges(&self) -> Vec<Segment> {
        self.points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect()
    }

    /// Unsigned area by the shoelace formula
    pub fn area(&self) -> f64 {
        ring_area(&self.points)
    }

    /// Bounding box as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.points.iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        )
    }
}

/// Unsigned shoelace area of a vertex ring; the closing point may or may not be repeated.
pub fn ring_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    (twice / 2.0).abs()
}

/// Anything that can be sent to a drawing as independent lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Polygon(Polygon),
    Segment(Segment),
}

impl Shape {
    /// The independent lines this shape is drawn with
    pub fn edges(&self) -> Vec<Segment> {
        match self {
            Shape::Polygon(polygon) => polygon.edges(),
            Shape::Segment(segment) => vec![*segment],
        }
    }

    pub fn edge_count(&self) -> usize {
        match self {
            Shape::Polygon(polygon) => polygon.len() - 1,
            Shape::Segment(_) => 1,
        }
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<Segment> for Shape {
    fn from(segment: Segment) -> Self {
        Shape::Segment(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_has_five_points() {
        let rect = Polygon::rectangle(Point::new(0.0, 0.0), Point::new(2.0, 1.0)).unwrap();
        assert_eq!(rect.len(), 5);
        assert_eq!(rect.first(), rect.last());
        assert_eq!(rect.points()[1], Point::new(2.0, 0.0));
        assert_eq!(rect.points()[3], Point::new(0.0, 1.0));
        assert!((rect.area() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_polygon_rejects_open_ring() {
        let err = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, GeometryError::NotClosed { .. }));
    }

    #[test]
    fn test_polygon_rejects_zero_length_edge() {
        let err = Polygon::rectangle(Point::new(1.0, 0.0), Point::new(1.0, 2.0)).unwrap_err();
        assert_eq!(err, GeometryError::ZeroLengthEdge { index: 1 });
    }

    #[test]
    fn test_polygon_rejects_too_few_points() {
        let err = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(0.0, 0.0)]).unwrap_err();
        assert_eq!(err, GeometryError::TooFewPoints { count: 2 });
    }

    #[test]
    fn test_from_ring_closes() {
        let tri = Polygon::from_ring(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ])
        .unwrap();
        assert_eq!(tri.len(), 4);
        assert!((tri.area() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_shape_edges() {
        let rect = Polygon::rectangle(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
        let shape = Shape::from(rect);
        assert_eq!(shape.edges().len(), 4);
        assert_eq!(shape.edge_count(), 4);

        let seg = Shape::from(Segment::new(Point::new(0.0, 0.0), Point::new(0.0, 5.0)));
        assert_eq!(seg.edges().len(), 1);
        assert_eq!(seg.edges()[0].length(), 5.0);
    }
}
