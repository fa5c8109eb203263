//! Parametric facade generation.
//!
//! Converts a handful of architectural parameters into windows, doors,
//! internal valley lines, optional stairwell windows and the gable outline
//! of a three-bay facade with 45° side gables.
//!
//! The three column centres are derived once per generator and reused by
//! every shape so windows, doors and gables stay horizontally aligned.
//! Whether a sill plus window height fits under the eave is not checked
//! here; that is the caller's call.

use facadekit_core::{GeometryError, GeometryResult, Point, Polygon, Segment, Shape};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

/// Tall windows lighting the stairwells, set in from the valley lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairWindowParameters {
    /// Horizontal offset `c` from each valley line to the window centre
    pub offset: f64,
    /// Window width
    pub width: f64,
    /// Sill height
    pub sill: f64,
    /// Head height
    pub head: f64,
}

impl Default for StairWindowParameters {
    fn default() -> Self {
        Self {
            offset: 1.5,
            width: 0.8,
            sill: 2.0,
            head: 12.5,
        }
    }
}

/// Facade input parameters, in drawing units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeParameters {
    /// Overall width W
    pub width: f64,
    /// Eave height H
    pub eave_height: f64,
    /// Gable constant k; the inset is I = k·√2
    pub inset_factor: f64,
    pub window_width: f64,
    pub window_height: f64,
    /// Sill heights, bottom to top
    pub sill_heights: Vec<f64>,
    pub door_width: f64,
    pub door_height: f64,
    /// Apex height of the centre gable
    pub ridge_height: f64,
    pub stair_windows: Option<StairWindowParameters>,
}

impl Default for FacadeParameters {
    fn default() -> Self {
        Self {
            width: 20.0,
            eave_height: 15.0,
            inset_factor: 4.0,
            window_width: 1.0,
            window_height: 1.0,
            sill_heights: vec![2.5, 5.5, 8.5, 11.5],
            door_width: 1.0,
            door_height: 2.0,
            ridge_height: 17.83,
            stair_windows: None,
        }
    }
}

impl FacadeParameters {
    /// Horizontal inset I, the half-diagonal of a 45° gable
    pub fn inset(&self) -> f64 {
        self.inset_factor * SQRT_2
    }

    /// Check that every dimension is finite and the bays fit inside the width.
    pub fn validate(&self) -> GeometryResult<()> {
        positive("width", self.width)?;
        positive("eave_height", self.eave_height)?;
        positive("inset_factor", self.inset_factor)?;
        positive("window_width", self.window_width)?;
        positive("window_height", self.window_height)?;
        positive("door_width", self.door_width)?;
        positive("door_height", self.door_height)?;

        if self.inset() * 2.0 >= self.width {
            return Err(GeometryError::invalid(
                "inset_factor",
                format!(
                    "inset {:.3} leaves no centre bay in width {:.3}",
                    self.inset(),
                    self.width
                ),
            ));
        }

        if self.ridge_height <= self.eave_height || !self.ridge_height.is_finite() {
            return Err(GeometryError::invalid(
                "ridge_height",
                format!("must be above the eave ({})", self.eave_height),
            ));
        }

        if let Some(sill) = self.sill_heights.iter().find(|s| !s.is_finite()) {
            return Err(GeometryError::invalid(
                "sill_heights",
                format!("{} is not finite", sill),
            ));
        }

        if let Some(stair) = &self.stair_windows {
            positive("stair_windows.width", stair.width)?;
            if !stair.offset.is_finite() {
                return Err(GeometryError::invalid("stair_windows.offset", "not finite"));
            }
            if !stair.sill.is_finite() || !stair.head.is_finite() || stair.head <= stair.sill {
                return Err(GeometryError::invalid(
                    "stair_windows.head",
                    "must be above the sill",
                ));
            }
        }

        Ok(())
    }
}

fn positive(name: &str, value: f64) -> GeometryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

/// Named groups of generated geometry, each sent to its own layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeSetKind {
    Windows,
    Doors,
    Valleys,
    StairWindows,
    Outline,
}

impl ShapeSetKind {
    pub const ALL: [ShapeSetKind; 5] = [
        ShapeSetKind::Windows,
        ShapeSetKind::Doors,
        ShapeSetKind::Valleys,
        ShapeSetKind::StairWindows,
        ShapeSetKind::Outline,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeSetKind::Windows => "windows",
            ShapeSetKind::Doors => "doors",
            ShapeSetKind::Valleys => "valleys",
            ShapeSetKind::StairWindows => "stair-windows",
            ShapeSetKind::Outline => "outline",
        }
    }
}

impl fmt::Display for ShapeSetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeSetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "windows" | "window" => Ok(ShapeSetKind::Windows),
            "doors" | "door" => Ok(ShapeSetKind::Doors),
            "valleys" | "valley" => Ok(ShapeSetKind::Valleys),
            "stair-windows" | "stairs" => Ok(ShapeSetKind::StairWindows),
            "outline" | "gable" => Ok(ShapeSetKind::Outline),
            _ => Err(format!("Unknown shape set: {}", s)),
        }
    }
}

/// Everything one generator run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacadeGeometry {
    pub column_centers: [f64; 3],
    pub windows: Vec<Polygon>,
    pub doors: Vec<Polygon>,
    pub valley_lines: Vec<Segment>,
    pub stair_windows: Vec<Polygon>,
    pub outline: Polygon,
}

impl FacadeGeometry {
    /// The shapes of one set, ready to send
    pub fn shapes(&self, kind: ShapeSetKind) -> Vec<Shape> {
        match kind {
            ShapeSetKind::Windows => self.windows.iter().cloned().map(Shape::from).collect(),
            ShapeSetKind::Doors => self.doors.iter().cloned().map(Shape::from).collect(),
            ShapeSetKind::Valleys => self.valley_lines.iter().copied().map(Shape::from).collect(),
            ShapeSetKind::StairWindows => self
                .stair_windows
                .iter()
                .cloned()
                .map(Shape::from)
                .collect(),
            ShapeSetKind::Outline => vec![Shape::from(self.outline.clone())],
        }
    }

    pub fn shape_count(&self) -> usize {
        self.windows.len()
            + self.doors.len()
            + self.valley_lines.len()
            + self.stair_windows.len()
            + 1
    }
}

/// Generator bound to one parameter set.
#[derive(Debug, Clone)]
pub struct FacadeGenerator {
    params: FacadeParameters,
    inset: f64,
    columns: [f64; 3],
}

impl FacadeGenerator {
    /// Validate the parameters and derive the column centres.
    pub fn new(params: FacadeParameters) -> GeometryResult<Self> {
        params.validate()?;
        let inset = params.inset();
        let columns = [
            0.5 * inset,
            0.5 * params.width,
            params.width - 0.5 * inset,
        ];
        Ok(Self {
            params,
            inset,
            columns,
        })
    }

    pub fn parameters(&self) -> &FacadeParameters {
        &self.params
    }

    pub fn inset(&self) -> f64 {
        self.inset
    }

    /// X centres of the left gable, centre and right gable columns
    pub fn column_centers(&self) -> [f64; 3] {
        self.columns
    }

    /// One window per (column, sill) pair, column-major.
    pub fn windows(&self) -> GeometryResult<Vec<Polygon>> {
        let half = 0.5 * self.params.window_width;
        let mut windows = Vec::with_capacity(3 * self.params.sill_heights.len());
        for &x_c in &self.columns {
            for &sill in &self.params.sill_heights {
                windows.push(Polygon::rectangle(
                    Point::new(x_c - half, sill),
                    Point::new(x_c + half, sill + self.params.window_height),
                )?);
            }
        }
        Ok(windows)
    }

    /// One door per column, standing on the ground line.
    pub fn doors(&self) -> GeometryResult<Vec<Polygon>> {
        let half = 0.5 * self.params.door_width;
        self.columns
            .iter()
            .map(|&x_c| {
                Polygon::rectangle(
                    Point::new(x_c - half, 0.0),
                    Point::new(x_c + half, self.params.door_height),
                )
            })
            .collect()
    }

    /// Internal valley lines at X = I and X = W - I, ground to eave.
    pub fn valley_lines(&self) -> Vec<Segment> {
        let h = self.params.eave_height;
        [self.inset, self.params.width - self.inset]
            .iter()
            .map(|&x| Segment::new(Point::new(x, 0.0), Point::new(x, h)))
            .collect()
    }

    /// Stairwell windows at X = I + c and X = W - (I + c); empty when not configured.
    pub fn stair_windows(&self) -> GeometryResult<Vec<Polygon>> {
        let Some(stair) = &self.params.stair_windows else {
            return Ok(Vec::new());
        };
        let half = 0.5 * stair.width;
        let left = self.inset + stair.offset;
        [left, self.params.width - left]
            .iter()
            .map(|&x_c| {
                Polygon::rectangle(
                    Point::new(x_c - half, stair.sill),
                    Point::new(x_c + half, stair.head),
                )
            })
            .collect()
    }

    /// Elevation outline: walls up to the eave, stepping in to the gable
    /// valleys and rising to the ridge apex.
    pub fn gable_outline(&self) -> GeometryResult<Polygon> {
        let w = self.params.width;
        let h = self.params.eave_height;
        Polygon::from_ring(vec![
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(w - self.inset, h),
            Point::new(0.5 * w, self.params.ridge_height),
            Point::new(self.inset, h),
            Point::new(0.0, h),
        ])
    }

    pub fn generate(&self) -> GeometryResult<FacadeGeometry> {
        let geometry = FacadeGeometry {
            column_centers: self.columns,
            windows: self.windows()?,
            doors: self.doors()?,
            valley_lines: self.valley_lines(),
            stair_windows: self.stair_windows()?,
            outline: self.gable_outline()?,
        };
        tracing::debug!(
            windows = geometry.windows.len(),
            doors = geometry.doors.len(),
            stair_windows = geometry.stair_windows.len(),
            "Generated facade geometry"
        );
        Ok(geometry)
    }
}
