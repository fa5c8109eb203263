//! # FacadeKit Designer
//!
//! Parametric geometry for three-bay gabled facades.
//!
//! ## Core Components
//!
//! - **Facade**: window grids, doors, valley lines, stairwell windows and
//!   the gable outline, all derived from one shared set of column centres
//! - **Export**: DXF output with one layer per shape set
//!
//! ## Usage
//!
//! ```rust,ignore
//! use facadekit_designer::{FacadeGenerator, FacadeParameters, ShapeSetKind};
//!
//! let generator = FacadeGenerator::new(FacadeParameters::default())?;
//! let geometry = generator.generate()?;
//! let windows = geometry.shapes(ShapeSetKind::Windows);
//! ```

pub mod export;
pub mod facade;

pub use export::{export_dxf, facade_to_dxf};
pub use facade::{
    FacadeGenerator, FacadeGeometry, FacadeParameters, ShapeSetKind, StairWindowParameters,
};
