//! DXF export of generated facade geometry.
//!
//! Every edge is written as an independent LINE entity on the layer of its
//! shape set, mirroring what the layer synchronizer sends to a live
//! document.

use crate::facade::{FacadeGeometry, ShapeSetKind};
use anyhow::{Context, Result};
use dxf::entities::{Entity, EntityType, Line};
use dxf::tables::Layer;
use dxf::Drawing;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Layer used when a shape set has no assignment
const FALLBACK_LAYER: &str = "0";

/// Build an in-memory DXF drawing; returns it with the number of lines written.
pub fn facade_to_dxf(
    geometry: &FacadeGeometry,
    layers: &BTreeMap<ShapeSetKind, String>,
) -> (Drawing, usize) {
    let mut drawing = Drawing::new();

    let layer_names: BTreeSet<&str> = layers
        .values()
        .map(String::as_str)
        .filter(|name| !name.eq_ignore_ascii_case(FALLBACK_LAYER))
        .collect();
    for name in layer_names {
        drawing.add_layer(Layer {
            name: name.to_string(),
            ..Default::default()
        });
    }

    let mut written = 0;
    for kind in ShapeSetKind::ALL {
        let layer = layers
            .get(&kind)
            .map(String::as_str)
            .unwrap_or(FALLBACK_LAYER);
        for shape in geometry.shapes(kind) {
            for edge in shape.edges() {
                let line = Line::new(
                    dxf::Point::new(edge.start.x, edge.start.y, 0.0),
                    dxf::Point::new(edge.end.x, edge.end.y, 0.0),
                );
                let mut entity = Entity::new(EntityType::Line(line));
                entity.common.layer = layer.to_string();
                drawing.add_entity(entity);
                written += 1;
            }
        }
    }

    (drawing, written)
}

/// Write the facade to a DXF file; returns the number of lines written.
pub fn export_dxf(
    geometry: &FacadeGeometry,
    layers: &BTreeMap<ShapeSetKind, String>,
    path: &Path,
) -> Result<usize> {
    let (drawing, written) = facade_to_dxf(geometry, layers);
    drawing
        .save_file(path)
        .with_context(|| format!("Failed to write DXF file {}", path.display()))?;
    tracing::info!(lines = written, path = %path.display(), "Exported facade to DXF");
    Ok(written)
}
