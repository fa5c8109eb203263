//! Command implementations behind the CLI.
//!
//! Each command takes the loaded [`Config`] and, when it works on a
//! document, an already connected [`DrawingClient`]. Commands return the
//! human-readable report to print; logging goes to stderr separately.

use anyhow::{bail, Context, Result};
use facadekit_cadtools::{
    GeometryRepairPass, IntegrityAuditor, LayerSynchronizer, ViewportNormalizer,
};
use facadekit_communication::DrawingClient;
use facadekit_core::Shape;
use facadekit_designer::{export_dxf, FacadeGenerator, FacadeGeometry, ShapeSetKind};
use facadekit_settings::Config;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Generate the facade from the configured parameters
pub fn generate(config: &Config) -> Result<FacadeGeometry> {
    let generator =
        FacadeGenerator::new(config.facade.clone()).context("Invalid facade parameters")?;
    Ok(generator.generate()?)
}

/// Summarise the generated geometry, optionally writing it to a DXF file
pub fn draw(config: &Config, dxf: Option<&Path>) -> Result<String> {
    let geometry = generate(config)?;
    let mut out = String::new();

    let [left, center, right] = geometry.column_centers;
    writeln!(
        out,
        "Columns at x = {:.3}, {:.3}, {:.3}",
        left, center, right
    )?;
    for kind in ShapeSetKind::ALL {
        writeln!(
            out,
            "{:<14} {:>3} shapes -> {}",
            kind.name(),
            geometry.shapes(kind).len(),
            config.layers.layer_for(kind)
        )?;
    }

    if let Some(path) = dxf {
        let lines = export_dxf(&geometry, &config.layers.assignments(), path)?;
        writeln!(out, "Wrote {} lines to {}", lines, path.display())?;
    }
    Ok(out)
}

/// Shapes of the named sets, or of every set assigned to `layer` when none are named
pub fn shapes_for(config: &Config, layer: &str, sets: &[ShapeSetKind]) -> Result<Vec<Shape>> {
    let sets = if sets.is_empty() {
        config.layers.sets_for_layer(layer)
    } else {
        sets.to_vec()
    };
    if sets.is_empty() {
        bail!(
            "No shape sets are assigned to layer '{}'; name one with --set",
            layer
        );
    }

    let geometry = generate(config)?;
    Ok(sets
        .iter()
        .flat_map(|&kind| geometry.shapes(kind))
        .collect())
}

pub fn send<C: DrawingClient>(
    config: &Config,
    client: &mut C,
    layer: &str,
    sets: &[ShapeSetKind],
    replace: bool,
) -> Result<String> {
    let shapes = shapes_for(config, layer, sets)?;
    let sync = LayerSynchronizer::new(config.sync_options());
    if replace {
        Ok(sync.replace(client, &shapes, layer)?.to_string())
    } else {
        Ok(sync.send(client, &shapes, layer)?.to_string())
    }
}

pub fn clear<C: DrawingClient>(config: &Config, client: &mut C, layer: &str) -> Result<String> {
    let sync = LayerSynchronizer::new(config.sync_options());
    Ok(sync.clear_layer(client, layer)?.to_string())
}

/// Run the audit; the text table, or JSON when asked, plus the saved path
pub fn audit<C: DrawingClient>(
    config: &Config,
    client: &mut C,
    json: bool,
    save: bool,
) -> Result<String> {
    let report = IntegrityAuditor::new(config.audit_options()).run(client)?;
    let options = config.report_options();

    let mut out = if json {
        report.to_json()? + "\n"
    } else {
        report.render_table(&options)
    };
    if save {
        let path = report
            .save_text(&config.report.output_directory, &options)
            .context("Could not save audit report")?;
        writeln!(out, "Report saved to {}", path.display())?;
    }
    Ok(out)
}

/// Run the repair pass; unless `save` is set the caller leaves the document unsaved
pub fn repair_geometry<C: DrawingClient>(
    config: &Config,
    client: &mut C,
    save: bool,
) -> Result<String> {
    let summary = GeometryRepairPass::new(config.repair_options()).run(client)?;
    let mut out = summary.to_string();
    if !save {
        out.push_str("Document not saved; review the result and rerun with --save to keep it.\n");
    }
    Ok(out)
}

pub fn normalize_viewports<C: DrawingClient>(config: &Config, client: &mut C) -> Result<String> {
    let normalizer = ViewportNormalizer::new(config.viewport_options())?;
    Ok(normalizer.run(client)?.to_string())
}

/// Write a default configuration file, to `path` or the default location
pub fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    Config::default().save_to_file(&path)?;
    Ok(path)
}
