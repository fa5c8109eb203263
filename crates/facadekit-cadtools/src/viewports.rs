//! Viewport Normalizer
//!
//! Brings every layout viewport to a visible, fixed-scale, locked state.
//! Viewport number 1 is the sheet itself and is left alone.

use crate::error::{CadToolError, PassResult};
use crate::outcome::{classify, SkipRecord};
use facadekit_communication::{DrawingClient, ObjectId, ObjectKind, Space};
use facadekit_core::DrawingResult;
use serde::Serialize;
use std::fmt;

/// The sheet's own background viewport
const SHEET_VIEWPORT: u32 = 1;

/// Options for [`ViewportNormalizer`]
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportOptions {
    /// Scale is set to 1 / denominator
    pub scale_denominator: f64,
    pub lock_display: bool,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            scale_denominator: 50.0,
            lock_display: true,
        }
    }
}

/// Counters from a normalisation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewportSummary {
    /// Viewports found, excluding the sheet viewport
    pub found: usize,
    pub updated: usize,
    pub skipped: Vec<SkipRecord>,
    pub regenerated: bool,
}

/// Outcome of [`ViewportNormalizer::run`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewportOutcome {
    /// The layout has no viewports besides the sheet
    NoViewports,
    Normalized(ViewportSummary),
}

/// Normalises layout viewports
#[derive(Debug, Clone, Default)]
pub struct ViewportNormalizer {
    options: ViewportOptions,
}

impl ViewportNormalizer {
    pub fn new(options: ViewportOptions) -> PassResult<Self> {
        if !(options.scale_denominator.is_finite() && options.scale_denominator > 0.0) {
            return Err(CadToolError::InvalidParameters(format!(
                "scale denominator must be positive, got {}",
                options.scale_denominator
            )));
        }
        Ok(Self { options })
    }

    pub fn custom_scale(&self) -> f64 {
        1.0 / self.options.scale_denominator
    }

    pub fn run<C: DrawingClient>(&self, client: &mut C) -> PassResult<ViewportOutcome> {
        if let Err(reason) = classify(client.set_active_space(Space::Paper))? {
            tracing::warn!("Could not activate paper space: {}", reason);
        }

        let mut summary = ViewportSummary::default();
        for id in client.objects(Space::Paper)? {
            match classify(client.kind(id))? {
                Ok(ObjectKind::Viewport) => {}
                Ok(_) => continue,
                Err(reason) => {
                    summary.skipped.push(SkipRecord::new(id, reason));
                    continue;
                }
            }

            match classify(client.viewport_number(id))? {
                Ok(SHEET_VIEWPORT) => continue,
                Ok(_) => {}
                Err(reason) => {
                    summary.skipped.push(SkipRecord::new(id, reason));
                    continue;
                }
            }

            summary.found += 1;
            match classify(self.normalize(client, id))? {
                Ok(()) => {
                    tracing::debug!("Normalised viewport {}", id);
                    summary.updated += 1;
                }
                Err(reason) => {
                    let record = SkipRecord::new(id, reason);
                    tracing::warn!("{}", record);
                    summary.skipped.push(record);
                }
            }
        }

        // Skips are still reported when nothing else was found
        if summary.found == 0 && summary.skipped.is_empty() {
            tracing::info!("No viewports found");
            return Ok(ViewportOutcome::NoViewports);
        }

        if summary.updated > 0 {
            match classify(client.regenerate())? {
                Ok(()) => summary.regenerated = true,
                Err(reason) => tracing::warn!("Regeneration failed: {}", reason),
            }
        }

        tracing::info!(
            found = summary.found,
            updated = summary.updated,
            "Viewports normalised"
        );
        Ok(ViewportOutcome::Normalized(summary))
    }

    fn normalize<C: DrawingClient>(&self, client: &mut C, id: ObjectId) -> DrawingResult<()> {
        client.set_visible(id, true)?;
        client.set_custom_scale(id, self.custom_scale())?;
        if self.options.lock_display {
            client.set_display_locked(id, true)?;
        }
        Ok(())
    }
}

impl fmt::Display for ViewportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewportOutcome::NoViewports => writeln!(f, "No viewports found; nothing to do"),
            ViewportOutcome::Normalized(summary) => {
                writeln!(
                    f,
                    "Normalised {} of {} viewports",
                    summary.updated, summary.found
                )?;
                for skip in &summary.skipped {
                    writeln!(f, "  {}", skip)?;
                }
                Ok(())
            }
        }
    }
}
