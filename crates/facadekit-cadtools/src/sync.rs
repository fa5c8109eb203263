//! Layer Synchronizer
//!
//! Makes a layer's contents match a freshly generated shape set. Clearing
//! always completes before sending starts so freshly sent lines are never
//! caught by the delete sweep.

use crate::error::PassResult;
use crate::outcome::{classify, SkipReason, SkipRecord};
use facadekit_communication::{DrawingClient, ObjectId, Space};
use facadekit_core::Shape;
use serde::Serialize;
use std::fmt;

/// Options for [`LayerSynchronizer`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Create the target layer before sending when it does not exist
    pub create_missing: bool,
}

/// Result of [`LayerSynchronizer::clear_layer`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClearSummary {
    pub layer: String,
    /// Objects inspected
    pub scanned: usize,
    pub deleted: usize,
    /// Objects whose layer could not be read
    pub no_layer: usize,
    pub failures: Vec<SkipRecord>,
}

/// Result of [`LayerSynchronizer::send`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendSummary {
    pub layer: String,
    pub shapes: usize,
    /// Lines that now exist in the document
    pub lines_created: usize,
    /// Lines that also received the target layer
    pub lines_assigned: usize,
    /// Whether the target layer was created by this send
    pub layer_created: bool,
    /// Lines left on the default layer, plus lines that could not be drawn
    pub failures: Vec<SkipRecord>,
}

impl SendSummary {
    /// Lines created but left on the default layer
    pub fn partial_writes(&self) -> usize {
        self.lines_created - self.lines_assigned
    }
}

/// Result of [`LayerSynchronizer::replace`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaceSummary {
    pub cleared: ClearSummary,
    pub sent: SendSummary,
}

/// Clears and sends layer contents
#[derive(Debug, Clone, Default)]
pub struct LayerSynchronizer {
    options: SyncOptions,
}

impl LayerSynchronizer {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    /// Delete every model space object on `layer`, matched case-insensitively.
    ///
    /// Matching objects are collected in a full sweep before any deletion.
    pub fn clear_layer<C: DrawingClient>(
        &self,
        client: &mut C,
        layer: &str,
    ) -> PassResult<ClearSummary> {
        let mut summary = ClearSummary {
            layer: layer.to_string(),
            ..ClearSummary::default()
        };

        let mut doomed: Vec<ObjectId> = Vec::new();
        for id in client.objects(Space::Model)? {
            summary.scanned += 1;
            match classify(client.layer(id))? {
                Ok(name) if name.eq_ignore_ascii_case(layer) => doomed.push(id),
                Ok(_) => {}
                Err(reason) => {
                    tracing::debug!("Object {} has no readable layer: {}", id, reason);
                    summary.no_layer += 1;
                }
            }
        }

        for id in doomed {
            match classify(client.delete(id))? {
                Ok(()) => summary.deleted += 1,
                Err(reason) => {
                    tracing::warn!("Could not delete {}: {}", id, reason);
                    summary.failures.push(SkipRecord::new(id, reason));
                }
            }
        }

        tracing::info!(
            layer,
            deleted = summary.deleted,
            scanned = summary.scanned,
            "Cleared layer"
        );
        Ok(summary)
    }

    /// Draw every edge of `shapes` as an independent line on `layer`.
    ///
    /// A line whose layer assignment fails stays on the document's current
    /// layer and is recorded as a partial write.
    pub fn send<C: DrawingClient>(
        &self,
        client: &mut C,
        shapes: &[Shape],
        layer: &str,
    ) -> PassResult<SendSummary> {
        let mut summary = SendSummary {
            layer: layer.to_string(),
            shapes: shapes.len(),
            ..SendSummary::default()
        };

        if self.options.create_missing {
            match classify(client.ensure_layer(layer))? {
                Ok(created) => summary.layer_created = created.created,
                Err(reason) => tracing::warn!("Could not create layer {}: {}", layer, reason),
            }
        }

        for shape in shapes {
            for edge in shape.edges() {
                let id = match classify(client.add_line(edge.start, edge.end))? {
                    Ok(id) => id,
                    Err(reason) => {
                        tracing::warn!("Could not draw line {} -> {}: {}", edge.start, edge.end, reason);
                        summary.failures.push(SkipRecord::detached(reason));
                        continue;
                    }
                };
                summary.lines_created += 1;

                match client.set_layer(id, layer) {
                    Ok(()) => summary.lines_assigned += 1,
                    Err(err) => {
                        let reason = SkipReason::partial_write(err)?;
                        tracing::warn!("Line {} left on default layer: {}", id, reason);
                        summary.failures.push(SkipRecord::new(id, reason));
                    }
                }
            }
        }

        tracing::info!(
            layer,
            shapes = summary.shapes,
            lines = summary.lines_created,
            partial = summary.partial_writes(),
            "Sent shapes"
        );
        Ok(summary)
    }

    /// Clear `layer` completely, then send `shapes` to it
    pub fn replace<C: DrawingClient>(
        &self,
        client: &mut C,
        shapes: &[Shape],
        layer: &str,
    ) -> PassResult<ReplaceSummary> {
        let cleared = self.clear_layer(client, layer)?;
        let sent = self.send(client, shapes, layer)?;
        Ok(ReplaceSummary { cleared, sent })
    }
}

impl fmt::Display for ClearSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cleared layer '{}': {} deleted ({} objects scanned, {} without layer)",
            self.layer, self.deleted, self.scanned, self.no_layer
        )?;
        for failure in &self.failures {
            writeln!(f, "  {}", failure)?;
        }
        Ok(())
    }
}

impl fmt::Display for SendSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Sent {} shapes to layer '{}': {} lines drawn, {} assigned{}",
            self.shapes,
            self.layer,
            self.lines_created,
            self.lines_assigned,
            if self.layer_created { " (layer created)" } else { "" }
        )?;
        if self.partial_writes() > 0 {
            writeln!(
                f,
                "  {} lines remain on the default layer",
                self.partial_writes()
            )?;
        }
        for failure in &self.failures {
            writeln!(f, "  {}", failure)?;
        }
        Ok(())
    }
}

impl fmt::Display for ReplaceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.cleared, self.sent)
    }
}
