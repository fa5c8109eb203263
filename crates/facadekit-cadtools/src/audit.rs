//! Integrity Auditor
//!
//! One traversal of model space that moves stray objects off the default
//! layer, hides embedded external references and gathers per-layer
//! statistics. Statistics are taken after the corrections, so every object
//! is counted under the layer it ends up on.

use crate::error::PassResult;
use crate::outcome::{classify, SkipRecord};
use chrono::{DateTime, Utc};
use facadekit_communication::{type_tag, DrawingClient, ObjectId, ObjectKind, Space};
use serde::Serialize;
use std::collections::BTreeMap;

/// Options for [`IntegrityAuditor`]
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOptions {
    /// Layer whose objects must be moved
    pub default_layer: String,
    /// Where stray objects are moved to
    pub audit_layer: String,
    /// ACI colour given to the audit layer when it is created
    pub audit_layer_color: Option<u8>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            default_layer: "0".to_string(),
            audit_layer: "AUDIT_REQUIRED".to_string(),
            audit_layer_color: Some(30),
        }
    }
}

/// Statistics for one layer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayerStats {
    pub count: usize,
    /// Summed area in square drawing units
    pub area: f64,
    /// Object count per type tag
    pub types: BTreeMap<String, usize>,
}

impl LayerStats {
    fn record(&mut self, type_tag: String, area: f64) {
        self.count += 1;
        self.area += area;
        *self.types.entry(type_tag).or_insert(0) += 1;
    }
}

/// Result of an audit run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub document: String,
    pub generated: DateTime<Utc>,
    /// Statistics keyed by final layer name
    pub layers: BTreeMap<String, LayerStats>,
    /// Objects included in the statistics
    pub scanned: usize,
    /// Objects whose layer could not be read; not in the statistics
    pub skipped: usize,
    /// Objects moved to the audit layer
    pub moved: usize,
    /// External references hidden
    pub hidden: usize,
    pub regenerated: bool,
    /// Layer moves and visibility changes that failed
    pub failures: Vec<SkipRecord>,
    /// Non-fatal remarks about the run
    pub notes: Vec<String>,
}

impl AuditReport {
    fn new(document: String) -> Self {
        Self {
            document,
            generated: Utc::now(),
            layers: BTreeMap::new(),
            scanned: 0,
            skipped: 0,
            moved: 0,
            hidden: 0,
            regenerated: false,
            failures: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Sum of per-layer counts
    pub fn total_count(&self) -> usize {
        self.layers.values().map(|s| s.count).sum()
    }

    pub fn total_area(&self) -> f64 {
        self.layers.values().map(|s| s.area).sum()
    }

    /// Whether the run changed the document
    pub fn changed(&self) -> bool {
        self.moved > 0 || self.hidden > 0
    }
}

/// Audits and corrects a document
#[derive(Debug, Clone, Default)]
pub struct IntegrityAuditor {
    options: AuditOptions,
}

impl IntegrityAuditor {
    pub fn new(options: AuditOptions) -> Self {
        Self { options }
    }

    pub fn run<C: DrawingClient>(&self, client: &mut C) -> PassResult<AuditReport> {
        let mut report = AuditReport::new(client.document_name());
        // Resolved on first use; Some(None) once creating it has failed
        let mut audit_layer: Option<Option<String>> = None;

        tracing::info!(document = %report.document, "Starting audit");

        for id in client.objects(Space::Model)? {
            let mut layer = match classify(client.layer(id))? {
                Ok(layer) => layer,
                Err(reason) => {
                    tracing::debug!("Skipping {}: {}", id, reason);
                    report.skipped += 1;
                    continue;
                }
            };

            let object_name = classify(client.object_name(id))?.ok();
            let kind = object_name
                .as_deref()
                .map(ObjectKind::from_object_name)
                .unwrap_or_else(|| ObjectKind::Other("Unknown".to_string()));

            if layer.eq_ignore_ascii_case(&self.options.default_layer) {
                if audit_layer.is_none() {
                    audit_layer = Some(self.prepare_audit_layer(client, &mut report)?);
                }
                if let Some(Some(target)) = audit_layer.clone() {
                    match classify(client.set_layer(id, &target))? {
                        Ok(()) => {
                            tracing::debug!("Moved {} to {}", id, target);
                            layer = target;
                            report.moved += 1;
                        }
                        Err(reason) => {
                            tracing::warn!("Could not move {} off layer {}: {}", id, layer, reason);
                            report.failures.push(SkipRecord::new(id, reason));
                        }
                    }
                }
            }

            if kind.is_external_reference() {
                self.hide(client, id, &mut report)?;
            }

            let tag = self.describe(client, id, object_name.as_deref(), &kind)?;
            let area = classify(client.area(id))?.unwrap_or(0.0);
            report.layers.entry(layer).or_default().record(tag, area);
            report.scanned += 1;
        }

        if report.changed() {
            match classify(client.regenerate())? {
                Ok(()) => report.regenerated = true,
                Err(reason) => report.notes.push(format!("Regeneration failed: {}", reason)),
            }
        }

        tracing::info!(
            scanned = report.scanned,
            moved = report.moved,
            hidden = report.hidden,
            skipped = report.skipped,
            "Audit complete"
        );
        Ok(report)
    }

    /// Make sure the audit layer exists, colouring it when newly created
    fn prepare_audit_layer<C: DrawingClient>(
        &self,
        client: &mut C,
        report: &mut AuditReport,
    ) -> PassResult<Option<String>> {
        let layer = match classify(client.ensure_layer(&self.options.audit_layer))? {
            Ok(layer) => layer,
            Err(reason) => {
                tracing::warn!("Could not create layer {}: {}", self.options.audit_layer, reason);
                report.notes.push(format!(
                    "Audit layer {} unavailable: {}",
                    self.options.audit_layer, reason
                ));
                return Ok(None);
            }
        };

        if layer.created {
            tracing::info!(layer = %layer.name, "Created audit layer");
            if let Some(color) = self.options.audit_layer_color {
                if let Err(reason) = classify(client.set_layer_color(&layer.name, color))? {
                    report
                        .notes
                        .push(format!("Could not colour layer {}: {}", layer.name, reason));
                }
            }
        }
        Ok(Some(layer.name))
    }

    fn hide<C: DrawingClient>(
        &self,
        client: &mut C,
        id: ObjectId,
        report: &mut AuditReport,
    ) -> PassResult<()> {
        // An unreadable flag is treated as visible
        let visible = classify(client.is_visible(id))?.unwrap_or(true);
        if !visible {
            return Ok(());
        }
        match classify(client.set_visible(id, false))? {
            Ok(()) => {
                tracing::debug!("Hid external reference {}", id);
                report.hidden += 1;
            }
            Err(reason) => {
                tracing::warn!("Could not hide {}: {}", id, reason);
                report.failures.push(SkipRecord::new(id, reason));
            }
        }
        Ok(())
    }

    /// Type tag for the report, with polylines split by closure
    fn describe<C: DrawingClient>(
        &self,
        client: &C,
        id: ObjectId,
        object_name: Option<&str>,
        kind: &ObjectKind,
    ) -> PassResult<String> {
        let tag = object_name.map(type_tag).unwrap_or("Unknown").to_string();
        if !kind.is_polyline() {
            return Ok(tag);
        }
        // Every polyline flavour reports under one refined tag
        Ok(match classify(client.is_closed(id))? {
            Ok(true) => "Polyline (Closed)".to_string(),
            Ok(false) => "Polyline (Open)".to_string(),
            Err(_) => tag,
        })
    }
}
