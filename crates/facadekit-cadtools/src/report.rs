//! Audit report rendering
//!
//! Fixed-width text table and JSON output for [`AuditReport`], plus saving
//! the text form into an output directory.

use crate::audit::AuditReport;
use crate::error::PassResult;
use facadekit_core::DrawingUnits;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 72;

/// Presentation settings for a report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    pub author: String,
    /// Units the document is drawn in; areas are shown in square metres
    pub units: DrawingUnits,
}

impl AuditReport {
    /// Render the report as a text table
    pub fn render_table(&self, options: &ReportOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Design Report: {}", self.document);
        if !options.author.is_empty() {
            let _ = writeln!(out, "Author: {}", options.author);
        }
        let _ = writeln!(out, "Date: {}", self.generated.format("%Y-%m-%d"));
        out.push('\n');

        let _ = writeln!(
            out,
            "{:<20} | {:<6} | {:<10} | Composition",
            "Layer", "Count", "Area (m2)"
        );
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for (layer, stats) in &self.layers {
            let composition = stats
                .types
                .iter()
                .map(|(tag, count)| format!("{}:{}", tag, count))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                out,
                "{:<20} | {:<6} | {:<10.2} | {}",
                layer,
                stats.count,
                options.units.area_to_square_meters(stats.area),
                composition
            );
        }
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

        let _ = writeln!(
            out,
            "Objects: {}  Moved to audit layer: {}  References hidden: {}  Skipped: {}",
            self.scanned, self.moved, self.hidden, self.skipped
        );
        for failure in &self.failures {
            let _ = writeln!(out, "  {}", failure);
        }
        for note in &self.notes {
            let _ = writeln!(out, "Note: {}", note);
        }
        out
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> PassResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Report file name, unique per document and second
    pub fn file_name(&self) -> String {
        let stem: String = self
            .document
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!(
            "audit_{}_{}.txt",
            stem,
            self.generated.format("%Y%m%d_%H%M%S")
        )
    }

    /// Write the text table into `directory`, creating it if needed
    pub fn save_text(&self, directory: &Path, options: &ReportOptions) -> PassResult<PathBuf> {
        std::fs::create_dir_all(directory)?;
        let path = directory.join(self.file_name());
        std::fs::write(&path, self.render_table(options))?;
        tracing::info!(path = %path.display(), "Saved audit report");
        Ok(path)
    }
}
