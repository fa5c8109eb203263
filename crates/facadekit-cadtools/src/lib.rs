//! # FacadeKit CAD Tools
//!
//! Passes that run against a live [`DrawingClient`](facadekit_communication::DrawingClient).
//!
//! ## Passes
//!
//! - **Layer Synchronizer**: clear a layer and send generated shapes to it
//! - **Integrity Auditor**: move stray objects off the default layer, hide
//!   external references and report per-layer statistics
//! - **Geometry Repair**: bulk join followed by closing open polylines
//! - **Viewport Normalizer**: visible, fixed-scale, locked layout viewports
//!
//! Passes must run one at a time against a document. Per-object failures
//! are folded into each pass's summary; only a lost connection aborts.

pub mod audit;
pub mod error;
pub mod outcome;
pub mod repair;
pub mod report;
pub mod sync;
pub mod viewports;

pub use audit::{AuditOptions, AuditReport, IntegrityAuditor, LayerStats};
pub use error::{CadToolError, PassResult};
pub use outcome::{classify, ObjectOutcome, SkipReason, SkipRecord};
pub use repair::{GeometryRepairPass, JoinWait, RepairOptions, RepairSummary};
pub use report::ReportOptions;
pub use sync::{ClearSummary, LayerSynchronizer, ReplaceSummary, SendSummary, SyncOptions};
pub use viewports::{ViewportNormalizer, ViewportOptions, ViewportOutcome, ViewportSummary};
