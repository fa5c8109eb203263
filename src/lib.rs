//! # FacadeKit
//!
//! Parametric facade geometry and CAD document maintenance:
//! - generation of windows, doors, valley lines and the gable outline for
//!   a three-bay gabled facade
//! - synchronising generated shape sets with named drawing layers
//! - auditing, geometry repair and viewport normalisation passes
//!
//! ## Architecture
//!
//! FacadeKit is organized as a workspace with multiple crates:
//!
//! 1. **facadekit-core** - Geometry value types, drawing units, error taxonomy
//! 2. **facadekit-designer** - Facade generator and DXF export
//! 3. **facadekit-communication** - Drawing client contract, connection retry,
//!    offline documents
//! 4. **facadekit-cadtools** - Synchronizer, auditor, repair and viewport passes
//! 5. **facadekit-settings** - Configuration
//! 6. **facadekit** - Command implementations and the CLI binary

pub mod commands;

pub use facadekit_cadtools::{
    AuditReport, CadToolError, ClearSummary, GeometryRepairPass, IntegrityAuditor,
    LayerSynchronizer, RepairSummary, SendSummary, ViewportNormalizer, ViewportOutcome,
};
pub use facadekit_communication::{
    connect_with_retry, DocumentConnector, DrawingClient, FileConnector, MemoryDrawing,
    RetryPolicy, Space,
};
pub use facadekit_core::{ConnectionError, DrawingError, Error, Point, Polygon, Result, Segment};
pub use facadekit_designer::{FacadeGenerator, FacadeGeometry, FacadeParameters, ShapeSetKind};
pub use facadekit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so reports on stdout stay clean
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
