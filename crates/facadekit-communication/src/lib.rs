//! # FacadeKit Communication
//!
//! Everything between the passes and a CAD document.
//!
//! - [`drawing`]: the [`DrawingClient`] contract every pass is written against
//! - [`connection`]: acquiring a document with bounded, fixed-delay retry
//! - [`memory`]: an in-memory document implementing the contract
//! - [`document_file`]: JSON persistence of in-memory documents

pub mod connection;
pub mod document_file;
pub mod drawing;
pub mod memory;

pub use connection::{connect_with_retry, DocumentConnector, FnConnector, RetryPolicy};
pub use document_file::{DocumentFile, FileConnector, DOCUMENT_FORMAT_VERSION};
pub use drawing::{type_tag, DrawingClient, LayerRef, ObjectId, ObjectKind, Space};
pub use memory::{Entity, LayerEntry, MemoryDrawing, MemoryObject, DEFAULT_LAYER};
