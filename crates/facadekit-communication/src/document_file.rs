//! Offline drawing documents
//!
//! A [`MemoryDrawing`] persisted as JSON so the passes can run without a
//! host application. Loading goes through [`FileConnector`], which fits the
//! same retry path as a live connection.

use crate::connection::DocumentConnector;
use crate::memory::MemoryDrawing;
use chrono::{DateTime, Utc};
use facadekit_core::ConnectionError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current on-disk format version
pub const DOCUMENT_FORMAT_VERSION: u32 = 1;

/// On-disk wrapper around a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    pub version: u32,
    pub saved: DateTime<Utc>,
    pub document: MemoryDrawing,
}

impl DocumentFile {
    pub fn new(document: MemoryDrawing) -> Self {
        Self {
            version: DOCUMENT_FORMAT_VERSION,
            saved: Utc::now(),
            document,
        }
    }

    /// Read a document file
    pub fn load(path: &Path) -> Result<Self, ConnectionError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConnectionError::Io {
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;
        let file: DocumentFile =
            serde_json::from_str(&content).map_err(|e| ConnectionError::InvalidDocument {
                reason: format!("{}: {}", path.display(), e),
            })?;
        if file.version > DOCUMENT_FORMAT_VERSION {
            return Err(ConnectionError::InvalidDocument {
                reason: format!(
                    "{}: format version {} is newer than supported version {}",
                    path.display(),
                    file.version,
                    DOCUMENT_FORMAT_VERSION
                ),
            });
        }
        Ok(file)
    }

    /// Write the document, stamping the save time
    pub fn save(&mut self, path: &Path) -> Result<(), ConnectionError> {
        self.saved = Utc::now();
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConnectionError::Io {
                reason: format!("Failed to serialize document: {}", e),
            })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConnectionError::Io {
                reason: format!("Failed to create {}: {}", parent.display(), e),
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConnectionError::Io {
            reason: format!("Failed to write {}: {}", path.display(), e),
        })?;
        tracing::debug!(path = %path.display(), "Saved document");
        Ok(())
    }
}

/// Opens a document file, optionally starting a new one
#[derive(Debug, Clone)]
pub struct FileConnector {
    path: PathBuf,
    create_if_missing: bool,
}

impl FileConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: false,
        }
    }

    /// Start an empty document when the file does not exist yet
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a document back to this connector's path
    pub fn save(&self, document: MemoryDrawing) -> Result<(), ConnectionError> {
        DocumentFile::new(document).save(&self.path)
    }
}

impl DocumentConnector for FileConnector {
    type Client = MemoryDrawing;

    fn connect(&mut self) -> Result<MemoryDrawing, ConnectionError> {
        if !self.path.exists() {
            if self.create_if_missing {
                let name = self
                    .path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Drawing1".to_string());
                tracing::info!(path = %self.path.display(), "Starting new document");
                return Ok(MemoryDrawing::new(name));
            }
            // Waiting will not make the file appear
            return Err(ConnectionError::InvalidDocument {
                reason: format!("{} does not exist", self.path.display()),
            });
        }
        Ok(DocumentFile::load(&self.path)?.document)
    }

    fn target(&self) -> String {
        self.path.display().to_string()
    }
}
