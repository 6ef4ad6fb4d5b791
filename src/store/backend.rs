use std::path::PathBuf;
use std::sync::Mutex;

use crate::models::Document;

use super::error::{Result, StoreError};

/// Where the document is read from at startup and written to on every change.
pub trait DocumentBackend: Send + Sync {
    fn load(&self) -> Result<Document>;

    /// Replaces the stored document with `document` in full.
    fn save(&self, document: &Document) -> Result<()>;

    /// Human-readable location, used in diagnostics.
    fn describe(&self) -> String;
}

/// A JSON file on the local file system.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentBackend for FileBackend {
    fn load(&self) -> Result<Document> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::persistence(self.describe(), e))?;
        serde_json::from_str(&raw).map_err(|e| StoreError::persistence(self.describe(), e))
    }

    fn save(&self, document: &Document) -> Result<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Internal(format!("failed to serialize document: {e}")))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::persistence(self.describe(), e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the document in memory. Used by tests and `Store::open_memory`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stored: Mutex<Option<Document>>,
    saves: Mutex<usize>,
    fail_writes: bool,
}

impl MemoryBackend {
    /// A backend with nothing stored; loading from it fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            stored: Mutex::new(Some(document)),
            ..Self::default()
        }
    }

    /// A backend whose every `save` fails with a persistence error.
    pub fn failing_writes(document: Document) -> Self {
        Self {
            fail_writes: true,
            ..Self::with_document(document)
        }
    }

    /// The most recently stored document, if any.
    pub fn stored(&self) -> Option<Document> {
        self.stored.lock().ok().and_then(|d| d.clone())
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl DocumentBackend for MemoryBackend {
    fn load(&self) -> Result<Document> {
        self.stored
            .lock()
            .map_err(|_| StoreError::Internal("memory backend lock poisoned".to_string()))?
            .clone()
            .ok_or_else(|| StoreError::persistence(self.describe(), "no document stored"))
    }

    fn save(&self, document: &Document) -> Result<()> {
        if self.fail_writes {
            return Err(StoreError::persistence(self.describe(), "writes disabled"));
        }

        let poisoned = || StoreError::Internal("memory backend lock poisoned".to_string());
        *self.stored.lock().map_err(|_| poisoned())? = Some(document.clone());
        *self.saves.lock().map_err(|_| poisoned())? += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
