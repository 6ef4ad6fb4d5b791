//! In-memory attendance document mirrored to a persistent backend.
//!
//! A [`Store`] owns the single [`Document`] for the process. Reads lock it,
//! copy out what they need and release. Writes append under the same lock and
//! rewrite the whole document through the [`DocumentBackend`] before
//! releasing, so concurrent submissions are serialized.

mod backend;
mod error;
mod loader;
mod query;
mod recorder;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::Document;

pub use backend::{DocumentBackend, FileBackend, MemoryBackend};
pub use error::{Result, StoreError};
pub use loader::load_or_default;
pub use recorder::ATTENDANCE_LOG_TARGET;

#[derive(Clone)]
pub struct Store {
    document: Arc<Mutex<Document>>,
    backend: Arc<dyn DocumentBackend>,
}

impl Store {
    /// Loads the document from `backend`, falling back to an empty one.
    pub fn open(backend: Arc<dyn DocumentBackend>) -> Self {
        let document = load_or_default(backend.as_ref());
        Self {
            document: Arc::new(Mutex::new(document)),
            backend,
        }
    }

    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::open(Arc::new(FileBackend::new(path)))
    }

    pub fn open_memory(document: Document) -> Self {
        Self::open(Arc::new(MemoryBackend::with_document(document)))
    }

    /// A copy of the current in-memory document.
    pub fn snapshot(&self) -> Result<Document> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Document>> {
        self.document
            .lock()
            .map_err(|_| StoreError::Internal("document lock poisoned".to_string()))
    }
}
