use crate::models::Document;

use super::backend::DocumentBackend;

/// Reads the document from `backend`.
///
/// A missing or malformed document never stops the service: the failure is
/// logged and an empty document is used instead.
pub fn load_or_default(backend: &dyn DocumentBackend) -> Document {
    match backend.load() {
        Ok(document) => {
            tracing::info!(
                source = %backend.describe(),
                allocations = document.allocations().len(),
                records = document.attendance_len(),
                "Loaded attendance document"
            );
            document
        }
        Err(e) => {
            tracing::warn!(
                source = %backend.describe(),
                "Could not load attendance document, starting empty: {}",
                e
            );
            Document::default()
        }
    }
}
