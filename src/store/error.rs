use thiserror::Error;

use crate::models::AllocationRef;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("allocation {0} not found")]
    NotFound(AllocationRef),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("persistence failure on {target}: {reason}")]
    Persistence { target: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn persistence(target: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Persistence {
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}
