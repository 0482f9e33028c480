//! Reorder protocol errors

use thiserror::Error;

use crate::repository::ApiError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReorderError {
    /// Dragged or target row is missing from the freshly fetched collection
    #[error("row {id} is no longer part of the collection")]
    NotFound { id: String },
    /// The full fetch returned a different number of rows than the count
    #[error("expected {expected} rows, received {actual}")]
    CountMismatch { expected: u64, actual: u64 },
    #[error(transparent)]
    Api(#[from] ApiError),
}
