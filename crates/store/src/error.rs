use thiserror::Error;

/// Errors returned by a [`RecordStore`](crate::RecordStore).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No live record carries the given identifier.
    #[error("product not found: {0}")]
    NotFound(String),
}
