//! # Store Errors
//!
//! Failures a caller of the remote store can observe. Transport failures (the actor is gone)
//! are kept apart from refusals by the store itself so callers can tell "the service is down"
//! from "the service said no".

/// Errors returned by [`StoreClient`](crate::StoreClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Record rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a record-level error raised by one of the [`StoreRecord`](crate::StoreRecord) hooks.
    pub fn rejected(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Rejected(Box::new(error))
    }
}
