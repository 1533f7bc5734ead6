//! Error types for inventory operations.

use crate::model::ProductId;
use remote_store::StoreError;
use thiserror::Error;

/// Errors that can occur while loading or mutating the product collection.
///
/// None of these are fatal: after any of them the collection is exactly what it was before the
/// failed operation started, and the caller may retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// The user's input was rejected before any remote call was made.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The remote store call failed.
    #[error("Remote store error: {0}")]
    Remote(String),

    /// The product is not in the local collection.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Another mutation for this product has not settled yet.
    #[error("Another change to {0} is still in flight")]
    Conflict(ProductId),
}

impl From<StoreError> for InventoryError {
    fn from(e: StoreError) -> Self {
        InventoryError::Remote(e.to_string())
    }
}
