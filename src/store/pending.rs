//! Per-id in-flight tracking.

use super::StoreState;
use crate::error::InventoryError;
use crate::model::ProductId;
use parking_lot::Mutex;

/// Marks a product id as having a mutation in flight until dropped.
///
/// Dropping the guard (including when the owning future is cancelled) releases the id.
pub(super) struct PendingGuard<'a> {
    state: &'a Mutex<StoreState>,
    id: ProductId,
}

impl<'a> PendingGuard<'a> {
    /// Claims `id`, or fails with [`InventoryError::Conflict`] if it is already claimed.
    pub(super) fn acquire(
        state: &'a Mutex<StoreState>,
        id: &ProductId,
    ) -> Result<Self, InventoryError> {
        if !state.lock().pending.insert(id.clone()) {
            return Err(InventoryError::Conflict(id.clone()));
        }
        Ok(Self {
            state,
            id: id.clone(),
        })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().pending.remove(&self.id);
    }
}
