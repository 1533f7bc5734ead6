//! Two-phase deletion.
//!
//! A product is removed only after it was first put up for confirmation and then explicitly
//! confirmed. Whatever the remote store answers, and even if the confirming future is dropped
//! before it does, the workflow ends back in [`DeletionState::Idle`] with no candidate.

use crate::error::InventoryError;
use crate::model::{Product, ProductId};
use crate::remote::RemoteStore;
use crate::store::ProductCollectionStore;
use std::mem;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeletionState {
    #[default]
    Idle,
    /// Waiting for the user to confirm or cancel.
    PendingConfirmation(Product),
    /// Confirmed; the remote delete is in flight.
    Confirmed(Product),
}

/// Holds the workflow in [`DeletionState::Confirmed`] and puts it back to `Idle` when dropped.
struct ConfirmedGuard<'a> {
    state: &'a mut DeletionState,
}

impl<'a> ConfirmedGuard<'a> {
    fn enter(state: &'a mut DeletionState, product: Product) -> Self {
        *state = DeletionState::Confirmed(product);
        Self { state }
    }
}

impl Drop for ConfirmedGuard<'_> {
    fn drop(&mut self) {
        *self.state = DeletionState::Idle;
    }
}

#[derive(Debug, Default)]
pub struct DeletionWorkflow {
    state: DeletionState,
}

impl DeletionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeletionState {
        &self.state
    }

    /// The product awaiting confirmation, if any.
    pub fn candidate(&self) -> Option<&Product> {
        match &self.state {
            DeletionState::PendingConfirmation(product) => Some(product),
            _ => None,
        }
    }

    /// Puts `product` up for confirmation, replacing any earlier candidate.
    pub fn request(&mut self, product: Product) {
        debug!(product_id = %product.id, "Deletion requested");
        self.state = DeletionState::PendingConfirmation(product);
    }

    /// Drops the candidate without touching the collection. Returns it, if there was one.
    pub fn cancel(&mut self) -> Option<Product> {
        match mem::take(&mut self.state) {
            DeletionState::PendingConfirmation(product) => {
                debug!(product_id = %product.id, "Deletion cancelled");
                Some(product)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Removes the candidate through `store`.
    ///
    /// Returns the removed id, or `Ok(None)` when nothing was pending. The workflow is `Idle`
    /// afterwards whether or not the removal succeeded.
    pub async fn confirm<R: RemoteStore>(
        &mut self,
        store: &ProductCollectionStore<R>,
    ) -> Result<Option<ProductId>, InventoryError> {
        let product = match mem::take(&mut self.state) {
            DeletionState::PendingConfirmation(product) => product,
            other => {
                self.state = other;
                return Ok(None);
            }
        };

        debug!(product_id = %product.id, "Deletion confirmed");
        let id = product.id.clone();
        let _confirmed = ConfirmedGuard::enter(&mut self.state, product);
        store.remove(&id).await.map(|()| Some(id))
    }
}
