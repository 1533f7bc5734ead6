//! # Store Client
//!
//! The caller-side handle of a [`StoreActor`](crate::StoreActor).

use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::StoreRecord;
use tokio::sync::{mpsc, oneshot};

/// A cloneable, type-safe handle for talking to a `StoreActor`.
///
/// Each method sends one [`StoreRequest`] over the actor's mpsc channel and awaits the reply on a
/// fresh oneshot channel. Cloning only clones the sender, so handles can be shared freely across
/// tasks. When the last handle is dropped the actor's loop ends.
pub struct StoreClient<T: StoreRecord> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreRecord> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: StoreRecord> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    /// Fetches every record, most recently created first.
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::List { respond_to }).await?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Creates a record and returns it with the id the store assigned.
    pub async fn create(&self, fields: T::Fields) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::Create { fields, respond_to }).await?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Overwrites the writable fields of the record with `id`.
    pub async fn update(&self, id: T::Id, fields: T::Fields) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::Update {
            id,
            fields,
            respond_to,
        })
        .await?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::Delete { id, respond_to }).await?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    async fn send(&self, request: StoreRequest<T>) -> Result<(), StoreError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| StoreError::Closed)
    }
}
