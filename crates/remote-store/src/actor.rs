//! # Store Actor
//!
//! The server half of the remote store. A `StoreActor` owns the records and the receiving end of
//! the request channel and handles one request at a time, so its state needs no locking.

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::StoreRecord;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Generic CRUD service over records of type `T`.
///
/// # Usage Pattern
///
/// 1. **Create**: `StoreActor::new()` returns the actor and its first [`StoreClient`].
/// 2. **Run**: spawn `actor.run()` on the Tokio runtime.
/// 3. **Use**: clone the client wherever the store is needed. Dropping every client stops the
///    actor.
///
/// # Operations
///
/// * **List**: returns a copy of every record ordered by id, highest first.
/// * **Create**:
///     1. Takes the next id from the internal counter.
///     2. Builds the record with [`StoreRecord::from_fields`].
///     3. Runs the [`StoreRecord::on_create`] hook.
///     4. Inserts the record and returns a copy of it.
/// * **Update**: applies the fields to a copy of the stored record and replaces the stored record
///   only when [`StoreRecord::apply`] succeeds.
/// * **Delete**: runs [`StoreRecord::on_delete`], then removes the record.
///
/// Update and Delete answer [`StoreError::NotFound`] for unknown ids.
pub struct StoreActor<T: StoreRecord> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: StoreRecord> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client calls wait
    /// for room.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: BTreeMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    pub async fn run(mut self) {
        // "Product" rather than "inventory_sync::model::product::Product"
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, "Store started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                StoreRequest::List { respond_to } => {
                    let records: Vec<T> = self.records.values().rev().cloned().collect();
                    debug!(record_type, count = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                StoreRequest::Create { fields, respond_to } => {
                    debug!(record_type, ?fields, "Create");
                    let _ = respond_to.send(self.create(record_type, fields));
                }
                StoreRequest::Update {
                    id,
                    fields,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?fields, "Update");
                    let _ = respond_to.send(self.update(record_type, id, fields));
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(record_type, %id, "Delete");
                    let _ = respond_to.send(self.delete(record_type, id));
                }
            }
        }

        info!(record_type, size = self.records.len(), "Shutdown");
    }

    fn create(&mut self, record_type: &str, fields: T::Fields) -> Result<T, StoreError> {
        let id = T::Id::from(self.next_id);
        let mut record = T::from_fields(id.clone(), fields).map_err(|e| {
            warn!(record_type, error = %e, "Create failed");
            StoreError::rejected(e)
        })?;
        if let Err(e) = record.on_create() {
            warn!(record_type, error = %e, "on_create failed");
            return Err(StoreError::rejected(e));
        }
        // Ids are only consumed by successful creates.
        self.next_id += 1;
        self.records.insert(id.clone(), record.clone());
        info!(record_type, %id, size = self.records.len(), "Created");
        Ok(record)
    }

    fn update(
        &mut self,
        record_type: &str,
        id: T::Id,
        fields: T::Fields,
    ) -> Result<(), StoreError> {
        let Some(current) = self.records.get(&id) else {
            warn!(record_type, %id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        };
        let mut updated = current.clone();
        if let Err(e) = updated.apply(fields) {
            warn!(record_type, %id, error = %e, "Update failed");
            return Err(StoreError::rejected(e));
        }
        self.records.insert(id.clone(), updated);
        info!(record_type, %id, "Updated");
        Ok(())
    }

    fn delete(&mut self, record_type: &str, id: T::Id) -> Result<(), StoreError> {
        let Some(record) = self.records.get(&id) else {
            warn!(record_type, %id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        };
        if let Err(e) = record.on_delete() {
            warn!(record_type, %id, error = %e, "on_delete failed");
            return Err(StoreError::rejected(e));
        }
        self.records.remove(&id);
        info!(record_type, %id, size = self.records.len(), "Deleted");
        Ok(())
    }
}
