//! # Store Messages
//!
//! The request type carried from [`StoreClient`](crate::StoreClient) to
//! [`StoreActor`](crate::StoreActor).
//!
//! The variants are the four operations of a plain CRUD service: list everything, create a
//! record and return it with its assigned id, overwrite a record's fields, and delete a record.
//! Every variant carries a oneshot responder, so each call is a single request/response pair.

use crate::error::StoreError;
use crate::record::StoreRecord;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Request sent to a [`StoreActor`](crate::StoreActor).
#[derive(Debug)]
pub enum StoreRequest<T: StoreRecord> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Create {
        fields: T::Fields,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        fields: T::Fields,
        respond_to: Response<()>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
