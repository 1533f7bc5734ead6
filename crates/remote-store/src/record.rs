//! # StoreRecord Trait
//!
//! The `StoreRecord` trait is the contract a resource type implements to be persisted by the
//! generic [`StoreActor`](crate::StoreActor). It names the identifier the store assigns, the
//! payload used for both creation and full updates, and the error the record raises when the
//! store rejects a write.
//!
//! # Server-side Hooks
//! The store calls back into the record at three points:
//! - [`StoreRecord::on_create`] after the record is built from its fields, before it is inserted.
//! - [`StoreRecord::apply`] when an update arrives. The store applies it to a copy and only
//!   commits the copy when the hook succeeds, so a rejected update never leaves a half-written
//!   record behind.
//! - [`StoreRecord::on_delete`] right before the record is removed.
//!
//! `on_create` and `on_delete` default to accepting everything.

use std::fmt::{Debug, Display};

/// Trait that any record type must implement to be served by [`StoreActor`](crate::StoreActor).
pub trait StoreRecord: Clone + Send + Sync + 'static {
    /// The identifier assigned by the store.
    ///
    /// Ids are handed out from a `u32` counter and records are listed in descending id order,
    /// so the type must be ordered and convertible from `u32`.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The writable fields of the record, used for both `create` and `update`.
    type Fields: Clone + Send + Sync + Debug;

    /// The error raised when the store refuses a write.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the full record from the id the store assigned and the submitted fields.
    fn from_fields(id: Self::Id, fields: Self::Fields) -> Result<Self, Self::Error>;

    /// Called after the record is built and before it becomes visible.
    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Overwrite the writable fields of an existing record.
    fn apply(&mut self, fields: Self::Fields) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed from the store.
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}
