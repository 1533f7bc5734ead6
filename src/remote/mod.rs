//! # Remote Store Access
//!
//! The inventory never talks to its persistence backend directly. Everything goes through the
//! [`RemoteStore`] trait, a four-call CRUD contract:
//!
//! | Call | Result |
//! |------|--------|
//! | `list()` | every product |
//! | `create(fields)` | the created product, with the id the store assigned |
//! | `update(id, fields)` | nothing |
//! | `delete(id)` | nothing |
//!
//! ## Structure
//!
//! - [`record`] - [`StoreRecord`](remote_store::StoreRecord) implementation for [`Product`], so
//!   the in-process [`StoreActor`](remote_store::StoreActor) can serve products
//! - [`client`] - [`ProductClient`], the `RemoteStore` implementation over a
//!   [`StoreClient<Product>`](remote_store::StoreClient)
//! - [`new()`] - Factory function that creates the store actor and its product client
//!
//! ## Usage
//!
//! ```rust
//! use inventory_sync::model::ProductFields;
//! use inventory_sync::remote::{self, RemoteStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = remote::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let created = client.create(ProductFields::validate("Widget", 12)?).await?;
//!     assert_eq!(client.list().await?, vec![created]);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod record;

pub use client::*;
pub use record::*;

use crate::model::{Product, ProductFields, ProductId};
use async_trait::async_trait;
use remote_store::{StoreActor, StoreError};

/// The CRUD contract of the remote product store.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches every product.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Creates a product; the store assigns its id.
    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError>;

    /// Overwrites the name and quantity of the product with `id`.
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<(), StoreError>;

    /// Deletes the product with `id`.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}

/// Creates an in-process remote store for products and a client for it.
pub fn new(buffer_size: usize) -> (StoreActor<Product>, ProductClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
