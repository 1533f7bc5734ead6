//! # Product Client
//!
//! Implements [`RemoteStore`] on top of a generic [`StoreClient<Product>`].
use super::RemoteStore;
use crate::model::{Product, ProductFields, ProductId};
use async_trait::async_trait;
use remote_store::{StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for the remote product store.
#[derive(Clone)]
pub struct ProductClient {
    inner: StoreClient<Product>,
}

impl ProductClient {
    pub fn new(inner: StoreClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RemoteStore for ProductClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        debug!("Sending request");
        self.inner.list().await
    }

    #[instrument(skip(self))]
    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
        debug!("Sending request");
        self.inner.create(fields).await
    }

    #[instrument(skip(self))]
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<(), StoreError> {
        debug!("Sending request");
        self.inner.update(id, fields).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
