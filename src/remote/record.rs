//! [`StoreRecord`] implementation for the [`Product`] domain type.
//!
//! This is the server side of the product store: how a record is built from submitted fields and
//! which writes the store refuses. The client validates input before sending it, but the store
//! keeps its own check on names so a misbehaving caller cannot persist a blank product.

use crate::model::{Product, ProductFields, ProductId};
use remote_store::StoreRecord;
use thiserror::Error;

/// Writes the product store refuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductRecordError {
    #[error("product name must not be blank")]
    BlankName,
}

impl StoreRecord for Product {
    type Id = ProductId;
    type Fields = ProductFields;
    type Error = ProductRecordError;

    fn from_fields(id: ProductId, fields: ProductFields) -> Result<Self, Self::Error> {
        Ok(Self::new(id, fields.name, fields.quantity))
    }

    fn on_create(&mut self) -> Result<(), Self::Error> {
        reject_blank(&self.name)
    }

    /// Overwrites `name` and `quantity`; the id is never touched.
    fn apply(&mut self, fields: ProductFields) -> Result<(), Self::Error> {
        reject_blank(&fields.name)?;
        self.set_fields(fields);
        Ok(())
    }
}

fn reject_blank(name: &str) -> Result<(), ProductRecordError> {
    if name.trim().is_empty() {
        return Err(ProductRecordError::BlankName);
    }
    Ok(())
}
